//! # Vaultプログラムインターフェース
//!
//! プログラムIDを保持し、アドレス導出・命令構築・トランザクション構築をまとめる。
//! プロセス起動時に一度だけ構築し、以後は読み取り専用で共有する。

use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

use crate::instruction::{build_instruction, DEFAULT_PROGRAM_ID};
use crate::operation::VaultOperation;
use crate::pda::{derive_identity, VaultIdentity};
use crate::transaction::{self, RecencyToken, UnsignedTransaction};

/// デプロイ済みVaultプログラムへのハンドル。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultProgram {
    program_id: Pubkey,
}

impl Default for VaultProgram {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM_ID)
    }
}

impl VaultProgram {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// 所有者から state / vault アドレスを導出する。
    pub fn derive(&self, owner: &Pubkey) -> VaultIdentity {
        derive_identity(owner, &self.program_id)
    }

    /// 操作に対応する命令を構築する。
    pub fn instruction(
        &self,
        operation: &VaultOperation,
        owner: &Pubkey,
        identity: &VaultIdentity,
    ) -> Instruction {
        build_instruction(&self.program_id, operation, owner, identity)
    }

    /// 命令を1つ含む未署名トランザクションを構築する。fee payer は所有者。
    pub fn assemble(
        &self,
        operation: &VaultOperation,
        owner: &Pubkey,
        identity: &VaultIdentity,
        recency: &RecencyToken,
    ) -> UnsignedTransaction {
        let instruction = self.instruction(operation, owner, identity);
        transaction::assemble(instruction, owner, recency)
    }
}
