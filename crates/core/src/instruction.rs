//! # Vaultプログラム命令
//!
//! デプロイ済みVaultプログラム（Anchor）の命令エンコーディング。
//!
//! - 命令データ: `sha256("global:<命令名>")[..8]` + 引数（Borsh、u64はリトルエンディアン）
//! - アカウント: user(署名者, 書き込み可), state(書き込み可), vault(書き込み可), system_program

use sha2::{Digest, Sha256};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::amount::Amount;
use crate::error::VaultError;
use crate::operation::{OperationKind, VaultOperation};
use crate::pda::VaultIdentity;

/// デプロイ済みVaultプログラムの既定ID（`VAULT_PROGRAM_ID` で上書き可能）
pub const DEFAULT_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("31gKSA4sAgmjrLDSzSSBoNq57sJU1aYu2je8ddWTQAe1");

/// Anchor命令ディスクリミネータのバイト長
pub const DISCRIMINATOR_LEN: usize = 8;

/// Anchor命令ディスクリミネータを計算する。
/// `sha256("global:{name}")[..8]`
pub fn anchor_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let hash = Sha256::digest(format!("global:{name}").as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    discriminator
}

impl VaultOperation {
    /// 命令データをエンコードする。
    pub fn data(&self) -> Vec<u8> {
        let mut data = anchor_discriminator(self.kind().as_str()).to_vec();
        if let Some(amount) = self.amount() {
            data.extend_from_slice(&amount.lamports().to_le_bytes());
        }
        data
    }

    /// 命令データをデコードする。
    pub fn decode(data: &[u8]) -> Result<Self, VaultError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(VaultError::InvalidInstruction(format!(
                "expected at least 8 bytes, got {}",
                data.len()
            )));
        }
        let (discriminator, args) = data.split_at(DISCRIMINATOR_LEN);

        let kind = OperationKind::ALL
            .into_iter()
            .find(|kind| discriminator == anchor_discriminator(kind.as_str()).as_slice())
            .ok_or_else(|| {
                VaultError::InvalidInstruction("unknown discriminator".to_string())
            })?;

        let amount = if kind.takes_amount() {
            let bytes: [u8; 8] = args.try_into().map_err(|_| {
                VaultError::InvalidInstruction(format!(
                    "{kind} expects an 8-byte amount, got {} bytes",
                    args.len()
                ))
            })?;
            let lamports = u64::from_le_bytes(bytes);
            if lamports == 0 {
                return Err(VaultError::InvalidInstruction(format!(
                    "{kind} amount must be greater than 0 lamports"
                )));
            }
            Some(Amount::from_lamports(lamports))
        } else {
            if !args.is_empty() {
                return Err(VaultError::InvalidInstruction(format!(
                    "{kind} takes no arguments"
                )));
            }
            None
        };

        VaultOperation::new(kind, amount)
    }
}

/// 命令のアカウントリストを構築する。4つの操作すべてで同じ並び。
#[allow(deprecated)] // solana-sdk 2.x のsystem_program非推奨警告を抑制
pub fn vault_accounts(owner: &Pubkey, identity: &VaultIdentity) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(identity.state, false),
        AccountMeta::new(identity.vault, false),
        AccountMeta::new_readonly(solana_sdk::system_program::ID, false),
    ]
}

/// Vaultプログラム命令を1つ構築する。
pub fn build_instruction(
    program_id: &Pubkey,
    operation: &VaultOperation,
    owner: &Pubkey,
    identity: &VaultIdentity,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vault_accounts(owner, identity),
        data: operation.data(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pda::derive_identity;

    #[test]
    fn test_anchor_discriminators() {
        assert_eq!(
            anchor_discriminator("initialize"),
            [175, 175, 109, 31, 13, 152, 155, 237]
        );
        assert_eq!(
            anchor_discriminator("deposit"),
            [242, 35, 198, 137, 82, 225, 242, 182]
        );
        assert_eq!(
            anchor_discriminator("withdraw"),
            [183, 18, 70, 156, 148, 109, 161, 34]
        );
        assert_eq!(
            anchor_discriminator("close"),
            [98, 165, 201, 177, 108, 65, 206, 96]
        );
    }

    #[test]
    fn test_deposit_data_layout() {
        let op = VaultOperation::Deposit(Amount::parse("amount", "0.5").unwrap());
        let data = op.data();
        assert_eq!(data.len(), 16);
        assert_eq!(&data[..8], &anchor_discriminator("deposit"));
        assert_eq!(&data[8..], &500_000_000u64.to_le_bytes());
    }

    #[test]
    fn test_close_has_no_arguments() {
        assert_eq!(VaultOperation::Close.data(), anchor_discriminator("close").to_vec());
    }

    #[test]
    fn test_decode_recovers_operation() {
        let op = VaultOperation::Withdraw(Amount::parse("amount", "0.2").unwrap());
        let decoded = VaultOperation::decode(&op.data()).unwrap();
        assert_eq!(decoded.kind(), OperationKind::Withdraw);
        assert_eq!(decoded.amount().unwrap().lamports(), 200_000_000);
    }

    #[test]
    fn test_decode_rejects_malformed_data() {
        assert!(VaultOperation::decode(&[1, 2, 3]).is_err());
        assert!(VaultOperation::decode(&[0u8; 8]).is_err());

        // depositの引数が欠けている
        let truncated = anchor_discriminator("deposit");
        assert!(VaultOperation::decode(&truncated).is_err());

        // closeに余分な引数
        let mut extra = anchor_discriminator("close").to_vec();
        extra.push(0);
        assert!(VaultOperation::decode(&extra).is_err());

        // 0 lamportのdeposit
        let mut zero = anchor_discriminator("deposit").to_vec();
        zero.extend_from_slice(&0u64.to_le_bytes());
        let err = VaultOperation::decode(&zero).unwrap_err();
        assert!(matches!(err, VaultError::InvalidInstruction(_)), "err={err}");
    }

    #[test]
    #[allow(deprecated)]
    fn test_build_instruction_accounts() {
        let owner = Pubkey::new_unique();
        let identity = derive_identity(&owner, &DEFAULT_PROGRAM_ID);
        let ix = build_instruction(
            &DEFAULT_PROGRAM_ID,
            &VaultOperation::Initialize,
            &owner,
            &identity,
        );

        assert_eq!(ix.program_id, DEFAULT_PROGRAM_ID);
        assert_eq!(ix.accounts.len(), 4);
        assert_eq!(ix.accounts[0].pubkey, owner);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, identity.state);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].pubkey, identity.vault);
        assert!(!ix.accounts[2].is_signer && ix.accounts[2].is_writable);
        assert_eq!(ix.accounts[3].pubkey, solana_sdk::system_program::ID);
        assert!(!ix.accounts[3].is_signer && !ix.accounts[3].is_writable);
    }
}
