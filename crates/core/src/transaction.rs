//! # 未署名トランザクション構築
//!
//! 命令1つを fee payer と Blockhash 付きのトランザクションに包み、
//! ウォレットが受け取れる形式（Solanaワイヤーフォーマット → Base64）にエンコードする。

use base64::Engine;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};

use crate::error::VaultError;

/// Base64エンジン（Standard）
pub(crate) fn b64() -> base64::engine::GeneralPurpose {
    base64::engine::general_purpose::STANDARD
}

/// ネットワークから取得した最新Blockhashと、その有効期限となるブロック高。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyToken {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// 署名スロットがすべて空のトランザクション。構築後は変更しない。
#[derive(Debug, Clone)]
pub struct UnsignedTransaction {
    transaction: Transaction,
    last_valid_block_height: u64,
}

impl UnsignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// fee payer（アカウントキーの先頭）
    pub fn fee_payer(&self) -> &Pubkey {
        &self.transaction.message.account_keys[0]
    }

    pub fn recent_blockhash(&self) -> &Hash {
        &self.transaction.message.recent_blockhash
    }

    /// このブロック高を超えるとトランザクションは送信できなくなる。
    /// ワイヤーフォーマットには含まれない。
    pub fn last_valid_block_height(&self) -> u64 {
        self.last_valid_block_height
    }

    /// ワイヤーフォーマットでシリアライズし、Base64エンコードする。
    pub fn encode(&self) -> Result<String, VaultError> {
        let bytes = bincode::serialize(&self.transaction).map_err(|e| {
            VaultError::Encoding(format!("failed to serialize transaction: {e}"))
        })?;
        Ok(b64().encode(bytes))
    }
}

/// 命令を1つ含む未署名トランザクションを構築する。
///
/// 署名者の数だけ `Signature::default()` を並べる（ウォレットが後で埋める）。
pub fn assemble(
    instruction: Instruction,
    fee_payer: &Pubkey,
    recency: &RecencyToken,
) -> UnsignedTransaction {
    let message = Message::new_with_blockhash(&[instruction], Some(fee_payer), &recency.blockhash);

    let num_signers = message.header.num_required_signatures as usize;
    let signatures = vec![Signature::default(); num_signers];

    UnsignedTransaction {
        transaction: Transaction {
            signatures,
            message,
        },
        last_valid_block_height: recency.last_valid_block_height,
    }
}

/// Base64エンコードされたトランザクションをデコードする。
pub fn decode_transaction(encoded: &str) -> Result<Transaction, VaultError> {
    let bytes = b64()
        .decode(encoded.trim())
        .map_err(|e| VaultError::Encoding(format!("invalid base64: {e}")))?;
    bincode::deserialize(&bytes)
        .map_err(|e| VaultError::Encoding(format!("failed to deserialize transaction: {e}")))
}
