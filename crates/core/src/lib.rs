//! # Svault Core
//!
//! Vaultプログラム向けのアドレス導出と未署名トランザクション構築を実装する。
//! ネットワークI/Oは一切行わない（Blockhashは呼び出し側が `RecencyToken` として渡す）。
//!
//! ## 処理フロー
//! 1. 所有者の公開鍵から state PDA を導出する
//! 2. state PDA から vault PDA を導出する
//! 3. 操作（initialize / deposit / withdraw / close）に対応する命令を1つ構築する
//! 4. fee payer = 所有者、Blockhash付きのトランザクションに包む（署名なし）

pub mod amount;
pub mod error;
pub mod instruction;
pub mod operation;
pub mod pda;
pub mod program;
pub mod transaction;

pub use amount::Amount;
pub use error::VaultError;
pub use instruction::{anchor_discriminator, DEFAULT_PROGRAM_ID};
pub use operation::{OperationKind, VaultOperation};
pub use pda::{parse_pubkey, VaultIdentity};
pub use program::VaultProgram;
pub use transaction::{decode_transaction, RecencyToken, UnsignedTransaction};
