//! # Actionsエンドポイント
//!
//! - `GET /api/actions/vault`: 全操作の発見用ペイロード
//! - `GET /api/actions/{action}`: 単一操作の発見用ペイロード
//! - `POST /api/actions/{action}`: 未署名トランザクションの構築
//! - `OPTIONS *`: CORSプリフライト
//! - `GET /actions.json`: Actionsルールファイル

pub mod actions_json;
pub mod discovery;
pub mod preflight;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use actions_json::handle_actions_json;
pub use discovery::{handle_action_get, handle_vault_get};
pub use preflight::{handle_method_not_allowed, handle_not_found, handle_preflight};
pub use transaction::handle_action_post;
