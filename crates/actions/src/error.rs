//! # Actions エラー型
//!
//! 全エンドポイント共通のエラー型。どの失敗も `{message}` 形式のJSONに変換する。
//! 検証エラーはそのまま利用者に表示し、ネットワーク・内部エラーは詳細をログにのみ残す。

use axum::http::StatusCode;
use axum::Json;
use svault_core::VaultError;
use svault_types::ActionErrorBody;

/// Actionsエラー型。
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// 公開鍵の形式が不正
    #[error("Invalid \"{0}\" provided")]
    InvalidKeyFormat(&'static str),
    /// リクエストボディに必須フィールドが無い
    #[error("Missing \"{0}\" in request body")]
    MissingField(&'static str),
    /// 必須のクエリパラメータが無い
    #[error("Missing required query parameter: {0}")]
    MissingParameter(&'static str),
    /// クエリパラメータが数値として解釈できない
    #[error("Invalid input query parameter: {0}")]
    InvalidParameter(&'static str),
    /// クエリパラメータが0以下
    #[error("{0} is too small")]
    ParameterTooSmall(&'static str),
    /// ボディがJSONオブジェクトでない
    #[error("Request body must be a JSON object like {{\"account\": \"<base58 public key>\"}}")]
    InvalidBody,
    /// 未知の操作・パス
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    /// パスは存在するがメソッドが対応していない
    #[error("Method {0} is not allowed on this route")]
    MethodNotAllowed(String),
    /// Blockhash取得失敗（詳細はログのみ）
    #[error("Unable to reach the Solana network, please try again")]
    NetworkUnavailable(String),
    /// 想定外の内部エラー（詳細はログのみ）
    #[error("An unknown error occurred")]
    Unknown(String),
}

impl From<VaultError> for ActionError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::InvalidKeyFormat { field } => ActionError::InvalidKeyFormat(field),
            VaultError::MissingParameter { field } => ActionError::MissingParameter(field),
            VaultError::InvalidParameter { field } => ActionError::InvalidParameter(field),
            VaultError::ParameterTooSmall { field } => ActionError::ParameterTooSmall(field),
            VaultError::UnknownOperation(name) => ActionError::UnknownAction(name),
            VaultError::InvalidInstruction(detail) | VaultError::Encoding(detail) => {
                ActionError::Unknown(detail)
            }
        }
    }
}

impl axum::response::IntoResponse for ActionError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ActionError::UnknownAction(_) => StatusCode::NOT_FOUND,
            ActionError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::BAD_REQUEST,
        };

        match &self {
            ActionError::NetworkUnavailable(detail) => {
                tracing::warn!(error = %detail, "Blockhashの取得に失敗");
            }
            ActionError::Unknown(detail) => {
                tracing::error!(error = %detail, "想定外のエラー");
            }
            other => {
                tracing::debug!(error = %other, "リクエストを拒否");
            }
        }

        let body = ActionErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
