//! # OPTIONS / フォールバック

use axum::http::{Method, StatusCode, Uri};

use crate::error::ActionError;

/// OPTIONS: 空ボディの200。共通ヘッダはミドルウェアが付与する。
pub async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

/// どのルートにも一致しないリクエスト。
pub async fn handle_not_found(uri: Uri) -> ActionError {
    ActionError::UnknownAction(uri.path().to_string())
}

/// パスは一致したがメソッドが対応していないリクエスト。
pub async fn handle_method_not_allowed(method: Method) -> ActionError {
    ActionError::MethodNotAllowed(method.to_string())
}
