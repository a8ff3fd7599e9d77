//! # GET /api/actions/{action}
//!
//! 発見用ペイロード（タイトル・説明・リンク・パラメータ）を返す。

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use svault_core::OperationKind;
use svault_types::ActionGetResponse;

use crate::config::ActionsState;
use crate::error::ActionError;
use crate::metadata::{operation_metadata, vault_metadata};
use crate::validate::request_origin;

/// GET /api/actions/vault: 4操作すべてへのリンク。
pub async fn handle_vault_get(
    State(state): State<Arc<ActionsState>>,
    headers: HeaderMap,
) -> Json<ActionGetResponse> {
    let origin = request_origin(state.public_origin.as_deref(), &headers);
    Json(vault_metadata(&origin, &state.icon_path))
}

/// GET /api/actions/{action}: 単一操作。未知の操作は404。
pub async fn handle_action_get(
    State(state): State<Arc<ActionsState>>,
    Path(action): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ActionGetResponse>, ActionError> {
    let kind: OperationKind = action.parse()?;
    let origin = request_origin(state.public_origin.as_deref(), &headers);
    Ok(Json(operation_metadata(kind, &origin, &state.icon_path)))
}
