//! # POST /api/actions/{action}
//!
//! 検証 → アドレス導出 → Blockhash取得 → トランザクション構築 → エンコード。
//! ネットワークにアクセスするのはBlockhash取得の1回だけで、検証に失敗した場合は行わない。

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use svault_core::OperationKind;
use svault_types::{ActionPostResponse, ActionPostType};

use crate::config::ActionsState;
use crate::error::ActionError;
use crate::metadata::confirmation_message;
use crate::validate::{validate_account, validate_operation, ActionQuery};

/// POST /api/actions/{action}: 未署名トランザクションを返す。
///
/// ボディ: `{"account": "<base58>"}`、クエリ: `amount`（deposit / withdraw のみ）。
/// 署名・送信は行わない。
pub async fn handle_action_post(
    State(state): State<Arc<ActionsState>>,
    Path(action): Path<String>,
    query: Result<Query<ActionQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ActionPostResponse>, ActionError> {
    let kind: OperationKind = action.parse()?;

    // Step 1: パラメータ検証（ネットワークアクセス前）
    // 金額を取らない操作ではクエリを読まない
    let query = match query {
        Ok(Query(query)) => query,
        Err(_) if kind.takes_amount() => return Err(ActionError::InvalidParameter("amount")),
        Err(_) => ActionQuery::default(),
    };
    let operation = validate_operation(kind, &query)?;
    let owner = validate_account(&body)?;

    // Step 2: state / vault アドレスの導出
    let identity = state.program.derive(&owner);

    // Step 3: 最新Blockhashの取得（唯一のネットワークアクセス）
    let recency = state
        .blockhash_provider
        .latest_blockhash()
        .await
        .map_err(|e| ActionError::NetworkUnavailable(e.to_string()))?;

    // Step 4: 構築・エンコード
    let transaction = state.program.assemble(&operation, &owner, &identity, &recency);
    let encoded = transaction.encode()?;

    tracing::info!(
        action = %kind,
        owner = %owner,
        state = %identity.state,
        vault = %identity.vault,
        lamports = operation.amount().map(|a| a.lamports()).unwrap_or(0),
        last_valid_block_height = transaction.last_valid_block_height(),
        "未署名トランザクションを構築"
    );

    Ok(Json(ActionPostResponse {
        kind: ActionPostType::Transaction,
        transaction: encoded,
        message: Some(confirmation_message(&operation)),
    }))
}
