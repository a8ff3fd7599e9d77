//! # Svault Actions
//!
//! Vaultプログラム向けのSolana Actions（Blinks）サーバー。
//!
//! ## 役割
//! - 操作ごとの発見用メタデータ（タイトル・説明・パラメータ）の公開
//! - 所有者の公開鍵から state / vault アドレスを導出
//! - 未署名トランザクションの構築（署名・送信は行わない）
//! - Actionプロトコル共通ヘッダ（CORS含む）の付与
//!
//! ## API エンドポイント
//! - `GET /actions.json`: Actionsルールファイル
//! - `GET /api/actions/vault`: 全操作の発見用ペイロード
//! - `GET /api/actions/{action}`: 単一操作の発見用ペイロード
//! - `POST /api/actions/{action}`: 未署名トランザクション
//! - `OPTIONS`: 全ルートでCORSプリフライト

mod config;
mod endpoints;
mod error;
mod headers;
mod metadata;
mod rpc;
mod validate;

use std::sync::Arc;

use axum::routing::get;

use config::{ActionsConfig, ActionsState};
use endpoints::*;

/// ルーターを構築する。共通ヘッダは全レスポンス（404を含む）に付与される。
pub(crate) fn build_router(state: Arc<ActionsState>) -> axum::Router {
    let headers = headers::action_headers(state.cluster);

    axum::Router::new()
        .route(
            "/actions.json",
            get(handle_actions_json).options(handle_preflight),
        )
        .route(
            "/api/actions/vault",
            get(handle_vault_get).options(handle_preflight),
        )
        .route(
            "/api/actions/{action}",
            get(handle_action_get)
                .post(handle_action_post)
                .options(handle_preflight),
        )
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_method_not_allowed)
        .layer(axum::middleware::map_response_with_state(
            headers,
            headers::apply_action_headers,
        ))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ActionsConfig::from_env()?;
    tracing::info!(
        cluster = %config.cluster,
        rpc_url = %config.rpc_url,
        program_id = %config.program_id,
        "設定を読み込みました"
    );
    if config.public_origin.is_none() {
        tracing::warn!("PUBLIC_ORIGINが未設定です。リクエストのHostヘッダからhrefを生成します");
    }

    let state = Arc::new(ActionsState::from_config(&config, reqwest::Client::new()));
    let app = build_router(state);

    tracing::info!("Svault Actionsを {} で起動します", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
