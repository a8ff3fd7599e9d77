//! テスト用ヘルパー（モックRPC・モックBlockhash取得元・サーバー起動）

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use solana_sdk::hash::Hash;
use svault_core::{RecencyToken, VaultProgram};

use crate::config::{ActionsState, SolanaCluster};
use crate::rpc::{BlockhashProvider, RpcError};

/// `getLatestBlockhash` の成功レスポンス
pub fn blockhash_result(blockhash: &Hash, last_valid_block_height: u64) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "context": {"slot": 100},
            "value": {
                "blockhash": blockhash.to_string(),
                "lastValidBlockHeight": last_valid_block_height
            }
        }
    })
}

/// 常に同じJSONを返すモックRPCサーバーを起動し、URLを返す。
pub async fn start_mock_rpc(response: serde_json::Value) -> String {
    let mock_rpc = axum::Router::new().route(
        "/",
        axum::routing::post(move |axum::Json(body): axum::Json<serde_json::Value>| {
            let response = response.clone();
            async move {
                assert_eq!(body["method"], "getLatestBlockhash");
                axum::Json(response)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, mock_rpc).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

/// 呼び出し回数を数えるモック。`token` が None なら常に失敗する。
pub struct CountingBlockhashProvider {
    pub token: Option<RecencyToken>,
    pub calls: AtomicUsize,
}

impl CountingBlockhashProvider {
    pub fn ok(last_valid_block_height: u64) -> Arc<Self> {
        Arc::new(Self {
            token: Some(RecencyToken {
                blockhash: Hash::new_unique(),
                last_valid_block_height,
            }),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            token: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BlockhashProvider for CountingBlockhashProvider {
    async fn latest_blockhash(&self) -> Result<RecencyToken, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.token
            .ok_or_else(|| RpcError::Transport("connection refused (127.0.0.1:8899)".to_string()))
    }
}

/// テスト用ActionsStateを構築するヘルパー
pub fn test_state(provider: Arc<dyn BlockhashProvider>) -> Arc<ActionsState> {
    Arc::new(ActionsState {
        program: VaultProgram::default(),
        blockhash_provider: provider,
        cluster: SolanaCluster::Devnet,
        public_origin: None,
        icon_path: "/logo.png".to_string(),
    })
}

/// Actionsサーバーを起動し、ベースURLを返す。
pub async fn start_server(state: Arc<ActionsState>) -> String {
    let app = crate::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}
