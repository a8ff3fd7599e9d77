//! # Solana RPC
//!
//! 最新Blockhash（RecencyToken）の取得を抽象化するトレイトと、JSON-RPC実装。
//! リトライは行わない。失敗はそのままリクエストの失敗として返す。

use std::str::FromStr;

use serde::Deserialize;
use solana_sdk::hash::Hash;
use svault_core::RecencyToken;

/// RPCエラー型（詳細はログ用）
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// HTTP送信失敗
    #[error("RPC送信失敗: {0}")]
    Transport(String),
    /// RPCがエラーを返した
    #[error("RPCがエラーを返しました: {0}")]
    Rpc(String),
    /// レスポンスの形式が不正
    #[error("RPCレスポンスのパースに失敗: {0}")]
    Parse(String),
}

/// 最新Blockhashの取得元。
///
/// 実装はステートレスな接続ハンドルであり、並行リクエストから共有される。
#[async_trait::async_trait]
pub trait BlockhashProvider: Send + Sync {
    /// 最新Blockhashと有効期限ブロック高を取得する。
    async fn latest_blockhash(&self) -> Result<RecencyToken, RpcError>;
}

/// JSON-RPC `getLatestBlockhash` による実装。
pub struct RpcBlockhashProvider {
    http_client: reqwest::Client,
    rpc_url: String,
    commitment: String,
}

impl RpcBlockhashProvider {
    /// commitment = "confirmed" で構築する。
    pub fn new(http_client: reqwest::Client, rpc_url: String) -> Self {
        Self {
            http_client,
            rpc_url,
            commitment: "confirmed".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RpcContextValue<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
    last_valid_block_height: u64,
}

#[async_trait::async_trait]
impl BlockhashProvider for RpcBlockhashProvider {
    async fn latest_blockhash(&self) -> Result<RecencyToken, RpcError> {
        let rpc_request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getLatestBlockhash",
            "params": [{"commitment": self.commitment}]
        });

        let rpc_response = self
            .http_client
            .post(&self.rpc_url)
            .json(&rpc_request)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let status = rpc_response.status();
        if !status.is_success() {
            return Err(RpcError::Rpc(format!("HTTP {status}")));
        }

        let rpc_body: RpcResponse<RpcContextValue<LatestBlockhash>> = rpc_response
            .json()
            .await
            .map_err(|e| RpcError::Parse(e.to_string()))?;

        if let Some(error) = rpc_body.error {
            return Err(RpcError::Rpc(error.to_string()));
        }

        let latest = rpc_body
            .result
            .ok_or_else(|| RpcError::Parse("resultがありません".to_string()))?
            .value;

        let blockhash = Hash::from_str(&latest.blockhash)
            .map_err(|e| RpcError::Parse(format!("blockhashのBase58デコードに失敗: {e}")))?;

        Ok(RecencyToken {
            blockhash,
            last_valid_block_height: latest.last_valid_block_height,
        })
    }
}
