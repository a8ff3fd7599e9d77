//! # Actions設定・共有状態
//!
//! 環境変数からの設定読み込みとActionsサーバーの共有状態の定義。
//! 共有状態は起動時に一度だけ構築し、以後は読み取り専用。

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use svault_core::{VaultProgram, DEFAULT_PROGRAM_ID};

use crate::rpc::{BlockhashProvider, RpcBlockhashProvider};

/// 対象のSolanaクラスタ。`X-Blockchain-Ids` ヘッダと既定のRPC URLを決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolanaCluster {
    MainnetBeta,
    Devnet,
    Testnet,
}

impl SolanaCluster {
    /// CAIP-2 チェーンID
    pub fn caip2_id(&self) -> &'static str {
        match self {
            SolanaCluster::MainnetBeta => "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
            SolanaCluster::Devnet => "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1",
            SolanaCluster::Testnet => "solana:4uhcVJyU9pJkvQyS88uRDiswHXSCkY3z",
        }
    }

    /// 公開RPCエンドポイント
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            SolanaCluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            SolanaCluster::Devnet => "https://api.devnet.solana.com",
            SolanaCluster::Testnet => "https://api.testnet.solana.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolanaCluster::MainnetBeta => "mainnet-beta",
            SolanaCluster::Devnet => "devnet",
            SolanaCluster::Testnet => "testnet",
        }
    }
}

impl fmt::Display for SolanaCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolanaCluster {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(SolanaCluster::MainnetBeta),
            "devnet" => Ok(SolanaCluster::Devnet),
            "testnet" => Ok(SolanaCluster::Testnet),
            other => Err(anyhow::anyhow!(
                "SOLANA_CLUSTERは mainnet-beta / devnet / testnet のいずれかである必要があります: {other}"
            )),
        }
    }
}

/// 環境変数から読み込む起動設定。
#[derive(Debug, Clone)]
pub struct ActionsConfig {
    /// 待ち受けアドレス（`BIND_ADDR`）
    pub bind_addr: String,
    /// 対象クラスタ（`SOLANA_CLUSTER`）
    pub cluster: SolanaCluster,
    /// JSON-RPCエンドポイント（`SOLANA_RPC_URL`、未設定ならクラスタの公開RPC）
    pub rpc_url: String,
    /// VaultプログラムID（`VAULT_PROGRAM_ID`）
    pub program_id: Pubkey,
    /// hrefの生成に使うオリジン（`PUBLIC_ORIGIN`）。
    /// Noneの場合はリクエストのHost / X-Forwarded-* ヘッダから決める。
    pub public_origin: Option<String>,
    /// アイコンのパスまたは絶対URL（`ICON_PATH`）
    pub icon_path: String,
}

impl ActionsConfig {
    /// 環境変数から構築する。
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let cluster: SolanaCluster = std::env::var("SOLANA_CLUSTER")
            .unwrap_or_else(|_| "devnet".to_string())
            .parse()?;

        let rpc_url = std::env::var("SOLANA_RPC_URL")
            .unwrap_or_else(|_| cluster.default_rpc_url().to_string());

        let program_id = match std::env::var("VAULT_PROGRAM_ID") {
            Ok(s) => Pubkey::from_str(s.trim()).map_err(|e| {
                anyhow::anyhow!("VAULT_PROGRAM_IDのBase58デコードに失敗: {e}")
            })?,
            Err(_) => DEFAULT_PROGRAM_ID,
        };

        let public_origin = std::env::var("PUBLIC_ORIGIN")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let icon_path = std::env::var("ICON_PATH").unwrap_or_else(|_| "/logo.png".to_string());

        Ok(Self {
            bind_addr,
            cluster,
            rpc_url,
            program_id,
            public_origin,
            icon_path,
        })
    }
}

/// Actionsサーバーの共有状態。
pub struct ActionsState {
    /// Vaultプログラムインターフェース
    pub program: VaultProgram,
    /// 最新Blockhashの取得元（トレイトで抽象化）
    pub blockhash_provider: Arc<dyn BlockhashProvider>,
    /// 対象クラスタ
    pub cluster: SolanaCluster,
    /// hrefの生成に使うオリジン（固定する場合）
    pub public_origin: Option<String>,
    /// アイコンのパスまたは絶対URL
    pub icon_path: String,
}

impl ActionsState {
    /// 設定から構築する。RPCクライアントは全リクエストで共有する。
    pub fn from_config(config: &ActionsConfig, http_client: reqwest::Client) -> Self {
        Self {
            program: VaultProgram::new(config.program_id),
            blockhash_provider: Arc::new(RpcBlockhashProvider::new(
                http_client,
                config.rpc_url.clone(),
            )),
            cluster: config.cluster,
            public_origin: config.public_origin.clone(),
            icon_path: config.icon_path.clone(),
        }
    }
}
