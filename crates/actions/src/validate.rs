//! # リクエスト検証
//!
//! クエリパラメータ・リクエストボディを検証し、型付きの値に変換する。
//! ここでの失敗はすべてネットワークアクセスより前に検出され、そのまま利用者に表示してよい。

use axum::http::header::HOST;
use axum::http::HeaderMap;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use svault_core::{parse_pubkey, Amount, OperationKind, VaultOperation};
use svault_types::ActionPostRequest;

use crate::error::ActionError;

/// POST /api/actions/{action} のクエリパラメータ。
///
/// 値は文字列のまま受け取り、数値としての検証は `validate_operation` で行う。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionQuery {
    pub amount: Option<String>,
}

/// 操作種別とクエリから検証済みの操作を組み立てる。
///
/// 金額を取る操作では、欠落（空文字を含む）→ `MissingParameter`、
/// 数値でない → `InvalidParameter`、0以下 → `ParameterTooSmall`。
pub fn validate_operation(
    kind: OperationKind,
    query: &ActionQuery,
) -> Result<VaultOperation, ActionError> {
    if !kind.takes_amount() {
        return Ok(VaultOperation::new(kind, None)?);
    }

    let raw = query
        .amount
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ActionError::MissingParameter("amount"))?;

    let amount = Amount::parse("amount", raw)?;
    Ok(VaultOperation::new(kind, Some(amount))?)
}

/// POSTボディ `{"account": "<base58>"}` から所有者の公開鍵を取り出す。
///
/// JSONオブジェクトでない → `InvalidBody`、`account` が無い / null → `MissingField`、
/// 文字列でない・Base58として不正 → `InvalidKeyFormat`。
pub fn validate_account(body: &[u8]) -> Result<Pubkey, ActionError> {
    // 配列もstructとしてデシリアライズできてしまうため、先にオブジェクトであることを確認する
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ActionError::InvalidBody)?;
    if !value.is_object() {
        return Err(ActionError::InvalidBody);
    }

    let request: ActionPostRequest =
        serde_json::from_value(value).map_err(|_| ActionError::InvalidKeyFormat("account"))?;
    let raw = request
        .account
        .ok_or(ActionError::MissingField("account"))?;
    Ok(parse_pubkey("account", &raw)?)
}

/// hrefの生成に使うオリジンを決める。
///
/// 固定オリジンが設定されていればそれを使い、無ければ
/// `X-Forwarded-Proto` / `X-Forwarded-Host` / `Host` から組み立てる。
pub fn request_origin(public_origin: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(origin) = public_origin {
        return origin.to_string();
    }

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            // プロキシが複数段ある場合は先頭の値がクライアント側
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let host = header("x-forwarded-host")
        .or_else(|| header(HOST.as_str()))
        .unwrap_or_else(|| "localhost".to_string());
    let proto = header("x-forwarded-proto").unwrap_or_else(|| {
        if host.starts_with("localhost") || host.starts_with("127.0.0.1") {
            "http".to_string()
        } else {
            "https".to_string()
        }
    });

    format!("{proto}://{host}")
}
