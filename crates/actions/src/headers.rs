//! # Actionプロトコル共通ヘッダ
//!
//! 全ルート・全メソッド（成功・エラー・OPTIONSを問わず）に同じヘッダを付与する。
//! ヘッダの組み立ては起動時に一度だけ行い、レスポンスミドルウェアで差し込む。

use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS, CONTENT_TYPE,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;

use crate::config::SolanaCluster;

/// 準拠するActionプロトコルのバージョン
pub const ACTION_VERSION: &str = "2.4";

pub const X_ACTION_VERSION: HeaderName = HeaderName::from_static("x-action-version");
pub const X_BLOCKCHAIN_IDS: HeaderName = HeaderName::from_static("x-blockchain-ids");

/// クラスタに対応する共通ヘッダ一式を構築する。
pub fn action_headers(cluster: SolanaCluster) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(
            "Content-Type, Authorization, Content-Encoding, Accept-Encoding, \
             X-Accept-Action-Version, X-Accept-Blockchain-Ids",
        ),
    );
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("X-Action-Version, X-Blockchain-Ids"),
    );
    headers.insert(X_ACTION_VERSION, HeaderValue::from_static(ACTION_VERSION));
    headers.insert(X_BLOCKCHAIN_IDS, HeaderValue::from_static(cluster.caip2_id()));
    headers
}

/// レスポンスミドルウェア。ハンドラの出力に共通ヘッダを上書きで付与する。
pub async fn apply_action_headers(
    State(headers): State<HeaderMap>,
    mut response: Response,
) -> Response {
    for (name, value) in headers.iter() {
        response.headers_mut().insert(name.clone(), value.clone());
    }
    response
}
