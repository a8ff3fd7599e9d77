//! # Svault 共有型定義
//!
//! Solana Actions（Blinks）プロトコルでやり取りされるJSON構造をRust構造体として提供する。
//!
//! ## エンコーディング規則
//! - フィールド名: camelCase（`lastValidBlockHeight`, `pathPattern` 等、プロトコルの表記に従う）
//! - Base58: Solanaアドレス、公開鍵、Blockhash
//! - Base64: シリアライズ済みトランザクション

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GET レスポンス（ディスカバリ）
// ---------------------------------------------------------------------------

/// GETレスポンスの種別。常に `"action"`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Action,
}

/// GET /api/actions/* のレスポンス。
///
/// ウォレットはこの内容からボタン（`links.actions`）と入力欄（`parameters`）を描画する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionGetResponse {
    #[serde(rename = "type")]
    pub kind: ActionType,
    /// 表示タイトル
    pub title: String,
    /// アイコン画像の絶対URL
    pub icon: String,
    /// 説明文
    pub description: String,
    /// `links` が無い場合に使われる既定ボタンのラベル
    pub label: String,
    /// trueの場合、ウォレットはボタンを無効化して表示する
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ActionLinks>,
}

/// 関連アクションの一覧。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

/// 関連アクションの種別。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkedActionType {
    /// POSTでトランザクションを受け取るアクション
    Transaction,
}

/// ボタン1つ分のアクション定義。
///
/// `href` 内の `{name}` プレースホルダは `parameters` の `name` と一致している必要がある。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedAction {
    #[serde(rename = "type")]
    pub kind: LinkedActionType,
    /// POST先の絶対URL（プレースホルダを含み得る）
    pub href: String,
    /// ボタンのラベル
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
}

/// 入力パラメータの型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionParameterType {
    Number,
}

/// ウォレットが利用者に入力させるパラメータ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionParameter {
    #[serde(rename = "type")]
    pub kind: ActionParameterType,
    /// `href` のプレースホルダ名
    pub name: String,
    /// 入力欄のラベル
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

// ---------------------------------------------------------------------------
// POST リクエスト / レスポンス
// ---------------------------------------------------------------------------

/// POST /api/actions/* のリクエストボディ。
///
/// `account` の有無・形式の検証はサーバー側で行うため、ここでは `Option` で受ける。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionPostRequest {
    /// Base58エンコードされた署名者（fee payer）の公開鍵
    #[serde(default)]
    pub account: Option<String>,
}

/// POSTレスポンスの種別。常に `"transaction"`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPostType {
    Transaction,
}

/// POST /api/actions/* のレスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPostResponse {
    #[serde(rename = "type")]
    pub kind: ActionPostType,
    /// Base64エンコードされた未署名トランザクション（Solanaワイヤーフォーマット）
    pub transaction: String,
    /// 利用者に表示する確認メッセージ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 全エンドポイント共通のエラーボディ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionErrorBody {
    pub message: String,
}

// ---------------------------------------------------------------------------
// actions.json
// ---------------------------------------------------------------------------

/// `/actions.json` のルール1件。Webサイトのパスを Action API のパスへ対応付ける。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    pub path_pattern: String,
    pub api_path: String,
}

/// `/actions.json` のレスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsJson {
    pub rules: Vec<ActionRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_response_field_names() {
        let payload = ActionGetResponse {
            kind: ActionType::Action,
            title: "t".to_string(),
            icon: "https://example.com/logo.png".to_string(),
            description: "d".to_string(),
            label: "l".to_string(),
            disabled: None,
            links: Some(ActionLinks {
                actions: vec![LinkedAction {
                    kind: LinkedActionType::Transaction,
                    href: "https://example.com/api/actions/deposit?amount={amount}".to_string(),
                    label: "Deposit".to_string(),
                    parameters: vec![ActionParameter {
                        kind: ActionParameterType::Number,
                        name: "amount".to_string(),
                        label: "Amount".to_string(),
                        required: Some(true),
                    }],
                }],
            }),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "action");
        assert!(value.get("disabled").is_none());
        let link = &value["links"]["actions"][0];
        assert_eq!(link["type"], "transaction");
        assert_eq!(link["parameters"][0]["type"], "number");
        assert_eq!(link["parameters"][0]["required"], true);
    }

    #[test]
    fn test_link_without_parameters_omits_field() {
        let link = LinkedAction {
            kind: LinkedActionType::Transaction,
            href: "https://example.com/api/actions/close".to_string(),
            label: "Close Vault".to_string(),
            parameters: vec![],
        };
        let value = serde_json::to_value(&link).unwrap();
        assert!(value.get("parameters").is_none());
    }

    #[test]
    fn test_post_request_account_is_optional() {
        let req: ActionPostRequest = serde_json::from_str("{}").unwrap();
        assert!(req.account.is_none());

        let req: ActionPostRequest =
            serde_json::from_str(r#"{"account":"11111111111111111111111111111111"}"#).unwrap();
        assert_eq!(req.account.as_deref(), Some("11111111111111111111111111111111"));
    }

    #[test]
    fn test_actions_json_camel_case() {
        let rules = ActionsJson {
            rules: vec![ActionRule {
                path_pattern: "/*".to_string(),
                api_path: "/api/actions/*".to_string(),
            }],
        };
        let value = serde_json::to_value(&rules).unwrap();
        assert_eq!(value["rules"][0]["pathPattern"], "/*");
        assert_eq!(value["rules"][0]["apiPath"], "/api/actions/*");
    }
}
