//! # GET /actions.json
//!
//! ウェブサイトのパスをActions APIに対応付けるルールファイル。

use axum::Json;
use svault_types::{ActionRule, ActionsJson};

use crate::metadata::ACTIONS_BASE_PATH;

pub async fn handle_actions_json() -> Json<ActionsJson> {
    Json(ActionsJson {
        rules: vec![
            ActionRule {
                path_pattern: "/*".to_string(),
                api_path: format!("{ACTIONS_BASE_PATH}/*"),
            },
            // APIパス自体もそのまま解決できるようにする
            ActionRule {
                path_pattern: format!("{ACTIONS_BASE_PATH}/**"),
                api_path: format!("{ACTIONS_BASE_PATH}/**"),
            },
        ],
    })
}
