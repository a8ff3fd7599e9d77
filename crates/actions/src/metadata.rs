//! # Actionメタデータ
//!
//! GETで返す発見用ペイロードと、POST成功時の確認メッセージのテンプレート。
//! テンプレートは固定で、リクエストごとに変わるのはオリジンだけ。

use svault_core::{OperationKind, VaultOperation};
use svault_types::{
    ActionGetResponse, ActionLinks, ActionParameter, ActionParameterType, ActionType,
    LinkedAction, LinkedActionType,
};

/// Actions APIのベースパス
pub const ACTIONS_BASE_PATH: &str = "/api/actions";

// ---------------------------------------------------------------------------
// テンプレート
// ---------------------------------------------------------------------------

fn title(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Initialize => "Svault - Initialize Vault",
        OperationKind::Deposit => "Svault - Deposit SOL",
        OperationKind::Withdraw => "Svault - Withdraw SOL",
        OperationKind::Close => "Svault - Close Vault",
    }
}

fn button_label(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Initialize => "Initialize Vault",
        OperationKind::Deposit => "Deposit SOL",
        OperationKind::Withdraw => "Withdraw SOL",
        OperationKind::Close => "Close Vault",
    }
}

fn amount_label(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Withdraw => "Amount to Withdraw",
        _ => "Amount to Deposit",
    }
}

/// 4ステップの説明文。`current` の行に "(here)" を付ける。
fn description(current: Option<OperationKind>) -> String {
    let steps = [
        (OperationKind::Initialize, "Create a Vault"),
        (OperationKind::Deposit, "Deposit into the Vault"),
        (OperationKind::Withdraw, "Withdraw from the Vault"),
        (OperationKind::Close, "Close the Vault"),
    ];

    let mut text = String::from("A Vault to store Native SOLs:");
    for (i, (kind, step)) in steps.iter().enumerate() {
        text.push_str(&format!("\n{}. {step}", i + 1));
        if current == Some(*kind) {
            text.push_str(" (here)");
        }
    }
    text
}

// ---------------------------------------------------------------------------
// URL
// ---------------------------------------------------------------------------

/// アイコンの絶対URL。設定値が絶対URLならそのまま使う。
pub fn icon_url(origin: &str, icon_path: &str) -> String {
    if icon_path.starts_with("http://") || icon_path.starts_with("https://") {
        return icon_path.to_string();
    }
    let path = icon_path.trim_start_matches('/');
    format!("{origin}/{path}")
}

/// 操作のPOST先。金額を取る操作は `{amount}` プレースホルダを埋め込む。
pub fn action_href(origin: &str, kind: OperationKind) -> String {
    let base = format!("{origin}{ACTIONS_BASE_PATH}/{}", kind.as_str());
    if kind.takes_amount() {
        format!("{base}?amount={{amount}}")
    } else {
        base
    }
}

fn linked_action(origin: &str, kind: OperationKind) -> LinkedAction {
    let parameters = if kind.takes_amount() {
        vec![ActionParameter {
            kind: ActionParameterType::Number,
            name: "amount".to_string(),
            label: amount_label(kind).to_string(),
            required: Some(true),
        }]
    } else {
        Vec::new()
    };

    LinkedAction {
        kind: LinkedActionType::Transaction,
        href: action_href(origin, kind),
        label: button_label(kind).to_string(),
        parameters,
    }
}

// ---------------------------------------------------------------------------
// ペイロード
// ---------------------------------------------------------------------------

/// 単一操作ルートの発見用ペイロード。
pub fn operation_metadata(kind: OperationKind, origin: &str, icon_path: &str) -> ActionGetResponse {
    ActionGetResponse {
        kind: ActionType::Action,
        title: title(kind).to_string(),
        icon: icon_url(origin, icon_path),
        description: description(Some(kind)),
        label: title(kind).to_string(),
        disabled: None,
        links: Some(ActionLinks {
            actions: vec![linked_action(origin, kind)],
        }),
    }
}

/// 4操作すべてへのリンクを持つ発見用ペイロード。
pub fn vault_metadata(origin: &str, icon_path: &str) -> ActionGetResponse {
    ActionGetResponse {
        kind: ActionType::Action,
        title: "Svault - The SOL Vault".to_string(),
        icon: icon_url(origin, icon_path),
        description: description(None),
        label: "Vault Actions".to_string(),
        disabled: None,
        links: Some(ActionLinks {
            actions: OperationKind::ALL
                .iter()
                .map(|kind| linked_action(origin, *kind))
                .collect(),
        }),
    }
}

/// POST成功時にウォレットへ表示する確認メッセージ。
pub fn confirmation_message(operation: &VaultOperation) -> String {
    match operation {
        VaultOperation::Initialize => "Vault Initialized".to_string(),
        VaultOperation::Deposit(amount) => format!("Deposited {amount} SOL into the Vault"),
        VaultOperation::Withdraw(amount) => format!("Withdrew {amount} SOL from the Vault"),
        VaultOperation::Close => "Vault Closed".to_string(),
    }
}
