//! # Vault操作
//!
//! デプロイ済みVaultプログラムが受け付ける4つの命令を表す。

use std::fmt;
use std::str::FromStr;

use crate::amount::Amount;
use crate::error::VaultError;

/// 操作の種別（ペイロードなし）。ルーティングとメタデータ選択に使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Initialize,
    Deposit,
    Withdraw,
    Close,
}

impl OperationKind {
    /// 全操作（ディスカバリでの表示順）
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Initialize,
        OperationKind::Deposit,
        OperationKind::Withdraw,
        OperationKind::Close,
    ];

    /// ルートのパス要素であり、Anchor命令名でもある。
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Initialize => "initialize",
            OperationKind::Deposit => "deposit",
            OperationKind::Withdraw => "withdraw",
            OperationKind::Close => "close",
        }
    }

    /// `amount` クエリパラメータを必要とするか。
    pub fn takes_amount(&self) -> bool {
        matches!(self, OperationKind::Deposit | OperationKind::Withdraw)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| VaultError::UnknownOperation(s.to_string()))
    }
}

/// 検証済みの操作リクエスト。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VaultOperation {
    /// state / vault アカウントを作成する
    Initialize,
    /// 所有者から vault へ送金する
    Deposit(Amount),
    /// vault から所有者へ送金する（残高チェックはオンチェーンで行われる）
    Withdraw(Amount),
    /// state / vault アカウントを閉じる
    Close,
}

impl VaultOperation {
    /// 種別と（必要なら）金額から操作を組み立てる。
    ///
    /// deposit / withdraw で金額が無い場合は `MissingParameter`。
    /// initialize / close に渡された金額は無視する。
    pub fn new(kind: OperationKind, amount: Option<Amount>) -> Result<Self, VaultError> {
        let missing = || VaultError::MissingParameter { field: "amount" };
        Ok(match kind {
            OperationKind::Initialize => VaultOperation::Initialize,
            OperationKind::Deposit => VaultOperation::Deposit(amount.ok_or_else(missing)?),
            OperationKind::Withdraw => VaultOperation::Withdraw(amount.ok_or_else(missing)?),
            OperationKind::Close => VaultOperation::Close,
        })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            VaultOperation::Initialize => OperationKind::Initialize,
            VaultOperation::Deposit(_) => OperationKind::Deposit,
            VaultOperation::Withdraw(_) => OperationKind::Withdraw,
            VaultOperation::Close => OperationKind::Close,
        }
    }

    pub fn amount(&self) -> Option<Amount> {
        match self {
            VaultOperation::Deposit(amount) | VaultOperation::Withdraw(amount) => Some(*amount),
            VaultOperation::Initialize | VaultOperation::Close => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip_through_str() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.as_str().parse::<OperationKind>().unwrap(), kind);
        }
        assert_eq!(
            "vault".parse::<OperationKind>(),
            Err(VaultError::UnknownOperation("vault".to_string()))
        );
    }

    #[test]
    fn test_takes_amount() {
        assert!(!OperationKind::Initialize.takes_amount());
        assert!(OperationKind::Deposit.takes_amount());
        assert!(OperationKind::Withdraw.takes_amount());
        assert!(!OperationKind::Close.takes_amount());
    }

    #[test]
    fn test_new_requires_amount_for_transfers() {
        assert_eq!(
            VaultOperation::new(OperationKind::Withdraw, None),
            Err(VaultError::MissingParameter { field: "amount" })
        );

        let amount = Amount::parse("amount", "1.5").unwrap();
        let op = VaultOperation::new(OperationKind::Deposit, Some(amount)).unwrap();
        assert_eq!(op.kind(), OperationKind::Deposit);
        assert_eq!(op.amount(), Some(amount));
    }

    #[test]
    fn test_new_ignores_amount_for_initialize_and_close() {
        let amount = Amount::parse("amount", "1").unwrap();
        assert_eq!(
            VaultOperation::new(OperationKind::Close, Some(amount)).unwrap(),
            VaultOperation::Close
        );
        assert_eq!(
            VaultOperation::new(OperationKind::Initialize, None).unwrap(),
            VaultOperation::Initialize
        );
    }
}
