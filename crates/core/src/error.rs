//! # Core エラー型
//!
//! エラーメッセージはウォレット上でそのまま利用者に表示され得るため、
//! 内部情報を含まない英語の文言とする。

/// Coreモジュールのエラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaultError {
    /// 公開鍵のBase58デコードに失敗
    #[error("Invalid \"{field}\" provided")]
    InvalidKeyFormat {
        /// 入力元のフィールド名
        field: &'static str,
    },
    /// 必須のクエリパラメータが無い
    #[error("Missing required query parameter: {field}")]
    MissingParameter { field: &'static str },
    /// 数値として解釈できない、または表現可能な範囲外
    #[error("Invalid input query parameter: {field}")]
    InvalidParameter { field: &'static str },
    /// 0以下、または1 lamport未満
    #[error("{field} is too small")]
    ParameterTooSmall { field: &'static str },
    /// 未知の操作名
    #[error("Unknown action: {0}")]
    UnknownOperation(String),
    /// 命令データのデコードに失敗
    #[error("Invalid vault instruction: {0}")]
    InvalidInstruction(String),
    /// トランザクションのエンコード・デコードに失敗
    #[error("Transaction encoding failed: {0}")]
    Encoding(String),
}
