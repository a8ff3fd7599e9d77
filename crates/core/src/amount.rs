//! # SOL金額
//!
//! クエリパラメータで受け取った10進数のSOL金額を lamports に変換する。

use std::fmt;

use solana_sdk::native_token::LAMPORTS_PER_SOL;

use crate::error::VaultError;

/// 命令に載せる lamports 量。表示用のSOL表記は lamports から求める。
///
/// `parse` の結果は常に `lamports > 0`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    lamports: u64,
}

impl Amount {
    /// 10進数文字列をパースする。
    ///
    /// - 数値でない / 有限でない / lamportsに収まらない / 1 lamport未満の端数を持つ → `InvalidParameter`
    /// - 0以下 / 1 lamport未満 → `ParameterTooSmall`
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, VaultError> {
        let sol: f64 = raw
            .trim()
            .parse()
            .map_err(|_| VaultError::InvalidParameter { field })?;

        if !sol.is_finite() {
            return Err(VaultError::InvalidParameter { field });
        }
        if sol <= 0.0 {
            return Err(VaultError::ParameterTooSmall { field });
        }

        let scaled = sol * LAMPORTS_PER_SOL as f64;
        if scaled >= u64::MAX as f64 {
            return Err(VaultError::InvalidParameter { field });
        }
        let rounded = scaled.round();
        if rounded == 0.0 {
            return Err(VaultError::ParameterTooSmall { field });
        }

        // 0.1 * 1e9 のような浮動小数誤差は許容し、実際の端数は拒否する
        let tolerance = (rounded * 4.0 * f64::EPSILON).max(1e-3);
        if (scaled - rounded).abs() > tolerance {
            return Err(VaultError::InvalidParameter { field });
        }

        Ok(Self {
            lamports: rounded as u64,
        })
    }

    /// lamports から直接構築する（0 の検査は呼び出し側で行う）。
    pub fn from_lamports(lamports: u64) -> Self {
        Self { lamports }
    }

    pub fn sol(&self) -> f64 {
        self.lamports as f64 / LAMPORTS_PER_SOL as f64
    }

    pub fn lamports(&self) -> u64 {
        self.lamports
    }
}

/// lamports から正確に求めたSOL表記（末尾の0は省く）
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.lamports / LAMPORTS_PER_SOL;
        let frac = self.lamports % LAMPORTS_PER_SOL;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:09}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_decimals() {
        let amount = Amount::parse("amount", "0.5").unwrap();
        assert_eq!(amount.lamports(), 500_000_000);
        assert_eq!(amount.to_string(), "0.5");

        let amount = Amount::parse("amount", "2").unwrap();
        assert_eq!(amount.lamports(), 2_000_000_000);
        assert_eq!(amount.to_string(), "2");

        // 浮動小数誤差が丸められること
        let amount = Amount::parse("amount", "0.1").unwrap();
        assert_eq!(amount.lamports(), 100_000_000);

        let amount = Amount::parse("amount", " 1e-3 ").unwrap();
        assert_eq!(amount.lamports(), 1_000_000);

        let amount = Amount::parse("amount", "0.000000001").unwrap();
        assert_eq!(amount.lamports(), 1);
    }

    #[test]
    fn test_parse_rejects_zero_and_negative() {
        for raw in ["0", "0.0", "-0", "-1", "-0.5"] {
            assert_eq!(
                Amount::parse("amount", raw),
                Err(VaultError::ParameterTooSmall { field: "amount" }),
                "raw={raw}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_below_one_lamport() {
        assert_eq!(
            Amount::parse("amount", "0.0000000001"),
            Err(VaultError::ParameterTooSmall { field: "amount" })
        );
    }

    /// 1 lamport未満の端数は丸めずに拒否し、表示は命令の lamports と一致する
    #[test]
    fn test_parse_rejects_sub_lamport_precision() {
        for raw in ["0.0000000015", "1.0000000005", "2.5e-9"] {
            assert_eq!(
                Amount::parse("amount", raw),
                Err(VaultError::InvalidParameter { field: "amount" }),
                "raw={raw}"
            );
        }

        let amount = Amount::parse("amount", "1.000000001").unwrap();
        assert_eq!(amount.lamports(), 1_000_000_001);
        assert_eq!(amount.to_string(), "1.000000001");
    }

    #[test]
    fn test_display_uses_lamports() {
        assert_eq!(Amount::from_lamports(1).to_string(), "0.000000001");
        assert_eq!(Amount::from_lamports(12_300_000_000).to_string(), "12.3");
        assert_eq!(Amount::parse("amount", "0.10").unwrap().to_string(), "0.1");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for raw in ["abc", "", "1.2.3", "NaN", "inf", "-inf", "0x10", "1e30"] {
            assert_eq!(
                Amount::parse("amount", raw),
                Err(VaultError::InvalidParameter { field: "amount" }),
                "raw={raw}"
            );
        }
    }

    #[test]
    fn test_from_lamports() {
        let amount = Amount::from_lamports(250_000_000);
        assert_eq!(amount.sol(), 0.25);
        assert_eq!(amount.to_string(), "0.25");
    }

    #[test]
    fn test_error_message_names_field() {
        let err = Amount::parse("amount", "-1").unwrap_err();
        assert!(err.to_string().contains("amount"));
        let err = Amount::parse("amount", "xyz").unwrap_err();
        assert!(err.to_string().contains("amount"));
    }
}
