//! Currency formatting of loss values.

use std::fmt;

/// Where the currency symbol is placed relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolPosition {
    /// `$12.50`
    #[default]
    Prefix,
    /// `12.50 €`
    Suffix,
}

/// Fixed-decimal currency format for displaying a loss.
///
/// # Example
///
/// ```rust
/// use taguchi_loss::format::CurrencyFormat;
///
/// assert_eq!(CurrencyFormat::default().format(12.5), "$12.50");
/// assert_eq!(CurrencyFormat::suffix("€", 1).format(3.14159), "3.1 €");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyFormat {
    /// Currency symbol.
    pub symbol: String,
    /// Digits after the decimal point.
    pub decimals: usize,
    /// Placement of the symbol.
    pub position: SymbolPosition,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::prefix("$", 2)
    }
}

impl CurrencyFormat {
    /// Symbol written before the amount.
    #[must_use]
    pub fn prefix(symbol: impl Into<String>, decimals: usize) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            position: SymbolPosition::Prefix,
        }
    }

    /// Symbol written after the amount, separated by a space.
    #[must_use]
    pub fn suffix(symbol: impl Into<String>, decimals: usize) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            position: SymbolPosition::Suffix,
        }
    }

    /// Format an amount.
    #[must_use]
    pub fn format(&self, amount: f64) -> String {
        Amount {
            format: self,
            amount,
        }
        .to_string()
    }
}

struct Amount<'a> {
    format: &'a CurrencyFormat,
    amount: f64,
}

impl fmt::Display for Amount<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = self.format.decimals;
        let mut digits = format!("{:.decimals$}", self.amount);
        // -0.001 rounds to "-0.00"
        if digits.starts_with('-') && digits[1..].chars().all(|c| c == '0' || c == '.') {
            digits.remove(0);
        }

        match self.format.position {
            SymbolPosition::Prefix => write!(f, "{}{}", self.format.symbol, digits),
            SymbolPosition::Suffix => write!(f, "{} {}", digits, self.format.symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dollars() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format(0.0), "$0.00");
        assert_eq!(format.format(25.0), "$25.00");
        assert_eq!(format.format(1234.567), "$1234.57");
    }

    #[test]
    fn test_negative_zero() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format(-0.0), "$0.00");
        assert_eq!(format.format(-0.004), "$0.00");
        assert_eq!(format.format(-1.5), "$-1.50");
    }

    #[test]
    fn test_suffix_and_precision() {
        assert_eq!(CurrencyFormat::suffix("EUR", 0).format(99.6), "100 EUR");
        assert_eq!(CurrencyFormat::prefix("£", 3).format(0.1), "£0.100");
    }
}
