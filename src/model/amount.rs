//! Amount type for handling monetary values with optional currency symbols.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may or may not include an `R$` symbol and Brazilian
//! thousands/decimal separators.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents how amounts were (or should be) formatted.
///
/// # Examples
///  - `AmountFormat{ symbol: true, grouped: true }` -> `-R$ 60.000,00`
///  - `AmountFormat{ symbol: false, grouped: true }` -> `-60.000,00`
///  - `AmountFormat{ symbol: false, grouped: false }` -> `-60000,00`
///  - `AmountFormat{ symbol: true, grouped: false }` -> `-R$ 60000,00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountFormat {
    /// Whether an `R$` symbol is present in the formatting.
    symbol: bool,
    /// Whether dots are present as thousands separators in the formatting.
    grouped: bool,
}

impl Default for AmountFormat {
    fn default() -> Self {
        DEFAULT_FORMAT
    }
}

/// The default format has the currency symbol and grouping: e.g. `-R$ 60.000,00`.
const DEFAULT_FORMAT: AmountFormat = AmountFormat {
    symbol: true,
    grouped: true,
};

/// Represents an amount of money in Brazilian reais.
///
/// This type wraps `Decimal` and provides custom serialization/deserialization
/// to handle amounts that may be formatted with or without the `R$` symbol or
/// grouping separators. Brazilian notation uses `.` for thousands and `,` for
/// decimals; a bare machine-format string such as `1234.56` is also accepted.
///
/// Formatting is considered significant for the purposes of equality, so for
/// numeric comparisons, you should access the `Decimal` value and use that.
///
/// # Examples
///
/// Parsing with the currency symbol:
/// ```
/// # use painel::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-R$ 50,00").unwrap();
/// assert_eq!(amount.to_string(), "-R$ 50,00");
/// ```
///
/// Value equivalency, but not absolute equivalency:
/// ```
/// # use painel::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("-5000,00").unwrap();
/// let b = Amount::from_str("-R$ 5.000,00").unwrap();
/// assert_ne!(a, b);
/// assert_ne!(a.to_string(), b.to_string());
/// assert_eq!(a.value(), b.value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    /// The parsed numerical value.
    value: Decimal,
    /// The way the numerical value was parsed from, or should be written to, a `String`.
    format: AmountFormat,
}

impl Amount {
    /// Creates a new Amount from a Decimal value with default `String` formatting.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: DEFAULT_FORMAT,
        }
    }

    /// Creates a new Amount from a Decimal value with the specified formatting.
    pub const fn new_with_format(value: Decimal, format: AmountFormat) -> Self {
        Self { value, format }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.value().is_sign_negative()
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut symbol = false;

        // Remove whitespace
        let trimmed = s.trim();

        // Handle empty string
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // Remove the currency symbol if present
        let without_symbol = if let Some(after_minus) = trimmed.strip_prefix('-') {
            // Negative number: could be "-R$ 50,00" or "-50,00"
            if let Some(after_symbol) = after_minus.trim_start().strip_prefix("R$") {
                symbol = true;
                format!("-{}", after_symbol.trim_start())
            } else {
                trimmed.to_string()
            }
        } else if let Some(after_symbol) = trimmed.strip_prefix("R$") {
            // Positive number with symbol: "R$ 50,00"
            symbol = true;
            after_symbol.trim_start().to_string()
        } else {
            // No currency symbol
            trimmed.to_string()
        };

        // Separator handling. When a comma or the currency symbol is present,
        // the string is in Brazilian notation: dots group thousands, the comma
        // marks decimals. A bare string with a single dot is machine format.
        let (normalized, grouped) = if without_symbol.contains(',') || symbol {
            let grouped = without_symbol.contains('.');
            (without_symbol.replace('.', "").replace(',', "."), grouped)
        } else if without_symbol.matches('.').count() > 1 {
            (without_symbol.replace('.', ""), true)
        } else {
            (without_symbol.clone(), false)
        };

        // Parse the decimal value
        let value = Decimal::from_str(&normalized).map_err(AmountError)?;
        Ok(Amount {
            value,
            format: AmountFormat { symbol, grouped },
        })
    }
}

/// Swaps `.` and `,` to turn the US-style output of `format_num` into
/// Brazilian notation.
fn swap_separators(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' => ',',
            ',' => '.',
            other => other,
        })
        .collect()
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, num) = if self.is_negative() {
            (String::from("-"), self.value().abs())
        } else {
            (String::new(), self.value())
        };

        let sym = if self.format.symbol {
            String::from("R$ ")
        } else {
            String::new()
        };

        if self.format.grouped {
            let formatted =
                format_num::format_num!(",.2", num.to_f64().unwrap_or_default());
            write!(f, "{sign}{sym}{}", swap_separators(&formatted))
        } else {
            write!(f, "{sign}{sym}{}", num.to_string().replace('.', ","))
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a formatted string
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
