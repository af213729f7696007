//! Amount type for handling monetary values and quantities that arrive from untyped JSON.
//!
//! Ledger files are produced by a JSON API in which amounts may be numbers or numeric strings
//! (sometimes with a dollar sign and thousands separators). This module parses them once, at the
//! boundary, so the rest of the crate only ever sees a `Decimal`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a monetary value or a numeric quantity such as a fuel volume or an odometer reading.
///
/// # Examples
///
/// ```
/// # use vehicle_ledger::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("$1,250.50").unwrap();
/// let b = Amount::from_str("1250.5").unwrap();
/// assert_eq!(a.value(), b.value());
/// assert_eq!(a.to_string(), "1,250.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }
}

/// An error that can occur when parsing strings into `Amount` values.
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
        let trimmed = s.trim();

        // "-$50.00" and "$50.00" are both accepted
        let without_dollar = if let Some(after_minus) = trimmed.strip_prefix('-') {
            match after_minus.strip_prefix('$') {
                Some(after_dollar) => format!("-{after_dollar}"),
                None => trimmed.to_string(),
            }
        } else if let Some(after_dollar) = trimmed.strip_prefix('$') {
            after_dollar.to_string()
        } else {
            trimmed.to_string()
        };

        let cleaned = without_dollar.replace(',', "");
        let value = Decimal::from_str(&cleaned)
            .or_else(|e| Decimal::from_scientific(&cleaned).map_err(|_| e))
            .map_err(AmountError)?;
        Ok(Amount::new(value.normalize()))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format_num::format_num!(",.2", self.value.to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Plain decimal string so that the value survives a round trip without precision loss
        serializer.serialize_str(&self.value.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw {
            serde_json::Value::Number(n) => {
                Amount::from_str(&n.to_string()).map_err(serde::de::Error::custom)
            }
            serde_json::Value::String(s) => Amount::from_str(&s).map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or a numeric string, found {other}"
            ))),
        }
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

/// Serde adapter for optional amount fields on ledger records.
///
/// A value that cannot be read as a number becomes `None` instead of failing the whole ledger,
/// which keeps the record in its table while excluding it from numeric aggregation.
pub(crate) mod lenient {
    use super::Amount;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::warn;

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let text = match raw {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) if s.trim().is_empty() => return Ok(None),
            serde_json::Value::String(s) => s,
            other => {
                warn!("Ignoring non-numeric amount {other}");
                return Ok(None);
            }
        };
        match Amount::from_str(&text) {
            Ok(amount) => Ok(Some(amount)),
            Err(e) => {
                warn!("Ignoring non-numeric amount '{text}': {e}");
                Ok(None)
            }
        }
    }

    pub(crate) fn serialize<S>(value: &Option<Amount>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }
}
