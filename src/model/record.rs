//! The generic, field-addressable view of a ledger entry that the table engine works on.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single field value of a record.
///
/// Dates are carried as `Text` in `YYYY-MM-DD` (or RFC 3339) form; the engine recognizes them by
/// field name or by shape when it needs calendar semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Text(String),
    Number(Decimal),
    List(Vec<String>),
}

impl Value {
    /// The numeric reading of this value, if it has one. Numeric text counts.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        }
    }

    /// The calendar date reading of this value, if it has one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Text(s) => parse_date(s),
            _ => None,
        }
    }

    /// Returns true for text that starts with a `YYYY-MM-DD` date.
    pub fn looks_like_date(&self) -> bool {
        match self {
            Value::Text(s) => has_date_shape(s),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

/// Parses a calendar date from `YYYY-MM-DD`, a longer string that starts with one (for example
/// `2024-01-05T10:00:00`), or an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if !has_date_shape(s) {
        return None;
    }
    NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d").ok()
}

fn has_date_shape(s: &str) -> bool {
    let b = s.trim().as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// Anything the table engine can search, filter and sort: an identified bag of named fields.
pub trait Fields {
    /// The opaque record identifier.
    fn id(&self) -> &str;

    /// The value of the field called `name`, or `None` when absent or unknown.
    fn field(&self, name: &str) -> Option<Value>;

    /// Copy the named fields into an owned `Record`. Absent fields are left out.
    fn to_record(&self, names: &[&str]) -> Record {
        let fields = names
            .iter()
            .filter_map(|name| self.field(name).map(|v| (name.to_string(), v)))
            .collect();
        Record {
            id: self.id().to_string(),
            fields,
        }
    }
}

/// An owned, untyped record: the opaque id plus a map of field name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Record {
    id: String,
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style setter, mostly useful for constructing records by hand.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl Fields for Record {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}
