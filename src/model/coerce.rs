//! Field deserializers that never reject a ledger entry.
//!
//! A `null` or oddly typed value in one field must not keep the rest of the ledger from loading,
//! so these read any JSON value and fall back to an empty value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Text, or an empty string for `null`. Numbers and booleans keep their text form.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            warn!("Ignoring non-text value {other}");
            String::new()
        }
    })
}

/// A list of strings. `null` is empty and a lone string becomes a one-item list. Items that are
/// not text are dropped.
pub(crate) fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::String(s) if s.is_empty() => Vec::new(),
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Null => None,
                other => {
                    warn!("Ignoring non-text list item {other}");
                    None
                }
            })
            .collect(),
        other => {
            warn!("Ignoring non-list value {other}");
            Vec::new()
        }
    })
}

/// Any list, with `null` read as empty.
pub(crate) fn or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn flag_or(value: Value, fallback: bool) -> bool {
    match value {
        Value::Null => fallback,
        Value::Bool(b) => b,
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => true,
            "false" | "no" | "0" => false,
            _ => {
                warn!("Ignoring non-boolean value '{s}'");
                fallback
            }
        },
        other => {
            warn!("Ignoring non-boolean value {other}");
            fallback
        }
    }
}

/// A boolean that reads `null` and unrecognized values as `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flag_or(Value::deserialize(deserializer)?, false))
}

/// A boolean that reads `null` and unrecognized values as `true`.
pub(crate) fn flag_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flag_or(Value::deserialize(deserializer)?, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "text")]
        name: String,
        #[serde(default, deserialize_with = "text_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "flag")]
        full: bool,
        #[serde(default = "yes", deserialize_with = "flag_or_true")]
        active: bool,
    }

    fn yes() -> bool {
        true
    }

    fn holder(json: &str) -> Holder {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_nulls_become_empty() {
        let h = holder(r#"{"name": null, "tags": null, "full": null, "active": null}"#);
        assert_eq!(h.name, "");
        assert!(h.tags.is_empty());
        assert!(!h.full);
        assert!(h.active);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let h = holder("{}");
        assert_eq!(h.name, "");
        assert!(h.tags.is_empty());
        assert!(!h.full);
        assert!(h.active);
    }

    #[test]
    fn test_odd_types() {
        let h = holder(r#"{"name": 42, "tags": "solo", "full": "yes", "active": "no"}"#);
        assert_eq!(h.name, "42");
        assert_eq!(h.tags, vec!["solo".to_string()]);
        assert!(h.full);
        assert!(!h.active);

        let h = holder(r#"{"name": {"x": 1}, "tags": ["a", null, 7, {}], "full": [1]}"#);
        assert_eq!(h.name, "");
        assert_eq!(h.tags, vec!["a".to_string(), "7".to_string()]);
        assert!(!h.full);
    }
}
