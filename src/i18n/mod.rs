//! Display labels for column headers, vocabulary values and user-facing notices.
//!
//! The dictionaries are nested JSON objects compiled into the binary. A label is addressed by a dot
//! path such as `fuel_types.diesel` or `columns.fuel.date`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::sync::OnceLock;
use tracing::error;

const EN: &str = include_str!("en.json");
const ZH: &str = include_str!("zh.json");

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

serde_plain::derive_display_from_serialize!(Locale);
serde_plain::derive_fromstr_from_deserialize!(Locale);

impl Locale {
    fn dictionary(self) -> &'static Value {
        static EN_DICT: OnceLock<Value> = OnceLock::new();
        static ZH_DICT: OnceLock<Value> = OnceLock::new();
        match self {
            Locale::En => EN_DICT.get_or_init(|| parse(self, EN)),
            Locale::Zh => ZH_DICT.get_or_init(|| parse(self, ZH)),
        }
    }
}

fn parse(locale: Locale, text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        error!("The {locale} label dictionary is not valid JSON: {e}");
        Value::Null
    })
}

/// Follows the dot-separated `path` through nested objects in `dict`. Resolves only when the path
/// ends at a string.
pub fn lookup<'a>(path: &str, dict: &'a Value) -> Option<&'a str> {
    path.split('.')
        .try_fold(dict, |node, segment| node.get(segment))
        .and_then(Value::as_str)
}

/// The first of `paths` that resolves in `dict`.
pub fn lookup_first<'a, S: AsRef<str>>(paths: &[S], dict: &'a Value) -> Option<&'a str> {
    paths.iter().find_map(|p| lookup(p.as_ref(), dict))
}

/// Label lookup for one locale, falling back to English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Labels {
    locale: Locale,
}

impl Labels {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The label for `key` in this locale, else in English.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        lookup(key, self.locale.dictionary()).or_else(|| lookup(key, Locale::En.dictionary()))
    }

    /// Like `get`, trying each candidate key in order.
    pub fn get_first<S: AsRef<str>>(&self, keys: &[S]) -> Option<&'static str> {
        lookup_first(keys, self.locale.dictionary())
            .or_else(|| lookup_first(keys, Locale::En.dictionary()))
    }

    /// The header for `field` in a `kind` table. Kind-specific names win over the shared ones in
    /// `columns.common`; a field with neither is shown by its own name.
    pub fn column(&self, kind: impl Display, field: &str) -> String {
        let keys = [format!("columns.{kind}.{field}"), format!("columns.common.{field}")];
        self.get_first(&keys).unwrap_or(field).to_string()
    }

    /// The label for `key`, or `key` itself when no dictionary has it.
    pub fn t(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }

    /// Like `t`, replacing each `{name}` placeholder with its value.
    pub fn t_with(&self, key: &str, args: &[(&str, &dyn Display)]) -> String {
        args.iter().fold(self.t(key), |s, (name, value)| {
            s.replace(&format!("{{{name}}}"), &value.to_string())
        })
    }

    pub fn yes_no(&self, value: bool) -> String {
        self.t(if value { "common.yes" } else { "common.no" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_lookup_dot_path() {
        let dict = json!({"a": {"b": {"c": "deep"}, "n": 5}, "top": "level"});
        assert_eq!(lookup("a.b.c", &dict), Some("deep"));
        assert_eq!(lookup("top", &dict), Some("level"));
        assert_eq!(lookup("a.b", &dict), None);
        assert_eq!(lookup("a.n", &dict), None);
        assert_eq!(lookup("a.x.c", &dict), None);
    }

    #[test]
    fn test_lookup_first_takes_first_hit() {
        let dict = json!({"x": {"y": "one"}, "z": "two"});
        assert_eq!(lookup_first(&["missing", "z", "x.y"], &dict), Some("two"));
        assert_eq!(lookup_first(&["nope", "x.nope"], &dict), None);
    }

    #[test]
    fn test_locale_and_fallback() {
        let zh = Labels::new(Locale::Zh);
        assert_eq!(zh.t("fuel_types.diesel"), "柴油");
        assert_eq!(zh.t("columns.common.date"), "日期");
        // Not translated in zh, so English is used
        assert_eq!(zh.t("currencies.ZAR"), "South African Rand");
        assert_eq!(zh.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_column_headers() {
        let en = Labels::new(Locale::En);
        assert_eq!(en.column("fuel", "cost"), "Cost");
        assert_eq!(en.column("expense", "notes"), "Notes");
        assert_eq!(en.column("vehicle", "vehicle_type"), "Type");
        assert_eq!(en.column("income", "mileage"), "mileage");
        let zh = Labels::new(Locale::Zh);
        assert_eq!(zh.column("income", "amount"), "金额");
        assert_eq!(zh.column("fuel", "volume"), "加油量");
    }

    #[test]
    fn test_yes_no_and_placeholders() {
        let en = Labels::new(Locale::En);
        assert_eq!(en.yes_no(true), "Yes");
        assert_eq!(Labels::new(Locale::Zh).yes_no(false), "否");
        assert_eq!(
            en.t_with("stats.total", &[("currency", &"USD")]),
            "Total in USD"
        );
    }

    #[test]
    fn test_every_vocabulary_value_has_english_label() {
        use crate::model::vocab::Vocabulary;
        let en = Labels::new(Locale::En);
        for vocab in [
            Vocabulary::VehicleTypes,
            Vocabulary::FuelTypes,
            Vocabulary::PaymentTypes,
            Vocabulary::ExpenseCategories,
            Vocabulary::IncomeCategories,
            Vocabulary::Currencies,
        ] {
            for value in vocab.values() {
                let key = format!("{}.{}", vocab.label_section(), value);
                assert!(en.get(&key).is_some(), "missing label {key}");
            }
        }
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::from_str("zh").unwrap(), Locale::Zh);
        assert_eq!(Locale::En.to_string(), "en");
        assert!(Locale::from_str("fr").is_err());
    }
}
