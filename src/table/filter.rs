//! Structured filters: exact match, multi-match and date ranges, combined with logical AND.

use crate::model::{Fields, Value};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A constraint on a single field.
///
/// Filters that carry no constraint (an empty exact value, an empty accepted set, a date range with
/// neither bound) keep every record. So does a filter kind that this version does not know about,
/// which can appear when filters are read from JSON written by a newer client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    Exact {
        value: String,
    },
    MultiMatch {
        values: Vec<String>,
    },
    DateRange {
        #[serde(default)]
        start: Option<NaiveDate>,
        #[serde(default)]
        end: Option<NaiveDate>,
    },
    #[serde(other)]
    Unknown,
}

impl Filter {
    pub fn exact(value: impl Into<String>) -> Self {
        Filter::Exact {
            value: value.into(),
        }
    }

    pub fn any_of<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Filter::MultiMatch {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Filter::DateRange { start, end }
    }

    /// True when this filter keeps every record regardless of its value.
    pub fn is_noop(&self) -> bool {
        match self {
            Filter::Exact { value } => value.is_empty(),
            Filter::MultiMatch { values } => values.is_empty(),
            Filter::DateRange { start, end } => start.is_none() && end.is_none(),
            Filter::Unknown => true,
        }
    }

    /// Does a field holding `value` (or nothing) pass this filter?
    pub fn matches(&self, value: Option<&Value>) -> bool {
        if self.is_noop() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        match self {
            Filter::Exact { value: expected } => value_equals(value, expected),
            Filter::MultiMatch { values } => values.iter().any(|e| value_equals(value, e)),
            Filter::DateRange { start, end } => match value.as_date() {
                Some(date) => {
                    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
                }
                None => false,
            },
            Filter::Unknown => true,
        }
    }
}

/// Compares a field value with a filter value after coercing the filter value to the field's type.
/// List fields match when any element equals the filter value.
fn value_equals(value: &Value, expected: &str) -> bool {
    match value {
        Value::Text(s) => s == expected,
        Value::Number(n) => Decimal::from_str(expected.trim()).map_or(false, |e| e == *n),
        Value::Bool(b) => bool::from_str(expected.trim()).map_or(false, |e| e == *b),
        Value::List(items) => items.iter().any(|item| item == expected),
    }
}

/// A named, optional constraint on a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub field: String,
    #[serde(flatten)]
    pub filter: Filter,
}

/// The active filters of a table, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, Filter>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an exact-match filter on `field`. An empty `value` removes the filter on that field
    /// instead of filtering for empty values.
    pub fn update_filter(&mut self, field: impl Into<String>, value: &str) {
        let field = field.into();
        if value.is_empty() {
            self.0.remove(&field);
        } else {
            self.0.insert(field, Filter::exact(value));
        }
    }

    pub fn set(&mut self, field: impl Into<String>, filter: Filter) {
        self.0.insert(field.into(), filter);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, field: &str) -> Option<&Filter> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when at least one filter actually constrains its field.
    pub fn is_active(&self) -> bool {
        self.0.values().any(|f| !f.is_noop())
    }

    /// A record passes when it satisfies every filter.
    pub fn matches<T: Fields>(&self, record: &T) -> bool {
        self.0
            .iter()
            .all(|(field, filter)| filter.matches(record.field(field).as_ref()))
    }
}

impl FromIterator<FilterDescriptor> for Filters {
    fn from_iter<I: IntoIterator<Item = FilterDescriptor>>(iter: I) -> Self {
        Filters(iter.into_iter().map(|d| (d.field, d.filter)).collect())
    }
}

/// Returns the records that satisfy every filter, in input order.
pub fn filter<'a, T: Fields>(records: &[&'a T], filters: &Filters) -> Vec<&'a T> {
    records
        .iter()
        .copied()
        .filter(|r| filters.matches(*r))
        .collect()
}
