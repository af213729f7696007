//! Stable, type-aware sorting of records by a single field.

use crate::model::{Fields, Value};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

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
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

serde_plain::derive_display_from_serialize!(Direction);
serde_plain::derive_fromstr_from_deserialize!(Direction);

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// The single active sort of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field: String,
    pub direction: Direction,
}

impl SortDescriptor {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }
}

/// How the values of a column are compared. Chosen once per sort for the whole column so that
/// the comparison is a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Date,
    Number,
    Text,
}

/// A precomputed sort key. Absent or unreadable values are `Missing`, which orders before every
/// present value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Key {
    Missing,
    Date(NaiveDate),
    Number(Decimal),
    Text(String),
}

fn column_mode(values: &[Option<Value>], is_date_field: bool) -> Mode {
    if is_date_field {
        return Mode::Date;
    }
    if values.iter().flatten().next().is_none() {
        return Mode::Text;
    }
    if values.iter().flatten().all(Value::looks_like_date) {
        Mode::Date
    } else if values.iter().flatten().all(|v| v.as_number().is_some()) {
        Mode::Number
    } else {
        Mode::Text
    }
}

fn key(value: Option<Value>, mode: Mode) -> Key {
    let Some(value) = value else {
        return Key::Missing;
    };
    match mode {
        Mode::Date => value.as_date().map_or(Key::Missing, Key::Date),
        Mode::Number => value.as_number().map_or(Key::Missing, Key::Number),
        Mode::Text => Key::Text(value.to_string().to_lowercase()),
    }
}

/// Sorts `rows` in place by `sort.field`. The sort is stable: records that compare equal keep
/// their relative order, in both directions.
///
/// The column is compared as calendar dates when `sort.field` is `date_field` or every present
/// value looks like a `YYYY-MM-DD` date, numerically when every present value is numeric, and as
/// case-insensitive text otherwise.
pub fn sort_rows<T: Fields>(rows: &mut Vec<&T>, sort: &SortDescriptor, date_field: &str) {
    let values: Vec<Option<Value>> = rows.iter().map(|r| r.field(&sort.field)).collect();
    let mode = column_mode(&values, sort.field == date_field);
    let mut keyed: Vec<(Key, &T)> = values
        .into_iter()
        .map(|v| key(v, mode))
        .zip(rows.drain(..))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering: Ordering = a.cmp(b);
        match sort.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
    rows.extend(keyed.into_iter().map(|(_, r)| r));
}

/// Returns a sorted copy of `records`; see `sort_rows`.
pub fn sort<'a, T: Fields>(records: &[&'a T], sort: &SortDescriptor, date_field: &str) -> Vec<&'a T> {
    let mut rows = records.to_vec();
    sort_rows(&mut rows, sort, date_field);
    rows
}
