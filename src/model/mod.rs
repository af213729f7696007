//! Types that represent the core data model, such as `FuelEntry` and `Vehicle`.
mod amount;
mod coerce;
mod expense;
mod fuel;
mod income;
mod record;
mod vehicle;
pub mod vocab;

pub use amount::{Amount, AmountError};
pub use expense::ExpenseEntry;
pub use fuel::FuelEntry;
pub use income::IncomeEntry;
pub use record::{parse_date, Fields, Record, Value};
pub use vehicle::Vehicle;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents everything stored in a ledger file: vehicles and the three kinds of entries.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default, deserialize_with = "coerce::or_empty")]
    pub(crate) vehicles: Vec<Vehicle>,
    #[serde(default, alias = "fuelEntries", deserialize_with = "coerce::or_empty")]
    pub(crate) fuel: Vec<FuelEntry>,
    #[serde(default, deserialize_with = "coerce::or_empty")]
    pub(crate) expenses: Vec<ExpenseEntry>,
    #[serde(default, deserialize_with = "coerce::or_empty")]
    pub(crate) incomes: Vec<IncomeEntry>,
}

impl Ledger {
    pub fn new(
        vehicles: Vec<Vehicle>,
        fuel: Vec<FuelEntry>,
        expenses: Vec<ExpenseEntry>,
        incomes: Vec<IncomeEntry>,
    ) -> Self {
        Self {
            vehicles,
            fuel,
            expenses,
            incomes,
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn fuel(&self) -> &[FuelEntry] {
        &self.fuel
    }

    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    pub fn incomes(&self) -> &[IncomeEntry] {
        &self.incomes
    }

    /// Maps vehicle id to vehicle name, for rendering the `vehicle_id` foreign key.
    pub fn vehicle_names(&self) -> HashMap<String, String> {
        self.vehicles
            .iter()
            .map(|v| (v.id.clone(), v.name.clone()))
            .collect()
    }
}

/// The kinds of record a table can show.
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
pub enum RecordKind {
    Vehicle,
    #[default]
    Fuel,
    Expense,
    Income,
}

serde_plain::derive_display_from_serialize!(RecordKind);
serde_plain::derive_fromstr_from_deserialize!(RecordKind);

/// Empty strings are absent values as far as the table engine is concerned.
pub(crate) fn text(s: &str) -> Option<Value> {
    if s.is_empty() {
        None
    } else {
        Some(Value::Text(s.to_string()))
    }
}
