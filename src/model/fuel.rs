use crate::model::amount::{lenient, Amount};
use crate::model::coerce;
use crate::model::record::{Fields, Value};
use crate::model::text;
use serde::{Deserialize, Serialize};

/// One fill-up at the pump.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEntry {
    #[serde(alias = "_id", deserialize_with = "coerce::text")]
    pub(crate) id: String,
    #[serde(deserialize_with = "coerce::text")]
    pub(crate) vehicle_id: String,
    #[serde(deserialize_with = "coerce::text")]
    pub(crate) date: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) fuel_type: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) fuel_brand: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) fuel_grade: String,
    #[serde(default, with = "lenient")]
    pub(crate) volume: Option<Amount>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) volume_unit: String,
    #[serde(default, with = "lenient")]
    pub(crate) cost: Option<Amount>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) currency: String,
    #[serde(default, with = "lenient")]
    pub(crate) odometer: Option<Amount>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub(crate) is_full_tank: bool,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub(crate) missed_previous: bool,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) payment_type: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) location: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) notes: String,
    #[serde(default, deserialize_with = "coerce::text_list")]
    pub(crate) tags: Vec<String>,
}

impl FuelEntry {
    /// Every field name understood by `Fields::field`, in display order.
    pub const FIELDS: &'static [&'static str] = &[
        "date",
        "vehicle_id",
        "fuel_type",
        "fuel_brand",
        "fuel_grade",
        "volume",
        "volume_unit",
        "cost",
        "currency",
        "odometer",
        "is_full_tank",
        "missed_previous",
        "payment_type",
        "location",
        "notes",
        "tags",
    ];

    pub fn new(id: impl Into<String>, vehicle_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn cost(&self) -> Option<Amount> {
        self.cost
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl Fields for FuelEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => text(&self.id),
            "date" => text(&self.date),
            "vehicle_id" => text(&self.vehicle_id),
            "fuel_type" => text(&self.fuel_type),
            "fuel_brand" => text(&self.fuel_brand),
            "fuel_grade" => text(&self.fuel_grade),
            "volume" => self.volume.map(|a| Value::Number(a.value())),
            "volume_unit" => text(&self.volume_unit),
            "cost" => self.cost.map(|a| Value::Number(a.value())),
            "currency" => text(&self.currency),
            "odometer" => self.odometer.map(|a| Value::Number(a.value())),
            "is_full_tank" => Some(Value::Bool(self.is_full_tank)),
            "missed_previous" => Some(Value::Bool(self.missed_previous)),
            "payment_type" => text(&self.payment_type),
            "location" => text(&self.location),
            "notes" => text(&self.notes),
            "tags" if !self.tags.is_empty() => Some(Value::List(self.tags.clone())),
            _ => None,
        }
    }
}
