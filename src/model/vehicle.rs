use crate::model::amount::{lenient, Amount};
use crate::model::coerce;
use crate::model::record::{Fields, Value};
use crate::model::text;
use serde::{Deserialize, Serialize};

/// Vehicle metadata. Entries reference a vehicle through `vehicle_id`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(alias = "_id", deserialize_with = "coerce::text")]
    pub(crate) id: String,
    #[serde(deserialize_with = "coerce::text")]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) vehicle_type: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) brand: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) model: String,
    #[serde(default, with = "lenient")]
    pub(crate) year: Option<Amount>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) license_plate: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) vin: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) fuel_type: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) purchase_date: String,
    #[serde(default, with = "lenient")]
    pub(crate) purchase_price: Option<Amount>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) currency: String,
    #[serde(default = "active", deserialize_with = "coerce::flag_or_true")]
    pub(crate) is_active: bool,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) notes: String,
}

fn active() -> bool {
    true
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            vehicle_type: String::new(),
            brand: String::new(),
            model: String::new(),
            year: None,
            license_plate: String::new(),
            vin: String::new(),
            fuel_type: String::new(),
            purchase_date: String::new(),
            purchase_price: None,
            currency: String::new(),
            is_active: true,
            notes: String::new(),
        }
    }
}

impl Vehicle {
    pub const FIELDS: &'static [&'static str] = &[
        "name",
        "vehicle_type",
        "brand",
        "model",
        "year",
        "license_plate",
        "vin",
        "fuel_type",
        "purchase_date",
        "purchase_price",
        "currency",
        "is_active",
        "notes",
    ];

    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Fields for Vehicle {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => text(&self.id),
            "name" => text(&self.name),
            "vehicle_type" => text(&self.vehicle_type),
            "brand" => text(&self.brand),
            "model" => text(&self.model),
            "year" => self.year.map(|a| Value::Number(a.value())),
            "license_plate" => text(&self.license_plate),
            "vin" => text(&self.vin),
            "fuel_type" => text(&self.fuel_type),
            "purchase_date" => text(&self.purchase_date),
            "purchase_price" => self.purchase_price.map(|a| Value::Number(a.value())),
            "currency" => text(&self.currency),
            "is_active" => Some(Value::Bool(self.is_active)),
            "notes" => text(&self.notes),
            _ => None,
        }
    }
}
