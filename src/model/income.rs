use crate::model::amount::{lenient, Amount};
use crate::model::coerce;
use crate::model::record::{Fields, Value};
use crate::model::text;
use serde::{Deserialize, Serialize};

/// Money earned with a vehicle, e.g. ride sharing or a mileage reimbursement.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntry {
    #[serde(alias = "_id", deserialize_with = "coerce::text")]
    pub(crate) id: String,
    #[serde(deserialize_with = "coerce::text")]
    pub(crate) vehicle_id: String,
    #[serde(deserialize_with = "coerce::text")]
    pub(crate) date: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) category: String,
    #[serde(default, with = "lenient")]
    pub(crate) amount: Option<Amount>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) currency: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub(crate) notes: String,
    #[serde(default, deserialize_with = "coerce::text_list")]
    pub(crate) tags: Vec<String>,
}

impl IncomeEntry {
    pub const FIELDS: &'static [&'static str] = &[
        "date",
        "vehicle_id",
        "category",
        "amount",
        "currency",
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

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl Fields for IncomeEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => text(&self.id),
            "date" => text(&self.date),
            "vehicle_id" => text(&self.vehicle_id),
            "category" => text(&self.category),
            "amount" => self.amount.map(|a| Value::Number(a.value())),
            "currency" => text(&self.currency),
            "notes" => text(&self.notes),
            "tags" if !self.tags.is_empty() => Some(Value::List(self.tags.clone())),
            _ => None,
        }
    }
}
