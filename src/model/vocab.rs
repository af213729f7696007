//! Static option vocabularies for record fields.
//!
//! These back the filter options offered for a table and the select lists of entry forms. Each
//! value is a stable key; its display label is found in the label dictionary under
//! `<vocabulary>.<value>` (see `crate::i18n`).

use serde::{Deserialize, Serialize};

pub const VEHICLE_TYPES: &[&str] = &["car", "suv", "truck", "van", "motorcycle", "bus", "other"];

pub const FUEL_TYPES: &[&str] = &[
    "gasoline", "diesel", "electric", "hybrid", "lpg", "cng", "hydrogen", "other",
];

pub const PAYMENT_TYPES: &[&str] = &[
    "cash",
    "credit_card",
    "debit_card",
    "mobile_payment",
    "fuel_card",
    "bank_transfer",
    "other",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "maintenance",
    "repair",
    "insurance",
    "registration",
    "parking",
    "tolls",
    "car_wash",
    "tires",
    "accessories",
    "loan_payment",
    "fines",
    "other",
];

pub const INCOME_CATEGORIES: &[&str] = &[
    "ride_sharing",
    "delivery",
    "rental",
    "reimbursement",
    "sale",
    "other",
];

/// The currency codes offered in forms and filters. Same set as the default exchange-rate table.
pub const CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "CNY", "CAD", "AUD", "CHF", "HKD", "SGD", "KRW", "INR", "MXN",
    "BRL", "RUB", "ZAR", "NZD", "SEK", "NOK", "TWD",
];

const BRAND_MODELS: &[(&str, &[&str])] = &[
    ("Toyota", &["Camry", "Corolla", "RAV4", "Prius", "Highlander", "Tacoma"]),
    ("Honda", &["Civic", "Accord", "CR-V", "Fit", "Odyssey"]),
    ("Ford", &["F-150", "Focus", "Mustang", "Explorer", "Ranger"]),
    ("Volkswagen", &["Golf", "Passat", "Tiguan", "Jetta", "ID.4"]),
    ("BMW", &["3 Series", "5 Series", "X3", "X5", "i4"]),
    ("Tesla", &["Model 3", "Model Y", "Model S", "Model X"]),
    ("BYD", &["Han", "Tang", "Song", "Qin", "Seal", "Dolphin"]),
    ("Nissan", &["Altima", "Sentra", "Leaf", "Rogue"]),
    ("Hyundai", &["Elantra", "Sonata", "Tucson", "Ioniq 5"]),
];

/// Every brand that has a known model list.
pub fn brands() -> impl Iterator<Item = &'static str> {
    BRAND_MODELS.iter().map(|(brand, _)| *brand)
}

/// The models known for `brand` (case-insensitive). Unknown brands have no models.
pub fn models_for(brand: &str) -> &'static [&'static str] {
    BRAND_MODELS
        .iter()
        .find(|(b, _)| b.eq_ignore_ascii_case(brand))
        .map(|(_, models)| *models)
        .unwrap_or(&[])
}

/// Names a vocabulary so that table configuration can point a filterable field at its options.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    VehicleTypes,
    FuelTypes,
    PaymentTypes,
    ExpenseCategories,
    IncomeCategories,
    Currencies,
}

serde_plain::derive_display_from_serialize!(Vocabulary);

impl Vocabulary {
    pub fn values(&self) -> &'static [&'static str] {
        match self {
            Vocabulary::VehicleTypes => VEHICLE_TYPES,
            Vocabulary::FuelTypes => FUEL_TYPES,
            Vocabulary::PaymentTypes => PAYMENT_TYPES,
            Vocabulary::ExpenseCategories => EXPENSE_CATEGORIES,
            Vocabulary::IncomeCategories => INCOME_CATEGORIES,
            Vocabulary::Currencies => CURRENCIES,
        }
    }

    /// The label dictionary section holding display names for this vocabulary's values.
    pub fn label_section(&self) -> &'static str {
        match self {
            Vocabulary::VehicleTypes => "vehicle_types",
            Vocabulary::FuelTypes => "fuel_types",
            Vocabulary::PaymentTypes => "payment_types",
            Vocabulary::ExpenseCategories => "expense_categories",
            Vocabulary::IncomeCategories => "income_categories",
            Vocabulary::Currencies => "currencies",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_for_is_case_insensitive() {
        assert!(models_for("toyota").contains(&"Camry"));
        assert!(models_for("TESLA").contains(&"Model 3"));
        assert!(models_for("Unknown Motors").is_empty());
    }

    #[test]
    fn test_brands_listed() {
        assert!(brands().any(|b| b == "BYD"));
    }

    #[test]
    fn test_vocabulary_display() {
        assert_eq!(Vocabulary::FuelTypes.to_string(), "fuel_types");
        assert_eq!(Vocabulary::Currencies.values().len(), 20);
    }
}
