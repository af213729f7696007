use crate::i18n::Labels;
use crate::model::vocab::Vocabulary;
use crate::model::{ExpenseEntry, FuelEntry, IncomeEntry, RecordKind, Vehicle};
use crate::table::sort::{Direction, SortDescriptor};
use serde::Serialize;

/// Per-record-type settings for the generic table engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    kind: RecordKind,
    columns: &'static [&'static str],
    searchable: &'static [&'static str],
    date_field: &'static str,
    default_sort: (&'static str, Direction),
    filterable: &'static [(&'static str, Vocabulary)],
}

/// One selectable value for a filter, with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl TableConfig {
    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Vehicle => Self::vehicle(),
            RecordKind::Fuel => Self::fuel(),
            RecordKind::Expense => Self::expense(),
            RecordKind::Income => Self::income(),
        }
    }

    pub fn fuel() -> Self {
        Self {
            kind: RecordKind::Fuel,
            columns: FuelEntry::FIELDS,
            searchable: &["fuel_brand", "fuel_grade", "location", "notes", "tags"],
            date_field: "date",
            default_sort: ("date", Direction::Desc),
            filterable: &[
                ("fuel_type", Vocabulary::FuelTypes),
                ("payment_type", Vocabulary::PaymentTypes),
                ("currency", Vocabulary::Currencies),
            ],
        }
    }

    pub fn expense() -> Self {
        Self {
            kind: RecordKind::Expense,
            columns: ExpenseEntry::FIELDS,
            searchable: &["category", "location", "notes", "tags"],
            date_field: "date",
            default_sort: ("date", Direction::Desc),
            filterable: &[
                ("category", Vocabulary::ExpenseCategories),
                ("payment_type", Vocabulary::PaymentTypes),
                ("currency", Vocabulary::Currencies),
            ],
        }
    }

    pub fn income() -> Self {
        Self {
            kind: RecordKind::Income,
            columns: IncomeEntry::FIELDS,
            searchable: &["category", "notes", "tags"],
            date_field: "date",
            default_sort: ("date", Direction::Desc),
            filterable: &[
                ("category", Vocabulary::IncomeCategories),
                ("currency", Vocabulary::Currencies),
            ],
        }
    }

    pub fn vehicle() -> Self {
        Self {
            kind: RecordKind::Vehicle,
            columns: Vehicle::FIELDS,
            searchable: &["name", "brand", "model", "license_plate", "vin", "notes"],
            date_field: "purchase_date",
            default_sort: ("name", Direction::Asc),
            filterable: &[
                ("vehicle_type", Vocabulary::VehicleTypes),
                ("fuel_type", Vocabulary::FuelTypes),
                ("currency", Vocabulary::Currencies),
            ],
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// The field names shown as table columns, in order.
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn searchable(&self) -> &'static [&'static str] {
        self.searchable
    }

    pub fn date_field(&self) -> &'static str {
        self.date_field
    }

    pub fn default_sort(&self) -> SortDescriptor {
        SortDescriptor::new(self.default_sort.0, self.default_sort.1)
    }

    /// Fields that offer a fixed list of filter options.
    pub fn filterable(&self) -> impl Iterator<Item = &'static str> {
        self.filterable.iter().map(|(field, _)| *field)
    }

    /// The options offered for filtering `field`, labeled in the locale of `labels`. Fields
    /// without a vocabulary have no options.
    pub fn filter_options(&self, field: &str, labels: &Labels) -> Vec<FilterOption> {
        let Some((_, vocab)) = self.filterable.iter().find(|(f, _)| *f == field) else {
            return Vec::new();
        };
        vocab
            .values()
            .iter()
            .map(|value| {
                let key = format!("{}.{}", vocab.label_section(), value);
                FilterOption {
                    value: value.to_string(),
                    label: labels.get(&key).unwrap_or(*value).to_string(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;

    #[test]
    fn test_defaults_sort_by_date_desc() {
        for kind in [RecordKind::Fuel, RecordKind::Expense, RecordKind::Income] {
            let config = TableConfig::for_kind(kind);
            assert_eq!(config.kind(), kind);
            assert_eq!(config.default_sort(), SortDescriptor::desc("date"));
            assert_eq!(config.date_field(), "date");
        }
    }

    #[test]
    fn test_filter_options_are_labeled() {
        let config = TableConfig::fuel();
        let en = config.filter_options("fuel_type", &Labels::new(Locale::En));
        let diesel = en.iter().find(|o| o.value == "diesel").unwrap();
        assert_eq!(diesel.label, "Diesel");

        let zh = config.filter_options("fuel_type", &Labels::new(Locale::Zh));
        let diesel = zh.iter().find(|o| o.value == "diesel").unwrap();
        assert_eq!(diesel.label, "柴油");
    }

    #[test]
    fn test_currency_options_fall_back_to_code() {
        let config = TableConfig::income();
        let options = config.filter_options("currency", &Labels::new(Locale::En));
        assert_eq!(options.len(), 20);
        assert!(options.iter().all(|o| !o.label.is_empty()));
    }

    #[test]
    fn test_unfilterable_field_has_no_options() {
        let config = TableConfig::expense();
        assert!(config
            .filter_options("notes", &Labels::new(Locale::En))
            .is_empty());
    }
}
