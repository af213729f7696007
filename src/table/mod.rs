//! The table engine: free-text search, then structured filtering, then sorting, over any slice of
//! records that implement `Fields`.
//!
//! The engine only holds view state (search text, filters, sort). Records stay owned by the caller
//! and are never mutated; every call to `apply` produces a new vector of references.

mod config;
mod filter;
mod search;
mod sort;

pub use config::{FilterOption, TableConfig};
pub use filter::{filter, Filter, FilterDescriptor, Filters};
pub use search::{matches_query, search};
pub use sort::{sort, sort_rows, Direction, SortDescriptor};

use crate::model::Fields;
use tracing::trace;

/// Search, filter and sort state for one table instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEngine {
    config: TableConfig,
    search: String,
    sort: SortDescriptor,
    filters: Filters,
}

/// The result of running the pipeline once.
#[derive(Debug, Clone)]
pub struct TableView<'a, T> {
    rows: Vec<&'a T>,
    total_count: usize,
}

impl<'a, T> TableView<'a, T> {
    /// The matching records, in display order.
    pub fn rows(&self) -> &[&'a T] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<&'a T> {
        self.rows
    }

    /// Number of records before search and filtering.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of records after search and filtering.
    pub fn result_count(&self) -> usize {
        self.rows.len()
    }
}

impl TableEngine {
    pub fn new(config: TableConfig) -> Self {
        let sort = config.default_sort();
        Self {
            config,
            search: String::new(),
            sort,
            filters: Filters::new(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn sort(&self) -> &SortDescriptor {
        &self.sort
    }

    pub fn set_sort(&mut self, sort: SortDescriptor) {
        self.sort = sort;
    }

    /// Column-header behavior: the active field flips direction, any other field becomes the
    /// active field in ascending order.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort.field == field {
            self.sort.direction = self.sort.direction.flip();
        } else {
            self.sort = SortDescriptor::asc(field);
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Sets an exact-match filter; an empty value clears the filter on `field`.
    pub fn update_filter(&mut self, field: impl Into<String>, value: &str) {
        self.filters.update_filter(field, value);
    }

    pub fn set_filter(&mut self, field: impl Into<String>, filter: Filter) {
        self.filters.set(field, filter);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active() || !self.search.trim().is_empty()
    }

    /// Runs search, then filters, then sort over `records`.
    pub fn apply<'a, T: Fields>(&self, records: &'a [T]) -> TableView<'a, T> {
        let mut rows: Vec<&'a T> = records
            .iter()
            .filter(|r| matches_query(*r, self.config.searchable(), &self.search))
            .filter(|r| self.filters.matches(*r))
            .collect();
        sort_rows(&mut rows, &self.sort, self.config.date_field());
        trace!(
            "Table {} kept {} of {} records",
            self.config.kind(),
            rows.len(),
            records.len()
        );
        TableView {
            rows,
            total_count: records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FuelEntry, Fields};
    use chrono::NaiveDate;

    fn entry(id: &str, date: &str, fuel_type: &str, location: &str) -> FuelEntry {
        let mut e = FuelEntry::new(id, "v1", date);
        e.fuel_type = fuel_type.into();
        e.location = location.into();
        e
    }

    fn entries() -> Vec<FuelEntry> {
        vec![
            entry("a", "2024-01-05", "gasoline", "Shell Downtown"),
            entry("b", "2024-01-10", "diesel", "BP Highway"),
            entry("c", "2024-01-15", "gasoline", "Shell Airport"),
            entry("d", "2024-01-20", "electric", "Home"),
        ]
    }

    fn ids<T: Fields>(view: &TableView<'_, T>) -> Vec<String> {
        view.rows().iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_default_sort_is_reverse_chronological() {
        let data = entries();
        let mut engine = TableEngine::new(TableConfig::fuel());
        assert_eq!(ids(&engine.apply(&data)), vec!["d", "c", "b", "a"]);

        engine.toggle_sort("date");
        assert_eq!(engine.sort().direction, Direction::Asc);
        assert_eq!(ids(&engine.apply(&data)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_toggle_new_field_starts_ascending() {
        let mut engine = TableEngine::new(TableConfig::fuel());
        engine.toggle_sort("location");
        assert_eq!(engine.sort(), &SortDescriptor::asc("location"));
        engine.toggle_sort("location");
        assert_eq!(engine.sort(), &SortDescriptor::desc("location"));
    }

    #[test]
    fn test_search_then_filter_then_sort() {
        let data = entries();
        let mut engine = TableEngine::new(TableConfig::fuel());
        engine.set_search("shell");
        engine.update_filter("fuel_type", "gasoline");
        let view = engine.apply(&data);
        assert_eq!(ids(&view), vec!["c", "a"]);
        assert_eq!(view.total_count(), 4);
        assert_eq!(view.result_count(), 2);
        assert!(engine.has_active_filters());
    }

    #[test]
    fn test_clearing_filter_restores_total() {
        let data = entries();
        let mut engine = TableEngine::new(TableConfig::fuel());
        engine.update_filter("fuel_type", "diesel");
        assert_eq!(engine.apply(&data).result_count(), 1);
        engine.update_filter("fuel_type", "");
        let view = engine.apply(&data);
        assert_eq!(view.result_count(), view.total_count());
        assert!(!engine.has_active_filters());
    }

    #[test]
    fn test_date_range_filter() {
        let data = entries();
        let mut engine = TableEngine::new(TableConfig::fuel());
        engine.set_filter(
            "date",
            Filter::date_range(NaiveDate::from_ymd_opt(2024, 1, 8), NaiveDate::from_ymd_opt(2024, 1, 15)),
        );
        assert_eq!(ids(&engine.apply(&data)), vec!["c", "b"]);
        engine.clear_filters();
        assert_eq!(engine.apply(&data).result_count(), 4);
    }

    #[test]
    fn test_apply_is_deterministic_and_leaves_input_alone() {
        let data = entries();
        let before = data.clone();
        let mut engine = TableEngine::new(TableConfig::fuel());
        engine.set_sort(SortDescriptor::asc("location"));
        let first = ids(&engine.apply(&data));
        let second = ids(&engine.apply(&data));
        assert_eq!(first, second);
        assert_eq!(data, before);
    }
}
