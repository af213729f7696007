//! Free-text search over a configured subset of fields.

use crate::model::Fields;

/// True when the lower-cased string form of at least one of `fields` contains the lower-cased
/// `query`. An empty or whitespace-only query matches everything; absent fields never match.
/// Otherwise the query is used as typed, surrounding spaces included.
pub fn matches_query<T: Fields>(record: &T, fields: &[&str], query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields.iter().any(|name| {
        record
            .field(name)
            .map_or(false, |v| v.to_string().to_lowercase().contains(&needle))
    })
}

/// Returns the records matching `query`, in input order.
pub fn search<'a, T: Fields>(records: &[&'a T], fields: &[&str], query: &str) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .copied()
        .filter(|r| matches_query(*r, fields, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use rust_decimal::Decimal;

    fn records() -> Vec<Record> {
        vec![
            Record::new("1")
                .with("location", "Shell, Main St")
                .with("notes", "Road TRIP"),
            Record::new("2").with("location", "加油站").with("cost", Decimal::from(42)),
            Record::new("3").with("tags", vec!["Commute".to_string()]),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let data = records();
        let all: Vec<&Record> = data.iter().collect();
        for q in ["", "   ", "\t"] {
            let found = search(&all, &["location"], q);
            assert_eq!(found.len(), all.len());
            assert!(found.iter().zip(all.iter()).all(|(a, b)| std::ptr::eq(*a, *b)));
        }
    }

    #[test]
    fn test_case_insensitive_substring() {
        let data = records();
        let all: Vec<&Record> = data.iter().collect();
        let found = search(&all, &["location", "notes"], "road trip");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "1");
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_query() {
        let data = records();
        let all: Vec<&Record> = data.iter().collect();
        assert_eq!(search(&all, &["notes"], "road ").len(), 1);
        assert!(search(&all, &["location"], "shell ").is_empty());
        assert!(search(&all, &["notes"], " road").is_empty());
    }

    #[test]
    fn test_only_configured_fields_are_searched() {
        let data = records();
        let all: Vec<&Record> = data.iter().collect();
        assert!(search(&all, &["location"], "trip").is_empty());
    }

    #[test]
    fn test_numbers_lists_and_unicode() {
        let data = records();
        let all: Vec<&Record> = data.iter().collect();
        assert_eq!(search(&all, &["cost"], "42")[0].id(), "2");
        assert_eq!(search(&all, &["tags"], "commute")[0].id(), "3");
        assert_eq!(search(&all, &["location"], "加油")[0].id(), "2");
    }

    #[test]
    fn test_missing_fields_never_match() {
        let data = records();
        let all: Vec<&Record> = data.iter().collect();
        assert!(search(&all, &["does_not_exist"], "a").is_empty());
    }
}
