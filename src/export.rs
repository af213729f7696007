//! CSV export of ledger records.
//!
//! The document has one header row of display names in the chosen locale followed by one row per
//! record. Quoting follows RFC 4180: a cell containing a comma, a double quote or a line break is
//! wrapped in double quotes with inner quotes doubled.

use crate::i18n::Labels;
use crate::model::{Fields, RecordKind, Value};
use crate::table::TableConfig;
use crate::{utils, Result};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const VEHICLE_FIELD: &str = "vehicle_id";
const LIST_SEPARATOR: &str = "; ";

/// What an export did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ExportOutcome {
    /// There was nothing to export, so no file was written.
    Empty { notice: String },
    Written { path: PathBuf, count: usize },
}

/// The filename used when the caller does not choose one, e.g. `fuel-entries-2024-01-20.csv`.
pub fn default_filename(kind: RecordKind, today: NaiveDate) -> String {
    let prefix = match kind {
        RecordKind::Vehicle => "vehicles",
        RecordKind::Fuel => "fuel-entries",
        RecordKind::Expense => "expenses",
        RecordKind::Income => "incomes",
    };
    format!("{prefix}-{}.csv", today.format("%Y-%m-%d"))
}

/// Renders `records` as a CSV document with the columns configured for `kind`.
///
/// `vehicle_names` maps vehicle ids to display names; ids without a name are written as-is.
pub fn to_csv<T: Fields>(
    records: &[&T],
    kind: RecordKind,
    vehicle_names: &HashMap<String, String>,
    labels: &Labels,
) -> Result<String> {
    let columns = TableConfig::for_kind(kind).columns();
    let mut writer = csv::Writer::from_writer(Vec::new());

    let headers: Vec<String> = columns
        .iter()
        .map(|field| labels.column(kind, field))
        .collect();
    writer
        .write_record(&headers)
        .context("Unable to write the CSV header")?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|field| display_cell(field, record.field(field), vehicle_names, labels))
            .collect();
        writer
            .write_record(&row)
            .with_context(|| format!("Unable to write CSV row for record {}", record.id()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Unable to finish the CSV document")?;
    String::from_utf8(bytes).context("The CSV document is not valid UTF-8")
}

/// The plain-text form of one field as shown to a reader.
pub(crate) fn display_cell(
    field: &str,
    value: Option<Value>,
    vehicle_names: &HashMap<String, String>,
    labels: &Labels,
) -> String {
    match value {
        None => String::new(),
        Some(Value::Bool(b)) => labels.yes_no(b),
        Some(Value::List(items)) => items.join(LIST_SEPARATOR),
        Some(Value::Text(id)) if field == VEHICLE_FIELD => {
            vehicle_names.get(&id).cloned().unwrap_or(id)
        }
        Some(other) => other.to_string(),
    }
}

/// Writes `records` to `dir/filename` (or the dated default name). An empty `records` writes
/// nothing and returns the localized notice instead.
pub async fn export<T: Fields>(
    records: &[&T],
    kind: RecordKind,
    vehicle_names: &HashMap<String, String>,
    labels: &Labels,
    dir: &Path,
    filename: Option<&str>,
    today: NaiveDate,
) -> Result<ExportOutcome> {
    if records.is_empty() {
        let notice = labels.t("export.empty");
        info!("{notice}");
        return Ok(ExportOutcome::Empty { notice });
    }

    let document = to_csv(records, kind, vehicle_names, labels)?;
    let filename = filename
        .map(str::to_string)
        .unwrap_or_else(|| default_filename(kind, today));
    utils::make_dir(dir).await?;
    let path = dir.join(filename);
    utils::write(&path, document)
        .await
        .context("Unable to save the CSV export")?;
    debug!("Wrote {} {kind} records to {}", records.len(), path.display());

    Ok(ExportOutcome::Written {
        path,
        count: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::model::{Amount, ExpenseEntry, FuelEntry, Vehicle};
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn names() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("v1".to_string(), "Family Car".to_string());
        map
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_quotes_are_escaped() {
        let mut e = ExpenseEntry::new("e1", "v1", "2024-01-05");
        e.notes = r#"He said, "hi""#.into();
        let csv = to_csv(&[&e], RecordKind::Expense, &names(), &Labels::default()).unwrap();
        assert!(csv.contains(r#""He said, ""hi""""#), "{csv}");
    }

    #[test]
    fn test_header_and_row_layout() {
        let mut e = ExpenseEntry::new("e1", "v1", "2024-01-05");
        e.category = "parking".into();
        e.amount = Some(Amount::new(Decimal::new(1250, 2)));
        e.currency = "USD".into();
        e.tags = vec!["work".into(), "downtown".into()];
        let csv = to_csv(&[&e], RecordKind::Expense, &names(), &Labels::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Vehicle,Category,Amount,Currency,Payment,Location,Notes,Tags"
        );
        assert_eq!(
            lines[1],
            "2024-01-05,Family Car,parking,12.50,USD,,,,work; downtown"
        );
    }

    #[test]
    fn test_booleans_newlines_and_unknown_vehicle() {
        let mut f = FuelEntry::new("f1", "v9", "2024-01-05");
        f.is_full_tank = true;
        f.location = "Line one\nLine two".into();
        let labels = Labels::new(Locale::Zh);
        let csv = to_csv(&[&f], RecordKind::Fuel, &names(), &labels).unwrap();
        assert!(csv.starts_with("日期,车辆,"));
        assert!(csv.contains(",v9,"));
        assert!(csv.contains("\"Line one\nLine two\""));
        assert!(csv.contains(",是,否,"));
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(
            default_filename(RecordKind::Fuel, today()),
            "fuel-entries-2024-03-09.csv"
        );
        assert_eq!(
            default_filename(RecordKind::Vehicle, today()),
            "vehicles-2024-03-09.csv"
        );
    }

    #[tokio::test]
    async fn test_empty_export_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let records: Vec<&Vehicle> = Vec::new();
        let outcome = export(
            &records,
            RecordKind::Vehicle,
            &names(),
            &Labels::default(),
            &out,
            None,
            today(),
        )
        .await
        .unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Empty {
                notice: "No data to export".to_string()
            }
        );
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let v = Vehicle::new("v1", "Family Car");
        let outcome = export(
            &[&v],
            RecordKind::Vehicle,
            &names(),
            &Labels::default(),
            dir.path(),
            Some("mine.csv"),
            today(),
        )
        .await
        .unwrap();
        let path = dir.path().join("mine.csv");
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: path.clone(),
                count: 1
            }
        );
        let text = utils::read(&path).await.unwrap();
        assert!(text.starts_with("Name,Type,"));
        assert!(text.contains("Family Car"));
        assert!(text.contains(",Yes,"));
    }
}
