use crate::args::ExportArgs;
use crate::commands::{table_engine, Out};
use crate::export::{export as write_csv, ExportOutcome};
use crate::i18n::Labels;
use crate::model::{Fields, RecordKind};
use crate::table::TableEngine;
use crate::{Config, Result};

/// Exports what `list` would show for the same options, without paging, as a CSV file in the
/// export directory.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<ExportOutcome>> {
    let ledger = config.load_ledger().await?;
    let labels = Labels::new(args.locale().unwrap_or_else(|| config.locale()));
    let engine = table_engine(args.kind(), args.view());
    let names = ledger.vehicle_names();
    let today = chrono::Local::now().date_naive();
    let dir = config.export_dir();
    let kind = args.kind();

    let outcome = match kind {
        RecordKind::Vehicle => {
            let rows = visible(&engine, ledger.vehicles());
            write_csv(&rows, kind, &names, &labels, dir, args.output(), today).await?
        }
        RecordKind::Fuel => {
            let rows = visible(&engine, ledger.fuel());
            write_csv(&rows, kind, &names, &labels, dir, args.output(), today).await?
        }
        RecordKind::Expense => {
            let rows = visible(&engine, ledger.expenses());
            write_csv(&rows, kind, &names, &labels, dir, args.output(), today).await?
        }
        RecordKind::Income => {
            let rows = visible(&engine, ledger.incomes());
            write_csv(&rows, kind, &names, &labels, dir, args.output(), today).await?
        }
    };

    let message = match &outcome {
        ExportOutcome::Empty { notice } => notice.clone(),
        ExportOutcome::Written { path, count } => labels.t_with(
            "export.written",
            &[("count", count), ("path", &path.display())],
        ),
    };
    Ok(Out::new(message, outcome))
}

fn visible<'a, T: Fields>(engine: &TableEngine, records: &'a [T]) -> Vec<&'a T> {
    engine.apply(records).into_rows()
}
