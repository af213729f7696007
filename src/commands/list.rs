use crate::args::ListArgs;
use crate::commands::{table_engine, Out};
use crate::export::display_cell;
use crate::i18n::Labels;
use crate::model::{Fields, Record, RecordKind};
use crate::reveal::{LoadMore, Reveal};
use crate::source::PagedSource;
use crate::table::TableEngine;
use crate::{Config, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// The visible part of a table after searching, filtering, sorting and paging.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    pub kind: RecordKind,
    /// Records fetched from the ledger so far.
    pub total_count: usize,
    /// Fetched records that pass the search and filters.
    pub result_count: usize,
    pub can_load_more: bool,
    pub rows: Vec<Record>,
}

/// Shows the first page of matching records, then applies `--pages` load-more steps. Records are
/// fetched from the ledger in batches of `fetch_size`; a load-more step that runs out of fetched
/// records fetches the next batch.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<ListPage>> {
    let ledger = config.load_ledger().await?;
    let labels = Labels::new(config.locale());
    let engine = table_engine(args.kind(), args.view());
    let page_size = args.page_size().unwrap_or_else(|| config.page_size());
    let names = ledger.vehicle_names();

    let page = match args.kind() {
        RecordKind::Vehicle => {
            let source = PagedSource::new(ledger.vehicles().to_vec(), config.fetch_size());
            reveal_pages(source, &engine, page_size, args.pages())
        }
        RecordKind::Fuel => {
            let source = PagedSource::new(ledger.fuel().to_vec(), config.fetch_size());
            reveal_pages(source, &engine, page_size, args.pages())
        }
        RecordKind::Expense => {
            let source = PagedSource::new(ledger.expenses().to_vec(), config.fetch_size());
            reveal_pages(source, &engine, page_size, args.pages())
        }
        RecordKind::Income => {
            let source = PagedSource::new(ledger.incomes().to_vec(), config.fetch_size());
            reveal_pages(source, &engine, page_size, args.pages())
        }
    };

    let report = render(&page, &engine, &names, &labels);
    let message = labels.t_with(
        "list.showing",
        &[
            ("visible", &page.rows.len()),
            ("result", &page.result_count),
            ("total", &page.total_count),
        ],
    );
    Ok(Out::new(message, page).with_report(report))
}

fn reveal_pages<T: Fields>(
    mut source: PagedSource<T>,
    engine: &TableEngine,
    page_size: usize,
    pages: usize,
) -> ListPage {
    let mut reveal = Reveal::new(page_size);
    for _ in 0..pages {
        let len = engine.apply(source.records()).result_count();
        reveal.sync(len);
        match reveal.load_more(len, Some(&mut source)) {
            LoadMore::Grew | LoadMore::Fetched => {}
            LoadMore::Busy | LoadMore::Exhausted => break,
        }
    }

    let view = engine.apply(source.records());
    reveal.sync(view.result_count());
    let can_load_more = reveal.can_load_more(view.result_count(), Some(&source));
    let columns = engine.config().columns();
    let rows = reveal
        .visible(view.rows())
        .iter()
        .map(|r| r.to_record(columns))
        .collect();
    debug!(
        "Revealed {} pages after {} fetches",
        reveal.window().current_page_count,
        source.fetches()
    );
    ListPage {
        kind: engine.config().kind(),
        total_count: view.total_count(),
        result_count: view.result_count(),
        can_load_more,
        rows,
    }
}

fn render(
    page: &ListPage,
    engine: &TableEngine,
    names: &HashMap<String, String>,
    labels: &Labels,
) -> Vec<String> {
    if page.rows.is_empty() {
        return vec![labels.t("list.empty")];
    }
    let kind = page.kind;
    let columns = engine.config().columns();
    let mut lines = vec![columns
        .iter()
        .map(|field| labels.column(kind, field))
        .collect::<Vec<_>>()
        .join(" | ")];
    for row in &page.rows {
        lines.push(
            columns
                .iter()
                .map(|field| display_cell(field, row.field(field), names, labels))
                .collect::<Vec<_>>()
                .join(" | "),
        );
    }
    if page.can_load_more {
        lines.push(labels.t("list.more"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ViewArgs;
    use crate::model::{FuelEntry, Ledger};
    use crate::table::Direction;
    use crate::test::TestEnv;

    fn ids(page: &ListPage) -> Vec<&str> {
        page.rows.iter().map(|r| r.id()).collect()
    }

    #[tokio::test]
    async fn test_list_fuel_newest_first() {
        let env = TestEnv::new().await;
        let out = list(
            env.config(),
            ListArgs::new(RecordKind::Fuel, ViewArgs::default(), 0),
        )
        .await
        .unwrap();
        let page = out.structure().unwrap();
        assert_eq!(ids(page), vec!["f4", "f3", "f2", "f1"]);
        assert!(!page.can_load_more);
        assert_eq!(out.message(), "Showing 4 of 4 (4 total)");
        assert!(out.report()[1].contains("Work Van"));
    }

    #[tokio::test]
    async fn test_list_search_filter_sort() {
        let env = TestEnv::new().await;
        let view = ViewArgs::default()
            .with_search("shell")
            .with_sort("cost", Some(Direction::Desc));
        let out = list(env.config(), ListArgs::new(RecordKind::Fuel, view, 0))
            .await
            .unwrap();
        let page = out.structure().unwrap();
        assert_eq!(ids(page), vec!["f3", "f1"]);
        assert_eq!(page.result_count, 2);
        assert_eq!(page.total_count, 4);
    }

    #[tokio::test]
    async fn test_list_no_matches() {
        let env = TestEnv::new().await;
        let view = ViewArgs::default().with_filter("category", "tolls");
        let out = list(env.config(), ListArgs::new(RecordKind::Expense, view, 0))
            .await
            .unwrap();
        assert!(out.structure().unwrap().rows.is_empty());
        assert_eq!(out.report(), &["No records match".to_string()]);
    }

    #[tokio::test]
    async fn test_list_pages_and_fetches() {
        // 120 entries served 50 at a time, shown 20 at a time
        let fuel: Vec<FuelEntry> = (0..120)
            .map(|i| {
                let day = 1 + (i % 28);
                FuelEntry::new(format!("f{i:03}"), "v1", format!("2024-02-{day:02}"))
            })
            .collect();
        let env = TestEnv::with_ledger(Ledger::new(vec![], fuel, vec![], vec![])).await;

        let out = list(
            env.config(),
            ListArgs::new(RecordKind::Fuel, ViewArgs::default(), 1),
        )
        .await
        .unwrap();
        let page = out.structure().unwrap();
        assert_eq!(page.rows.len(), 40);
        assert_eq!(page.total_count, 50);
        assert!(page.can_load_more);
        assert!(out.report().last().unwrap().contains("--pages"));

        // Two steps reveal all of the first batch, so the third fetches. The window starts over at
        // one page once the new batch arrives
        let out = list(
            env.config(),
            ListArgs::new(RecordKind::Fuel, ViewArgs::default(), 3),
        )
        .await
        .unwrap();
        let page = out.structure().unwrap();
        assert_eq!(page.total_count, 100);
        assert_eq!(page.rows.len(), 20);
        assert!(page.can_load_more);
    }

    #[tokio::test]
    async fn test_list_page_size_override() {
        let env = TestEnv::new().await;
        let args =
            ListArgs::new(RecordKind::Vehicle, ViewArgs::default(), 0).with_page_size(1);
        let out = list(env.config(), args).await.unwrap();
        let page = out.structure().unwrap();
        assert_eq!(ids(page), vec!["v1"]);
        assert!(page.can_load_more);
    }
}
