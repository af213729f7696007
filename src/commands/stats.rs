use crate::commands::Out;
use crate::currency::{summarize, CurrencySummary};
use crate::i18n::Labels;
use crate::model::{Amount, ExpenseEntry, FuelEntry, IncomeEntry};
use crate::{Config, Result};

/// Totals fuel costs, expenses and income per currency across the whole ledger, and converts the
/// net of each currency into the base currency.
pub async fn stats(config: Config) -> Result<Out<CurrencySummary>> {
    let ledger = config.load_ledger().await?;
    let labels = Labels::new(config.locale());
    let rates = config.exchange_rates();

    let fuel: Vec<&FuelEntry> = ledger.fuel().iter().collect();
    let expenses: Vec<&ExpenseEntry> = ledger.expenses().iter().collect();
    let incomes: Vec<&IncomeEntry> = ledger.incomes().iter().collect();
    let summary = summarize(&fuel, &expenses, &incomes, &rates);

    let report = render(&summary, &labels);
    let message = format!(
        "{}: {}",
        labels.t_with("stats.total", &[("currency", &summary.base_currency)]),
        Amount::from(summary.total_in_base)
    );
    Ok(Out::new(message, summary).with_report(report))
}

fn render(summary: &CurrencySummary, labels: &Labels) -> Vec<String> {
    let header = [
        "stats.currency",
        "stats.total_fuel_cost",
        "stats.total_expenses",
        "stats.total_income",
        "stats.net_cost",
        "stats.entry_count",
    ]
    .iter()
    .map(|key| labels.t(key))
    .collect::<Vec<_>>()
    .join(" | ");

    let mut lines = vec![header];
    for stat in &summary.stats {
        lines.push(format!(
            "{} | {} | {} | {} | {} | {}",
            stat.currency,
            Amount::from(stat.total_fuel_cost),
            Amount::from(stat.total_expenses),
            Amount::from(stat.total_income),
            Amount::from(stat.net_cost),
            stat.entry_count
        ));
    }
    lines.push(format!(
        "{}: {}",
        labels.t_with("stats.total", &[("currency", &summary.base_currency)]),
        Amount::from(summary.total_in_base)
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ledger;
    use crate::test::{amount, TestEnv};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_stats_sample_ledger() {
        let env = TestEnv::new().await;
        let out = stats(env.config()).await.unwrap();
        let summary = out.structure().unwrap();
        let codes: Vec<&str> = summary.stats.iter().map(|s| s.currency.as_str()).collect();
        assert_eq!(codes, vec!["EUR", "USD"]);

        let eur = &summary.stats[0];
        assert_eq!(eur.total_fuel_cost, Decimal::from(100));
        assert_eq!(eur.total_expenses, Decimal::from(200));
        assert_eq!(eur.total_income, Decimal::from(100));
        assert_eq!(eur.net_cost, Decimal::from(200));
        assert_eq!(eur.entry_count, 4);

        let usd = &summary.stats[1];
        assert_eq!(usd.total_fuel_cost, Decimal::from(125));
        assert_eq!(usd.entry_count, 3);
        assert_eq!(out.report().len(), 4);
    }

    #[tokio::test]
    async fn test_stats_usd_only() {
        let mut ledger = Ledger::default();
        for (id, cost) in [("a", "50"), ("b", "75")] {
            let mut e = FuelEntry::new(id, "v1", "2024-01-05");
            e.cost = amount(cost);
            e.currency = "USD".into();
            ledger.fuel.push(e);
        }
        let env = TestEnv::with_ledger(ledger).await;
        let out = stats(env.config()).await.unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.stats.len(), 1);
        assert_eq!(summary.stats[0].net_cost, Decimal::from(125));
        assert_eq!(summary.stats[0].entry_count, 2);
        assert_eq!(summary.total_in_base, Decimal::from(125));
        assert_eq!(out.message(), "Total in USD: 125.00");
    }
}
