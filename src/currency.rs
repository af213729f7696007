//! Exchange rates, currency conversion and per-currency totals.
//!
//! Rates are expressed as units of a currency per one US dollar. Conversion pivots through USD, so
//! `convert(a, from, to) = a / rate[from] * rate[to]`. No rates are ever fetched from the network.

use crate::model::{ExpenseEntry, FuelEntry, IncomeEntry};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{trace, warn};

pub const BASE_CURRENCY: &str = "USD";

const DEFAULT_RATES: &[(&str, &str)] = &[
    ("USD", "1"),
    ("EUR", "0.92"),
    ("GBP", "0.79"),
    ("JPY", "149.50"),
    ("CNY", "7.24"),
    ("CAD", "1.36"),
    ("AUD", "1.53"),
    ("CHF", "0.88"),
    ("HKD", "7.82"),
    ("SGD", "1.34"),
    ("KRW", "1330"),
    ("INR", "83.10"),
    ("MXN", "17.10"),
    ("BRL", "4.97"),
    ("RUB", "92.50"),
    ("ZAR", "18.60"),
    ("NZD", "1.64"),
    ("SEK", "10.40"),
    ("NOK", "10.60"),
    ("TWD", "31.50"),
];

/// Upper-cases and trims a currency code. An empty code becomes `fallback`.
pub fn normalize_code(code: &str, fallback: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        fallback.to_ascii_uppercase()
    } else {
        code.to_ascii_uppercase()
    }
}

/// A table of currency code to units-per-USD rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRates {
    base: String,
    rates: BTreeMap<String, Decimal>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        let rates = DEFAULT_RATES
            .iter()
            .filter_map(|(code, rate)| Some((code.to_string(), Decimal::from_str(rate).ok()?)))
            .collect();
        Self {
            base: BASE_CURRENCY.to_string(),
            rates,
        }
    }
}

impl ExchangeRates {
    /// The default table with `overrides` applied on top and `base` as the reporting currency.
    pub fn new(base: &str, overrides: &BTreeMap<String, Decimal>) -> Self {
        let mut rates = Self::default();
        rates.base = normalize_code(base, BASE_CURRENCY);
        for (code, rate) in overrides {
            rates.set_rate(code, *rate);
        }
        rates
    }

    /// The currency that totals are reported in.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Sets the rate for `code`. Rates must be positive; others are ignored.
    pub fn set_rate(&mut self, code: &str, rate: Decimal) {
        if rate <= Decimal::ZERO {
            warn!("Ignoring non-positive exchange rate {rate} for {code}");
            return;
        }
        self.rates.insert(normalize_code(code, &self.base), rate);
    }

    /// The rate for `code`, or 1 when the code is unknown.
    pub fn rate(&self, code: &str) -> Decimal {
        self.rates
            .get(&code.trim().to_ascii_uppercase())
            .copied()
            .unwrap_or(Decimal::ONE)
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.rates.contains_key(&code.trim().to_ascii_uppercase())
    }

    /// Converts `amount` from one currency to another. Identical codes return `amount` untouched
    /// and unknown codes are treated as already being in USD.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Decimal {
        if from.trim().eq_ignore_ascii_case(to.trim()) {
            return amount;
        }
        let usd = amount.checked_div(self.rate(from)).unwrap_or(amount);
        usd.checked_mul(self.rate(to)).unwrap_or(usd)
    }
}

/// Totals for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyStat {
    pub currency: String,
    pub total_fuel_cost: Decimal,
    pub total_expenses: Decimal,
    pub total_income: Decimal,
    pub net_cost: Decimal,
    /// Fuel, expense and income records together.
    pub entry_count: usize,
}

impl CurrencyStat {
    fn new(currency: String) -> Self {
        Self {
            currency,
            total_fuel_cost: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            total_income: Decimal::ZERO,
            net_cost: Decimal::ZERO,
            entry_count: 0,
        }
    }
}

/// Per-currency statistics plus the grand total converted into the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySummary {
    pub stats: Vec<CurrencyStat>,
    pub base_currency: String,
    pub total_in_base: Decimal,
}

#[derive(Clone, Copy)]
enum Bucket {
    Fuel,
    Expense,
    Income,
}

/// Accumulates fuel costs, expenses and income per currency. Records without a numeric amount are
/// skipped, as are amounts that would overflow their running total. Currencies with no
/// contributing records do not appear. Stats are ordered by code.
pub fn calculate_currency_stats(
    fuel: &[&FuelEntry],
    expenses: &[&ExpenseEntry],
    incomes: &[&IncomeEntry],
    rates: &ExchangeRates,
) -> Vec<CurrencyStat> {
    let mut stats: BTreeMap<String, CurrencyStat> = BTreeMap::new();
    let mut add = |currency: &str, amount: Decimal, bucket: Bucket| {
        let code = normalize_code(currency, rates.base());
        let stat = stats
            .entry(code.clone())
            .or_insert_with(|| CurrencyStat::new(code));
        let total = match bucket {
            Bucket::Fuel => &mut stat.total_fuel_cost,
            Bucket::Expense => &mut stat.total_expenses,
            Bucket::Income => &mut stat.total_income,
        };
        match total.checked_add(amount) {
            Some(sum) => {
                *total = sum;
                stat.entry_count += 1;
            }
            None => warn!("Skipping {amount} {}: the total would overflow", stat.currency),
        }
    };

    for e in fuel {
        if let Some(cost) = e.cost() {
            add(e.currency(), cost.value(), Bucket::Fuel);
        }
    }
    for e in expenses {
        if let Some(amount) = e.amount() {
            add(e.currency(), amount.value(), Bucket::Expense);
        }
    }
    for e in incomes {
        if let Some(amount) = e.amount() {
            add(e.currency(), amount.value(), Bucket::Income);
        }
    }

    stats
        .into_values()
        .map(|mut stat| {
            stat.net_cost = net_cost(&stat);
            stat
        })
        .collect()
}

/// Fuel plus expenses minus income, clamped to the `Decimal` range when it does not fit.
fn net_cost(stat: &CurrencyStat) -> Decimal {
    stat.total_fuel_cost
        .checked_add(stat.total_expenses)
        .and_then(|spent| spent.checked_sub(stat.total_income))
        .unwrap_or_else(|| {
            warn!("Net cost for {} is out of range", stat.currency);
            stat.total_fuel_cost
                .saturating_add(stat.total_expenses)
                .saturating_sub(stat.total_income)
        })
}

/// Builds the full summary: per-currency stats and the sum of every currency's net converted into
/// the base currency.
pub fn summarize(
    fuel: &[&FuelEntry],
    expenses: &[&ExpenseEntry],
    incomes: &[&IncomeEntry],
    rates: &ExchangeRates,
) -> CurrencySummary {
    let stats = calculate_currency_stats(fuel, expenses, incomes, rates);
    let total_in_base = stats.iter().fold(Decimal::ZERO, |total, s| {
        if !rates.is_known(&s.currency) {
            trace!("No exchange rate for {}, treating as {BASE_CURRENCY}", s.currency);
        }
        let converted = rates.convert(s.net_cost, &s.currency, rates.base());
        total.checked_add(converted).unwrap_or_else(|| {
            warn!("Leaving {} out of the total: it would overflow", s.currency);
            total
        })
    });
    CurrencySummary {
        stats,
        base_currency: rates.base().to_string(),
        total_in_base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fuel(id: &str, cost: &str, currency: &str) -> FuelEntry {
        let mut e = FuelEntry::new(id, "v1", "2024-01-05");
        e.cost = Some(Amount::new(d(cost)));
        e.currency = currency.into();
        e
    }

    fn expense(id: &str, amount: &str, currency: &str) -> ExpenseEntry {
        let mut e = ExpenseEntry::new(id, "v1", "2024-01-05");
        e.amount = Some(Amount::new(d(amount)));
        e.currency = currency.into();
        e
    }

    fn income(id: &str, amount: &str, currency: &str) -> IncomeEntry {
        let mut e = IncomeEntry::new(id, "v1", "2024-01-05");
        e.amount = Some(Amount::new(d(amount)));
        e.currency = currency.into();
        e
    }

    #[test]
    fn test_convert_identity_and_unknown() {
        let rates = ExchangeRates::default();
        assert_eq!(rates.convert(d("100"), "USD", "USD"), d("100"));
        assert_eq!(rates.convert(d("100"), "UNKNOWN", "USD"), d("100"));
        assert_eq!(rates.convert(d("100"), "XYZ", "XYZ"), d("100"));
        assert_eq!(rates.convert(d("100"), "usd", "EUR"), d("92"));
        assert_eq!(rates.convert(d("92"), "EUR", "USD"), d("100"));
    }

    #[test]
    fn test_convert_pivots_through_usd() {
        let rates = ExchangeRates::default();
        // 0.92 EUR per USD and 0.79 GBP per USD
        assert_eq!(rates.convert(d("9.2"), "EUR", "GBP"), d("7.9"));
    }

    #[test]
    fn test_overrides_and_bad_rates() {
        let mut overrides = BTreeMap::new();
        overrides.insert("eur".to_string(), d("0.5"));
        overrides.insert("GBP".to_string(), d("0"));
        let rates = ExchangeRates::new("usd", &overrides);
        assert_eq!(rates.base(), "USD");
        assert_eq!(rates.rate("EUR"), d("0.5"));
        assert_eq!(rates.rate("GBP"), d("0.79"));
        assert_eq!(rates.rate("NOPE"), Decimal::ONE);
    }

    #[test]
    fn test_two_usd_fills() {
        let a = fuel("a", "50", "USD");
        let b = fuel("b", "75", "USD");
        let stats = calculate_currency_stats(&[&a, &b], &[], &[], &ExchangeRates::default());
        assert_eq!(
            stats,
            vec![CurrencyStat {
                currency: "USD".to_string(),
                total_fuel_cost: d("125"),
                total_expenses: Decimal::ZERO,
                total_income: Decimal::ZERO,
                net_cost: d("125"),
                entry_count: 2,
            }]
        );
    }

    #[test]
    fn test_net_and_entry_count_span_all_categories() {
        let f = fuel("f", "40", "EUR");
        let e = expense("e", "100", "eur");
        let i = income("i", "30", "EUR");
        let stats = calculate_currency_stats(&[&f], &[&e], &[&i], &ExchangeRates::default());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].currency, "EUR");
        assert_eq!(stats[0].net_cost, d("110"));
        assert_eq!(stats[0].entry_count, 3);
    }

    #[test]
    fn test_missing_amounts_are_skipped() {
        let priced = fuel("a", "10", "USD");
        let mut unpriced = FuelEntry::new("b", "v1", "2024-01-06");
        unpriced.currency = "JPY".into();
        let stats =
            calculate_currency_stats(&[&priced, &unpriced], &[], &[], &ExchangeRates::default());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].entry_count, 1);
    }

    #[test]
    fn test_overflowing_amounts_are_skipped() {
        let mut a = FuelEntry::new("a", "v1", "2024-01-06");
        a.cost = Some(Amount::new(Decimal::MAX));
        a.currency = "USD".into();
        let b = a.clone();
        let stats = calculate_currency_stats(&[&a, &b], &[], &[], &ExchangeRates::default());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_fuel_cost, Decimal::MAX);
        assert_eq!(stats[0].net_cost, Decimal::MAX);
        assert_eq!(stats[0].entry_count, 1);
    }

    #[test]
    fn test_huge_totals_do_not_panic() {
        let mut usd = FuelEntry::new("u", "v1", "2024-01-06");
        usd.cost = Some(Amount::new(Decimal::MAX));
        usd.currency = "USD".into();
        let mut eur = ExpenseEntry::new("e", "v1", "2024-01-06");
        eur.amount = Some(Amount::new(Decimal::MAX));
        eur.currency = "EUR".into();
        let mut more = expense("m", "1", "USD");
        more.amount = Some(Amount::new(Decimal::MAX));
        let summary = summarize(&[&usd], &[&eur, &more], &[], &ExchangeRates::default());
        let usd_stat = summary.stats.iter().find(|s| s.currency == "USD").unwrap();
        assert_eq!(usd_stat.net_cost, Decimal::MAX);
        assert_eq!(summary.total_in_base, Decimal::MAX);
    }

    #[test]
    fn test_empty_currency_is_base() {
        let e = expense("e", "12", "");
        let stats = calculate_currency_stats(&[], &[&e], &[], &ExchangeRates::default());
        assert_eq!(stats[0].currency, "USD");
    }

    #[test]
    fn test_summary_total_in_base() {
        let f = fuel("f", "50", "USD");
        let e = expense("e", "92", "EUR");
        let i = income("i", "10", "ABC");
        let summary = summarize(&[&f], &[&e], &[&i], &ExchangeRates::default());
        let codes: Vec<&str> = summary.stats.iter().map(|s| s.currency.as_str()).collect();
        assert_eq!(codes, vec!["ABC", "EUR", "USD"]);
        // 50 USD + 100 USD from EUR - 10 from the unknown currency at rate 1
        assert_eq!(summary.total_in_base, d("140"));
        assert_eq!(summary.base_currency, "USD");
    }
}
