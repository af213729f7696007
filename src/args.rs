//! These structs provide the CLI interface for the vledger CLI.

use crate::i18n::Locale;
use crate::model::{Amount, RecordKind};
use crate::table::Direction;
use anyhow::{anyhow, ensure};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// vledger: A command-line tool for browsing vehicle running costs.
///
/// Vehicles, fuel fill-ups, expenses and income are kept in a ledger file in the vledger home
/// directory. Records can be searched, filtered, sorted and paged through, summarized per
/// currency, and exported as CSV.
#[derive(Debug, Parser, Clone)]
#[command(name = "vledger")]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory with a default config.json and an empty ledger.json.
    ///
    /// Running it again rewrites config.json with defaults but keeps an existing ledger.
    Init,
    /// Show one page at a time of vehicles, fuel entries, expenses or income.
    List(ListArgs),
    /// Show fuel cost, expense and income totals per currency, and the net total in the base
    /// currency.
    Stats,
    /// Convert an amount between two currencies using the configured exchange rates.
    Convert(ConvertArgs),
    /// Write the records matching a search and filters to a CSV file.
    Export(ExportArgs),
    /// Show the values that a record type can be filtered by.
    Options(OptionsArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the ledger and configuration are held. Defaults to ~/vehicle-ledger
    #[arg(long, env = "VLEDGER_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Search, filter and sort options shared by `list` and `export`.
#[derive(Debug, Parser, Clone, Default)]
pub struct ViewArgs {
    /// Keep records where any searchable field contains this text (case-insensitive).
    #[arg(long)]
    search: Option<String>,

    /// Keep records whose field equals a value, e.g. --filter fuel_type=diesel. Repeatable.
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    filters: Vec<FieldValue>,

    /// Keep records whose field is one of several values, e.g. --any currency=USD,EUR.
    /// Repeatable.
    #[arg(long = "any", value_name = "FIELD=V1,V2")]
    any: Vec<FieldValues>,

    /// Earliest date to keep (YYYY-MM-DD), inclusive.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Latest date to keep (YYYY-MM-DD), inclusive.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// The field to sort by. Defaults to the date, newest first.
    #[arg(long)]
    sort: Option<String>,

    /// The sort direction. Defaults to asc when --sort is given.
    #[arg(long, value_enum)]
    direction: Option<Direction>,
}

impl ViewArgs {
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn filters(&self) -> &[FieldValue] {
        &self.filters
    }

    pub fn any(&self) -> &[FieldValues] {
        &self.any
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldValue {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_any(mut self, field: impl Into<String>, values: Vec<String>) -> Self {
        self.any.push(FieldValues {
            field: field.into(),
            values,
        });
        self
    }

    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: Option<Direction>) -> Self {
        self.sort = Some(field.into());
        self.direction = direction;
        self
    }
}

/// Args for the `vledger list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// The type of record to list.
    #[arg(value_enum)]
    kind: RecordKind,

    #[clap(flatten)]
    view: ViewArgs,

    /// How many times to load more after the first page. When the fetched records run out, each
    /// load fetches the next batch from the ledger instead.
    #[arg(long, default_value_t = 0)]
    pages: usize,

    /// Override the number of records per page from config.json.
    #[arg(long)]
    page_size: Option<usize>,
}

impl ListArgs {
    pub fn new(kind: RecordKind, view: ViewArgs, pages: usize) -> Self {
        Self {
            kind,
            view,
            pages,
            page_size: None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn view(&self) -> &ViewArgs {
        &self.view
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Args for the `vledger convert` command.
#[derive(Debug, Parser, Clone)]
pub struct ConvertArgs {
    /// The amount to convert, e.g. 100 or 1,250.50
    amount: Amount,

    /// The currency code of the amount, e.g. EUR
    from: String,

    /// The currency code to convert to, e.g. JPY
    to: String,
}

impl ConvertArgs {
    pub fn new(amount: Amount, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            amount,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

/// Args for the `vledger export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The type of record to export.
    #[arg(value_enum)]
    kind: RecordKind,

    #[clap(flatten)]
    view: ViewArgs,

    /// The file name to write in the export directory. Defaults to one that includes today's
    /// date, e.g. fuel-entries-2024-03-09.csv
    #[arg(long)]
    output: Option<String>,

    /// The language for column headers and Yes/No values. Defaults to the configured locale.
    #[arg(long, value_enum)]
    locale: Option<Locale>,
}

impl ExportArgs {
    pub fn new(kind: RecordKind, view: ViewArgs) -> Self {
        Self {
            kind,
            view,
            output: None,
            locale: None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn view(&self) -> &ViewArgs {
        &self.view
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }
}

/// Args for the `vledger options` command.
#[derive(Debug, Parser, Clone)]
pub struct OptionsArgs {
    /// The type of record.
    #[arg(value_enum)]
    kind: RecordKind,

    /// The language for labels. Defaults to the configured locale.
    #[arg(long, value_enum)]
    locale: Option<Locale>,
}

impl OptionsArgs {
    pub fn new(kind: RecordKind, locale: Option<Locale>) -> Self {
        Self { kind, locale }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }
}

/// A `field=value` pair from the command line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldValue {
    field: String,
    value: String,
}

impl FieldValue {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for FieldValue {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected FIELD=VALUE, got '{s}'"))?;
        let field = field.trim();
        ensure!(!field.is_empty(), "The field name is missing in '{s}'");
        Ok(Self {
            field: field.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// A `field=v1,v2` list from the command line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldValues {
    field: String,
    values: Vec<String>,
}

impl FieldValues {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl FromStr for FieldValues {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pair = FieldValue::from_str(s)?;
        let values = pair
            .value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            field: pair.field,
            values,
        })
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("vehicle-ledger"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or VLEDGER_HOME instead of relying on the default \
                directory. If you continue using the program right now, you may have problems!",
            );
            PathBuf::from("vehicle-ledger")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
