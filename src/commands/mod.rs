//! Command handlers for the vledger CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod convert;
mod export;
mod init;
mod list;
mod options;
mod stats;

use crate::args::ViewArgs;
use crate::model::RecordKind;
use crate::table::{Direction, Filter, SortDescriptor, TableConfig, TableEngine};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use convert::{convert, Conversion};
pub use export::export;
pub use init::init;
pub use list::{list, ListPage};
pub use options::{options, FieldOptions};
pub use stats::stats;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data and a human-readable report.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,

    /// Lines written to stdout, e.g. a rendered table.
    #[serde(skip)]
    report: Vec<String>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
            report: Vec::new(),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
            report: Vec::new(),
        }
    }

    /// Attach lines to be written to stdout.
    pub fn with_report(mut self, report: Vec<String>) -> Self {
        self.report = report;
        self
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    pub fn report(&self) -> &[String] {
        &self.report
    }

    /// Print the report to stdout, the message to `info!` and the structured data (if it exists)
    /// as JSON to `debug!`.
    pub fn print(&self) {
        for line in &self.report {
            println!("{line}");
        }
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Builds the table state described by the search, filter and sort options.
pub(crate) fn table_engine(kind: RecordKind, view: &ViewArgs) -> TableEngine {
    let mut engine = TableEngine::new(TableConfig::for_kind(kind));
    if let Some(query) = view.search() {
        engine.set_search(query);
    }
    for pair in view.filters() {
        engine.update_filter(pair.field(), pair.value());
    }
    for list in view.any() {
        engine.set_filter(list.field(), Filter::any_of(list.values().iter().cloned()));
    }
    if view.from().is_some() || view.to().is_some() {
        let date_field = engine.config().date_field();
        engine.set_filter(date_field, Filter::date_range(view.from(), view.to()));
    }
    match (view.sort(), view.direction()) {
        (Some(field), direction) => engine.set_sort(SortDescriptor::new(
            field,
            direction.unwrap_or(Direction::Asc),
        )),
        (None, Some(direction)) => {
            let field = engine.sort().field.clone();
            engine.set_sort(SortDescriptor::new(field, direction));
        }
        (None, None) => {}
    }
    engine
}
