//! A record source that hands out a stored list in fixed-size batches.
//!
//! This stands in for a paginated API: only the first batch is held locally at first, and each
//! `fetch_more` makes the next batch available.

use crate::reveal::MoreSource;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PagedSource<T> {
    all: Vec<T>,
    fetch_size: usize,
    loaded: usize,
    fetches: usize,
}

impl<T> PagedSource<T> {
    /// Makes the first batch of `records` available.
    pub fn new(records: Vec<T>, fetch_size: usize) -> Self {
        let fetch_size = fetch_size.max(1);
        let loaded = fetch_size.min(records.len());
        Self {
            all: records,
            fetch_size,
            loaded,
            fetches: 0,
        }
    }

    /// The records fetched so far.
    pub fn records(&self) -> &[T] {
        &self.all[..self.loaded]
    }

    /// Number of records on the remote side, fetched or not.
    pub fn remote_total(&self) -> usize {
        self.all.len()
    }

    /// How many times `fetch_more` has loaded a batch.
    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl<T> MoreSource for PagedSource<T> {
    fn has_more(&self) -> bool {
        self.loaded < self.all.len()
    }

    fn fetch_more(&mut self) {
        if !self.has_more() {
            return;
        }
        let before = self.loaded;
        self.loaded = (self.loaded + self.fetch_size).min(self.all.len());
        self.fetches += 1;
        debug!(
            "Fetched records {}..{} of {}",
            before,
            self.loaded,
            self.all.len()
        );
    }
}
