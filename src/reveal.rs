//! Incremental reveal ("infinite scroll") over a filtered and sorted list of records.
//!
//! `Reveal` tracks how many records from the head of the list are visible. A load-more trigger
//! grows the window by one page while local records remain. Once the local records are exhausted
//! and the record source reports that more exist remotely, the trigger asks the source to fetch
//! instead; the window only moves again once new records arrive.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// The collaborator that can deliver more records than are currently held locally.
pub trait MoreSource {
    /// True when the remote side has records that have not been fetched yet.
    fn has_more(&self) -> bool;

    /// Start fetching the next batch. Called with no arguments and expected to return quickly; the
    /// new records show up in a later `sync`.
    fn fetch_more(&mut self);
}

/// The revealed prefix of the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page_size: usize,
    pub current_page_count: usize,
}

impl PageWindow {
    /// Number of records this window would show if enough were available.
    pub fn capacity(&self) -> usize {
        self.page_size.saturating_mul(self.current_page_count)
    }
}

/// What a load-more trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMore {
    /// The window grew by one page.
    Grew,
    /// Local records were exhausted, so the source was asked to fetch more.
    Fetched,
    /// A load was already in flight.
    Busy,
    /// Nothing left to show locally or remotely.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    window: PageWindow,
    last_len: Option<usize>,
    loading: bool,
    trigger: Trigger,
}

impl Reveal {
    pub fn new(page_size: usize) -> Self {
        Self {
            window: PageWindow {
                page_size: page_size.max(1),
                current_page_count: 1,
            },
            last_len: None,
            loading: false,
            trigger: Trigger::default(),
        }
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn page_size(&self) -> usize {
        self.window.page_size
    }

    /// Tell the engine about the list it is revealing, once per render. A change in length resets
    /// the window to one page; the same length with different contents keeps the window.
    pub fn sync(&mut self, len: usize) {
        if self.last_len != Some(len) {
            if self.last_len.is_some() {
                debug!(
                    "Record count changed from {:?} to {len}, resetting to one page",
                    self.last_len
                );
            }
            self.window.current_page_count = 1;
            self.last_len = Some(len);
        }
    }

    /// Asserted by the caller while a fetch is in flight.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// How many records of a list of length `len` are visible.
    pub fn visible_count(&self, len: usize) -> usize {
        self.window.capacity().min(len)
    }

    /// The visible head of `items`.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count(items.len())]
    }

    pub fn can_load_more(&self, len: usize, source: Option<&dyn MoreSource>) -> bool {
        self.visible_count(len) < len || source.map_or(false, |s| s.has_more())
    }

    /// Handle one load-more trigger for a list of length `len`.
    pub fn load_more(&mut self, len: usize, source: Option<&mut dyn MoreSource>) -> LoadMore {
        if self.loading {
            trace!("Ignoring load-more while loading");
            return LoadMore::Busy;
        }
        if self.visible_count(len) < len {
            self.window.current_page_count += 1;
            trace!(
                "Revealed page {} ({} of {len})",
                self.window.current_page_count,
                self.visible_count(len)
            );
            return LoadMore::Grew;
        }
        match source {
            Some(source) if source.has_more() => {
                debug!("Local records exhausted, fetching more");
                source.fetch_more();
                LoadMore::Fetched
            }
            _ => LoadMore::Exhausted,
        }
    }

    /// Feed a visibility observation of the load-more sentinel. Only the moment the sentinel comes
    /// into view triggers a load; staying in view does not trigger again.
    pub fn observe(
        &mut self,
        in_view: bool,
        len: usize,
        source: Option<&mut dyn MoreSource>,
    ) -> Option<LoadMore> {
        if self.trigger.observe(in_view) {
            Some(self.load_more(len, source))
        } else {
            None
        }
    }
}

/// Rising-edge latch over a visibility signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trigger {
    in_view: bool,
}

impl Trigger {
    /// Returns true only on a transition from out of view to in view.
    pub fn observe(&mut self, in_view: bool) -> bool {
        let fire = in_view && !self.in_view;
        self.in_view = in_view;
        fire
    }
}
