//! Interactive browsing session over one catalog grid
//!
//! Models a single tab: a query-state store bound to the URL, a debounced
//! search box and the current view. Everything runs on the caller's thread;
//! the caller feeds input events and clock ticks.

use crate::core::debounce::Debouncer;
use crate::core::error::QueryError;
use crate::core::pipeline::{UnrankedRarity, view_with};
use crate::core::query::{ParamTable, QueryState, SortDirection};
use crate::core::rarity::Rarity;
use crate::core::record::Record;
use crate::core::store::QueryStateStore;
use std::time::{Duration, Instant};

pub struct BrowseSession<'a, R: Record> {
    records: &'a [R],
    store: QueryStateStore,
    search_input: Debouncer<String>,
    search_echo: String,
    current: Vec<&'a R>,
    recomputations: usize,
    unranked: UnrankedRarity,
}

impl<'a, R: Record> BrowseSession<'a, R> {
    /// Open a session on `initial_query` and compute the first view
    pub fn open(records: &'a [R], table: ParamTable, initial_query: &str, quiescence: Duration) -> Self {
        let store = QueryStateStore::new(table, initial_query);
        let state = store.state();
        Self {
            records,
            current: view_with(records, &state, UnrankedRarity::Exclude),
            search_echo: state.search,
            store,
            search_input: Debouncer::new(quiescence),
            recomputations: 0,
            unranked: UnrankedRarity::Exclude,
        }
    }

    /// Use `unranked` for tiers outside the rarity table. The first view is
    /// recomputed without counting as a recomputation.
    pub fn with_unranked_rarity(mut self, unranked: UnrankedRarity) -> Self {
        self.unranked = unranked;
        self.current = view_with(self.records, &self.store.state(), unranked);
        self
    }

    /// Records currently shown
    pub fn view(&self) -> &[&'a R] {
        &self.current
    }

    /// Text shown in the search box (updated on every keystroke)
    pub fn search_echo(&self) -> &str {
        &self.search_echo
    }

    /// Number of pipeline runs since the session opened
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn state(&self) -> QueryState {
        self.store.state()
    }

    pub fn url_query(&self) -> String {
        self.store.url_query()
    }

    pub fn store(&self) -> &QueryStateStore {
        &self.store
    }

    /// When the pending search input becomes due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search_input.deadline()
    }

    /// A keystroke in the search box
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.search_echo = text.clone();
        self.search_input.push(text, now);
    }

    /// Advance the clock; commits a due search value. Returns whether the
    /// view was recomputed.
    pub fn tick(&mut self, now: Instant) -> Result<bool, QueryError> {
        match self.search_input.poll(now) {
            Some(search) => {
                let changed = self.store.set_search(search)?;
                Ok(self.refresh(changed))
            }
            None => Ok(false),
        }
    }

    /// Commit pending search input immediately (e.g. Enter pressed)
    pub fn submit_search(&mut self) -> Result<bool, QueryError> {
        match self.search_input.flush() {
            Some(search) => {
                let changed = self.store.set_search(search)?;
                Ok(self.refresh(changed))
            }
            None => Ok(false),
        }
    }

    pub fn set_sort(&mut self, sort: &str) -> Result<bool, QueryError> {
        let changed = self.store.set_sort(sort)?;
        Ok(self.refresh(changed))
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) -> Result<bool, QueryError> {
        let changed = self.store.set_sort_direction(direction)?;
        Ok(self.refresh(changed))
    }

    pub fn toggle_category(&mut self, category: &str) -> Result<bool, QueryError> {
        let next = self.store.state().toggle_category(category);
        let changed = self.store.set_categories(next.categories)?;
        Ok(self.refresh(changed))
    }

    pub fn toggle_rarity(&mut self, rarity: Rarity) -> Result<bool, QueryError> {
        let next = self.store.state().toggle_rarity(rarity);
        let changed = self.store.set_rarity(next.rarity)?;
        Ok(self.refresh(changed))
    }

    pub fn clear_filters(&mut self) -> Result<bool, QueryError> {
        self.search_input.discard();
        let changed = self.store.clear()?;
        self.search_echo = self.store.search();
        Ok(self.refresh(changed))
    }

    /// Browser back button
    pub fn back(&mut self) -> bool {
        let moved = self.store.back();
        self.after_history_move(moved)
    }

    /// Browser forward button
    pub fn forward(&mut self) -> bool {
        let moved = self.store.forward();
        self.after_history_move(moved)
    }

    fn after_history_move(&mut self, moved: bool) -> bool {
        if moved {
            self.search_input.discard();
            self.search_echo = self.store.search();
        }
        self.refresh(moved)
    }

    fn refresh(&mut self, changed: bool) -> bool {
        if changed {
            self.current = view_with(self.records, &self.store.state(), self.unranked);
            self.recomputations += 1;
        }
        changed
    }
}
