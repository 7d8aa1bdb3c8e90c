//! Query-state store: the URL as a typed, history-aware parameter store
//!
//! Each recognized parameter is exposed as a `(value, set_value)` pair.
//! Reads decode the current history entry; writes encode one parameter into
//! a copy of the current query and commit it.
//!
//! # History policy
//!
//! Every committed change pushes a new history entry, except a search commit
//! made while the current entry was itself produced by a search commit: that
//! one replaces the entry, so a burst of typing leaves one entry behind.

use crate::core::codec::{ParamValue, QueryString};
use crate::core::error::QueryError;
use crate::core::history::{EntryOrigin, HistoryMode, NavigationHistory};
use crate::core::query::{
    PARAM_CATEGORIES, PARAM_RARITY, PARAM_SEARCH, PARAM_SORT, PARAM_SORT_DIRECTION, ParamTable,
    QueryState, SortDirection,
};
use crate::core::rarity::Rarity;

#[derive(Debug, Clone)]
pub struct QueryStateStore {
    table: ParamTable,
    history: NavigationHistory,
}

impl QueryStateStore {
    /// Open a store on the query part of the initial URL
    pub fn new(table: ParamTable, initial_query: &str) -> Self {
        Self {
            table,
            history: NavigationHistory::new(QueryString::parse(initial_query)),
        }
    }

    pub fn table(&self) -> &ParamTable {
        &self.table
    }

    pub fn query(&self) -> &QueryString {
        &self.history.current().query
    }

    /// Current query string, encoded
    pub fn url_query(&self) -> String {
        self.query().encode()
    }

    /// Decoded typed state of the current entry
    pub fn state(&self) -> QueryState {
        self.table.decode(self.query())
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Navigate to a new URL query (link click, pasted URL)
    pub fn navigate(&mut self, raw_query: &str) -> bool {
        self.history.commit(
            QueryString::parse(raw_query),
            HistoryMode::Push,
            EntryOrigin::Navigation,
        )
    }

    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }

    /// Read a parameter by name
    pub fn get(&self, name: &str) -> Result<ParamValue, QueryError> {
        self.table.get(self.query(), name)
    }

    /// Write a parameter by name; returns whether the URL changed
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<bool, QueryError> {
        let mut next = self.query().clone();
        self.table.set(&mut next, name, &value)?;

        let origin = if name == PARAM_SEARCH {
            EntryOrigin::Search
        } else {
            EntryOrigin::Filter
        };
        let mode = if origin == EntryOrigin::Search
            && self.history.current().origin == EntryOrigin::Search
        {
            HistoryMode::Replace
        } else {
            HistoryMode::Push
        };

        Ok(self.history.commit(next, mode, origin))
    }

    /// Drop every recognized parameter, keeping foreign ones
    pub fn clear(&mut self) -> Result<bool, QueryError> {
        let mut next = self.query().clone();
        for spec in self.table.specs() {
            next.remove(spec.name);
        }
        Ok(self
            .history
            .commit(next, HistoryMode::Push, EntryOrigin::Filter))
    }

    pub fn search(&self) -> String {
        self.state().search
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> Result<bool, QueryError> {
        self.set(PARAM_SEARCH, ParamValue::Text(search.into()))
    }

    pub fn sort(&self) -> String {
        self.state().sort
    }

    pub fn set_sort(&mut self, sort: impl Into<String>) -> Result<bool, QueryError> {
        self.set(PARAM_SORT, ParamValue::Text(sort.into()))
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.state().sort_direction
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) -> Result<bool, QueryError> {
        self.set(
            PARAM_SORT_DIRECTION,
            ParamValue::Text(direction.as_str().to_string()),
        )
    }

    pub fn categories(&self) -> Vec<String> {
        self.state().categories
    }

    pub fn set_categories(&mut self, categories: Vec<String>) -> Result<bool, QueryError> {
        self.set(PARAM_CATEGORIES, ParamValue::List(categories))
    }

    pub fn rarity(&self) -> Vec<Rarity> {
        self.state().rarity
    }

    pub fn set_rarity(&mut self, rarity: Vec<Rarity>) -> Result<bool, QueryError> {
        self.set(
            PARAM_RARITY,
            ParamValue::List(rarity.iter().map(|r| r.label().to_string()).collect()),
        )
    }
}
