//! Navigation history of a browsing tab

use crate::core::codec::QueryString;

/// What produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    /// Initial load or explicit navigation to a URL
    Navigation,
    /// A committed (debounced) search value
    Search,
    /// Sort, direction, category or rarity change
    Filter,
}

/// How a change is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// New entry; forward entries are discarded
    Push,
    /// Overwrite the current entry in place
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query: QueryString,
    pub origin: EntryOrigin,
}

/// Linear back/forward history, like a browser session history
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl NavigationHistory {
    pub fn new(initial: QueryString) -> Self {
        Self {
            entries: vec![HistoryEntry {
                query: initial,
                origin: EntryOrigin::Navigation,
            }],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// Record a query; returns false when it equals the current entry
    pub fn commit(&mut self, query: QueryString, mode: HistoryMode, origin: EntryOrigin) -> bool {
        if self.current().query == query {
            return false;
        }

        let entry = HistoryEntry { query, origin };
        match mode {
            HistoryMode::Push => {
                self.entries.truncate(self.cursor + 1);
                self.entries.push(entry);
                self.cursor += 1;
            }
            HistoryMode::Replace => {
                self.entries[self.cursor] = entry;
            }
        }
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
