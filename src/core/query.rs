//! Query state: the filter/sort/search parameters persisted in the URL
//!
//! # Parameters
//!
//! ```text
//! search         free text             default ""
//! sort           one sortable key      default catalog-specific ("name" for items)
//! sortDirection  asc | desc            default asc
//! categories     comma-delimited set   default empty (no category filter)
//! rarity         comma-delimited set   default empty (no rarity filter)
//! ```
//!
//! # Example
//! ```text
//! GET /items?search=axe&sort=price&sortDirection=desc
//! GET /items?categories=weapon,tool&rarity=rare,epic
//! ```

use crate::core::codec::{ParamSpec, ParamValue, QueryString};
use crate::core::error::QueryError;
use crate::core::rarity::Rarity;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PARAM_SEARCH: &str = "search";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_SORT_DIRECTION: &str = "sortDirection";
pub const PARAM_CATEGORIES: &str = "categories";
pub const PARAM_RARITY: &str = "rarity";

/// Default sort key of catalogs that don't override it
pub const DEFAULT_SORT: &str = "name";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The codec table of one catalog grid
///
/// Holds a [`ParamSpec`] per recognized parameter. The sortable keys and the
/// default sort differ per catalog; the other entries are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTable {
    specs: Vec<ParamSpec>,
    sort_keys: Vec<String>,
    default_sort: String,
}

impl ParamTable {
    /// Build the table for a grid sortable by `sort_keys`
    pub fn new(sort_keys: Vec<String>, default_sort: &str) -> Self {
        let mut sort_keys = sort_keys;
        if !sort_keys.iter().any(|k| k == default_sort) {
            sort_keys.push(default_sort.to_string());
        }

        let specs = vec![
            ParamSpec::text(PARAM_SEARCH, ""),
            ParamSpec::choice(PARAM_SORT, sort_keys.clone(), default_sort),
            ParamSpec::choice(
                PARAM_SORT_DIRECTION,
                vec!["asc".to_string(), "desc".to_string()],
                SortDirection::Asc.as_str(),
            ),
            ParamSpec::list(PARAM_CATEGORIES, None),
            ParamSpec::list(PARAM_RARITY, Some(Rarity::labels())),
        ];

        Self {
            specs,
            sort_keys,
            default_sort: default_sort.to_string(),
        }
    }

    pub fn spec(&self, name: &str) -> Result<&ParamSpec, QueryError> {
        self.specs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| QueryError::UnknownParameter {
                name: name.to_string(),
            })
    }

    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    pub fn sort_keys(&self) -> &[String] {
        &self.sort_keys
    }

    pub fn default_sort(&self) -> &str {
        &self.default_sort
    }

    /// Read a single parameter
    pub fn get(&self, query: &QueryString, name: &str) -> Result<ParamValue, QueryError> {
        Ok(self.spec(name)?.read(query))
    }

    /// Write a single parameter, leaving every other parameter untouched
    pub fn set(
        &self,
        query: &mut QueryString,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), QueryError> {
        self.spec(name)?.write(query, value)
    }

    /// Decode the full typed state
    pub fn decode(&self, query: &QueryString) -> QueryState {
        let text = |name: &str| {
            self.get(query, name)
                .ok()
                .and_then(ParamValue::into_text)
                .unwrap_or_default()
        };
        let list = |name: &str| {
            self.get(query, name)
                .ok()
                .and_then(ParamValue::into_list)
                .unwrap_or_default()
        };

        QueryState {
            search: text(PARAM_SEARCH),
            sort: text(PARAM_SORT),
            sort_direction: SortDirection::parse(&text(PARAM_SORT_DIRECTION)).unwrap_or_default(),
            categories: list(PARAM_CATEGORIES),
            rarity: list(PARAM_RARITY)
                .iter()
                .filter_map(|label| Rarity::from_label(label))
                .collect(),
        }
    }

    /// Write the full typed state into `query`, preserving foreign parameters
    pub fn encode_into(&self, state: &QueryState, query: &mut QueryString) -> Result<(), QueryError> {
        self.set(query, PARAM_SEARCH, &ParamValue::Text(state.search.clone()))?;
        self.set(query, PARAM_SORT, &ParamValue::Text(state.sort.clone()))?;
        self.set(
            query,
            PARAM_SORT_DIRECTION,
            &ParamValue::Text(state.sort_direction.as_str().to_string()),
        )?;
        self.set(query, PARAM_CATEGORIES, &ParamValue::List(state.categories.clone()))?;
        self.set(
            query,
            PARAM_RARITY,
            &ParamValue::List(state.rarity.iter().map(|r| r.label().to_string()).collect()),
        )?;
        Ok(())
    }

    /// Canonical query string of a state (defaults omitted, no foreign params)
    pub fn encode(&self, state: &QueryState) -> Result<QueryString, QueryError> {
        let mut query = QueryString::new();
        self.encode_into(state, &mut query)?;
        Ok(query)
    }

    /// State with every parameter at its default
    pub fn default_state(&self) -> QueryState {
        self.decode(&QueryString::new())
    }
}

/// Typed, resolved query state of a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub search: String,
    pub sort: String,
    pub sort_direction: SortDirection,
    pub categories: Vec<String>,
    pub rarity: Vec<Rarity>,
}

impl QueryState {
    /// Copy of this state with `category` added or removed
    pub fn toggle_category(&self, category: &str) -> Self {
        let mut next = self.clone();
        if let Some(pos) = next.categories.iter().position(|c| c == category) {
            next.categories.remove(pos);
        } else {
            next.categories.push(category.to_string());
        }
        next
    }

    /// Copy of this state with `rarity` added or removed
    pub fn toggle_rarity(&self, rarity: Rarity) -> Self {
        let mut next = self.clone();
        if let Some(pos) = next.rarity.iter().position(|r| *r == rarity) {
            next.rarity.remove(pos);
        } else {
            next.rarity.push(rarity);
        }
        next
    }

    pub fn with_sort(&self, sort: &str) -> Self {
        Self {
            sort: sort.to_string(),
            ..self.clone()
        }
    }

    pub fn with_direction(&self, direction: SortDirection) -> Self {
        Self {
            sort_direction: direction,
            ..self.clone()
        }
    }
}
