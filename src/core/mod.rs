//! Core module containing the record model, the query-state codec and the
//! filter/sort pipeline

pub mod codec;
pub mod debounce;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod query;
pub mod rarity;
pub mod record;
pub mod session;
pub mod store;
pub mod validation;

pub use codec::{ParamKind, ParamSpec, ParamValue, QueryString};
pub use debounce::{DEFAULT_QUIESCENCE, Debouncer};
pub use error::{
    ConfigError, DatasetError, ErrorResponse, PalbookError, QueryError, RecordError, RenderError,
};
pub use history::{EntryOrigin, HistoryEntry, HistoryMode, NavigationHistory};
pub use pipeline::{UnrankedRarity, category_facets, sort_records, view, view_with};
pub use query::{ParamTable, QueryState, SortDirection};
pub use rarity::Rarity;
pub use record::{AttrValue, Record};
pub use session::BrowseSession;
pub use store::QueryStateStore;
