//! JSON API handlers
//!
//! List endpoints take the same query string as the grid pages and answer
//! with the filtered view plus the canonical query that produced it.

use crate::catalog::skill::skill_view;
use crate::catalog::{GridSpec, ITEM_GRID, Item, PAL_GRID, Pal, Skill};
use crate::core::codec::QueryString;
use crate::core::error::{PalbookError, RecordError};
use crate::core::query::PARAM_SEARCH;
use crate::core::record::Record;
use crate::server::host::SiteHost;
use axum::Json;
use axum::extract::{Path, RawQuery, State};
use serde::Serialize;
use serde_json::Value;

/// Response for list endpoints
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    pub count: usize,
    /// Canonical query string (defaults omitted)
    pub query: String,
}

pub async fn list_items(
    State(host): State<SiteHost>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListResponse<Item>>, PalbookError> {
    list_view(&ITEM_GRID, host.catalog.items.records(), query).map(Json)
}

pub async fn list_pals(
    State(host): State<SiteHost>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListResponse<Pal>>, PalbookError> {
    list_view(&PAL_GRID, host.catalog.pals.records(), query).map(Json)
}

pub async fn list_skills(
    State(host): State<SiteHost>,
    RawQuery(query): RawQuery,
) -> Json<ListResponse<Skill>> {
    let mut query = QueryString::parse(query.as_deref().unwrap_or(""));
    let search = query.get(PARAM_SEARCH).unwrap_or("").to_string();
    let results: Vec<_> = skill_view(host.catalog.skills.records(), &search)
        .into_iter()
        .cloned()
        .collect();

    let mut canonical = QueryString::new();
    if let Some(search) = query.remove(PARAM_SEARCH).filter(|s| !s.is_empty()) {
        canonical.insert(PARAM_SEARCH, search);
    }
    Json(ListResponse {
        count: results.len(),
        query: canonical.encode(),
        results,
    })
}

fn list_view<R: Record + Clone>(
    grid: &GridSpec,
    records: &[R],
    query: Option<String>,
) -> Result<ListResponse<R>, PalbookError> {
    let table = grid.param_table();
    let state = table.decode(&QueryString::parse(query.as_deref().unwrap_or("")));
    let results: Vec<R> = grid.view(records, &state).into_iter().cloned().collect();
    Ok(ListResponse {
        count: results.len(),
        query: table.encode(&state)?.encode(),
        results,
    })
}

/// `GET /api/{catalog}/{id}`
pub async fn get_record(
    State(host): State<SiteHost>,
    Path((catalog, id)): Path<(String, String)>,
) -> Result<Json<Value>, PalbookError> {
    let data = &host.catalog;
    let value = match catalog.as_str() {
        "items" => data.items.get(&id).map(serde_json::to_value),
        "pals" => data.pals.get(&id).map(serde_json::to_value),
        "skills" => data.skills.get(&id).map(serde_json::to_value),
        "recipes" => data.recipes.get(&id).map(serde_json::to_value),
        _ => {
            return Err(RecordError::UnknownCatalog {
                catalog: catalog.clone(),
            }
            .into());
        }
    };

    match value {
        Some(Ok(value)) => Ok(Json(value)),
        Some(Err(e)) => Err(PalbookError::Internal(e.to_string())),
        None => Err(RecordError::NotFound { catalog, id }.into()),
    }
}
