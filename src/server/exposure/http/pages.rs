//! HTML page handlers
//!
//! Grids are rendered from the request's query string on every request.
//! Unknown ids render the not-found page with a 404 status, never an error.

use crate::catalog::grid::title_case;
use crate::catalog::skill::skill_view;
use crate::catalog::{GridSpec, ITEM_GRID, Item, PAL_GRID};
use crate::core::codec::QueryString;
use crate::core::error::PalbookError;
use crate::core::query::PARAM_SEARCH;
use crate::core::rarity::Rarity;
use crate::core::record::{AttrValue, Record};
use crate::server::host::SiteHost;
use axum::extract::{Path, RawQuery, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tera::Context;

#[derive(Serialize)]
struct StatRow {
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct MaterialRow<'a> {
    id: &'a str,
    name: &'a str,
    count: i64,
}

#[derive(Serialize)]
struct WorkRow {
    label: String,
    level: i64,
}

#[derive(Serialize)]
struct NotFoundPage<'a> {
    kind: &'a str,
    id: &'a str,
}

#[derive(Serialize)]
struct SkillRow<'a> {
    name: &'a str,
    element: &'a str,
    level: i64,
    description: &'a str,
}

pub async fn index(State(host): State<SiteHost>) -> Result<Html<String>, PalbookError> {
    let mut context = Context::new();
    context.insert("items", &host.catalog.items.len());
    context.insert("pals", &host.catalog.pals.len());
    context.insert("skills", &host.catalog.skills.len());
    Ok(Html(host.renderer.render("index.html", &context)?))
}

pub async fn item_grid(
    State(host): State<SiteHost>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PalbookError> {
    render_grid(&host, &ITEM_GRID, host.catalog.items.records(), query)
}

pub async fn pal_grid(
    State(host): State<SiteHost>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PalbookError> {
    render_grid(&host, &PAL_GRID, host.catalog.pals.records(), query)
}

fn render_grid<R: Record>(
    host: &SiteHost,
    grid: &GridSpec,
    records: &[R],
    query: Option<String>,
) -> Result<Html<String>, PalbookError> {
    let page = grid.page(records, query.as_deref().unwrap_or(""))?;
    tracing::debug!(
        catalog = grid.catalog,
        query = %page.query,
        count = page.count,
        "grid rendered"
    );

    let mut context = Context::new();
    context.insert("page", &page);
    context.insert("debounce_ms", &host.debounce_ms());
    Ok(Html(host.renderer.render("grid.html", &context)?))
}

pub async fn item_detail(
    State(host): State<SiteHost>,
    Path(id): Path<String>,
) -> Result<Response, PalbookError> {
    let catalog = &host.catalog;
    let Some(item) = catalog.items.get(&id) else {
        return not_found(&host, ITEM_GRID.kind, &id);
    };

    let mut context = Context::new();
    context.insert("item", item);
    context.insert("category", &title_case(&item.type_a));
    context.insert(
        "rarity",
        Rarity::from_tier(item.rarity)
            .map(Rarity::label)
            .unwrap_or("unknown"),
    );
    context.insert("stats", &item_stats(item));

    if let Some(recipe) = catalog.recipe_for(&item.id) {
        let materials: Vec<MaterialRow> = recipe
            .materials
            .iter()
            .map(|material| MaterialRow {
                id: &material.item_id,
                name: catalog
                    .items
                    .get(&material.item_id)
                    .map(|i| i.name.as_str())
                    .unwrap_or(&material.item_id),
                count: material.count,
            })
            .collect();
        context.insert("recipe", recipe);
        context.insert("materials", &materials);
    }

    Ok(Html(host.renderer.render("item.html", &context)?).into_response())
}

/// Non-zero numeric stats, labelled as in the sort menu
fn item_stats(item: &Item) -> Vec<StatRow> {
    ITEM_GRID
        .sorts
        .iter()
        .filter_map(|option| {
            let value = item.stat(option.key)?;
            (value != 0.0).then(|| StatRow {
                label: option.label,
                value: AttrValue::Number(value).to_string(),
            })
        })
        .collect()
}

pub async fn pal_detail(
    State(host): State<SiteHost>,
    Path(id): Path<String>,
) -> Result<Response, PalbookError> {
    let catalog = &host.catalog;
    let Some(pal) = catalog.pals.get(&id) else {
        return not_found(&host, PAL_GRID.kind, &id);
    };

    let suited_work: Vec<WorkRow> = pal
        .suited_work()
        .into_iter()
        .map(|(work, level)| WorkRow {
            label: title_case(work),
            level,
        })
        .collect();
    let skills: Vec<SkillRow> = catalog
        .pal_skills(pal)
        .into_iter()
        .map(|(skill, level)| SkillRow {
            name: &skill.name,
            element: &skill.element,
            level,
            description: &skill.description,
        })
        .collect();

    let mut context = Context::new();
    context.insert("pal", pal);
    context.insert("paldeck", &pal.paldeck_label());
    context.insert("elements", &pal.elements());
    context.insert("suited_work", &suited_work);
    context.insert("skills", &skills);
    Ok(Html(host.renderer.render("pal.html", &context)?).into_response())
}

pub async fn skill_list(
    State(host): State<SiteHost>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PalbookError> {
    let query = QueryString::parse(query.as_deref().unwrap_or(""));
    let search = query.get(PARAM_SEARCH).unwrap_or("");
    let skills = skill_view(host.catalog.skills.records(), search);

    let mut context = Context::new();
    context.insert("search", search);
    context.insert("skills", &skills);
    Ok(Html(host.renderer.render("skills.html", &context)?))
}

/// Fallback for paths no route matches
pub async fn unknown_page(State(host): State<SiteHost>, uri: Uri) -> Result<Response, PalbookError> {
    not_found(&host, "page", uri.path())
}

fn not_found(host: &SiteHost, kind: &str, id: &str) -> Result<Response, PalbookError> {
    tracing::warn!(kind, id, "no record for id");
    let html = host
        .renderer
        .render_value("not_found.html", &NotFoundPage { kind, id })?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
