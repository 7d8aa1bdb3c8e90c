//! Presentation grids
//!
//! A [`GridSpec`] describes one browsable catalog (its path, sort menu and
//! default sort). [`GridSpec::page`] runs the pipeline for a request's query
//! string and derives everything a grid page shows: cards, sort badges,
//! sidebar toggles and the result count. Nothing here is stored.

use crate::core::codec::QueryString;
use crate::core::error::QueryError;
use crate::core::pipeline::{UnrankedRarity, category_facets, view_with};
use crate::core::query::{DEFAULT_SORT, PARAM_SEARCH, ParamTable, QueryState, SortDirection};
use crate::core::rarity::Rarity;
use crate::core::record::Record;
use serde::Serialize;

/// One entry of a grid's sort menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub label: &'static str,
    pub key: &'static str,
}

const fn sort(label: &'static str, key: &'static str) -> SortOption {
    SortOption { label, key }
}

pub const ITEM_SORTS: &[SortOption] = &[
    sort("Corruption Factor", "corruptionFactor"),
    sort("Durability", "durability"),
    sort("HP", "hpValue"),
    sort("Magazine Size", "magazineSize"),
    sort("Magic Attack Value", "magicAttackValue"),
    sort("Magic Defense Value", "magicDefenseValue"),
    sort("Max Stack Count", "maxStackCount"),
    sort("Name", "name"),
    sort("Physical Attack Value", "physicalAttackValue"),
    sort("Physical Defense Value", "physicalDefenseValue"),
    sort("Price", "price"),
    sort("Rarity", "rarity"),
    sort("Restore Concentration", "restoreConcentration"),
    sort("Restore Health", "restoreHealth"),
    sort("Restore Sanity", "restoreSanity"),
    sort("Restore Satiety", "restoreSatiety"),
    sort("Shield Value", "shieldValue"),
    sort("Weight", "weight"),
];

pub const PAL_SORTS: &[SortOption] = &[
    sort("Name", "name"),
    sort("Paldeck Index", "paldeckIndex"),
    sort("Rarity", "rarity"),
];

/// Static description of a catalog grid
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    /// Catalog name, also the URL segment
    pub catalog: &'static str,
    /// Singular noun used in messages
    pub kind: &'static str,
    pub title: &'static str,
    pub path: &'static str,
    pub sorts: &'static [SortOption],
    pub default_sort: &'static str,
    /// Whether records with a tier outside the rarity table are listed
    pub unranked_rarity: UnrankedRarity,
}

pub const ITEM_GRID: GridSpec = GridSpec {
    catalog: "items",
    kind: "item",
    title: "Items",
    path: "/items",
    sorts: ITEM_SORTS,
    default_sort: DEFAULT_SORT,
    unranked_rarity: UnrankedRarity::Exclude,
};

pub const PAL_GRID: GridSpec = GridSpec {
    catalog: "pals",
    kind: "pal",
    title: "Pals",
    path: "/pals",
    sorts: PAL_SORTS,
    default_sort: "paldeckIndex",
    // pal rarities run past the item table
    unranked_rarity: UnrankedRarity::Keep,
};

/// A sidebar link that applies one change to the current query state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleLink {
    pub label: String,
    pub value: String,
    pub href: String,
    pub active: bool,
}

/// One record in the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCard {
    pub id: String,
    pub name: String,
    pub href: String,
    /// Rarity label, used as a style hook
    pub rarity: &'static str,
    /// Value of the active sort key; absent when sorting by name
    pub badge: Option<String>,
}

/// A parameter the search form must carry along unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// Everything a grid page renders
#[derive(Debug, Clone, Serialize)]
pub struct GridPage {
    pub title: &'static str,
    pub kind: &'static str,
    pub path: &'static str,
    pub state: QueryState,
    /// Canonical query string of `state` (defaults omitted)
    pub query: String,
    /// Non-search parameters of `query`, for the search form
    pub hidden: Vec<HiddenField>,
    pub count: usize,
    pub total: usize,
    pub cards: Vec<GridCard>,
    pub sorts: Vec<ToggleLink>,
    pub directions: Vec<ToggleLink>,
    pub categories: Vec<ToggleLink>,
    pub rarities: Vec<ToggleLink>,
    pub clear_href: String,
}

impl GridPage {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl GridSpec {
    /// Codec table for this grid's query string
    pub fn param_table(&self) -> ParamTable {
        let keys = self.sorts.iter().map(|s| s.key.to_string()).collect();
        ParamTable::new(keys, self.default_sort)
    }

    pub fn sort_label(&self, key: &str) -> Option<&'static str> {
        self.sorts.iter().find(|s| s.key == key).map(|s| s.label)
    }

    /// Resolve a raw request query into the typed state of this grid
    pub fn state(&self, raw_query: &str) -> QueryState {
        self.param_table().decode(&QueryString::parse(raw_query))
    }

    /// Run the pipeline with this grid's rarity policy
    pub fn view<'a, R: Record>(&self, records: &'a [R], state: &QueryState) -> Vec<&'a R> {
        view_with(records, state, self.unranked_rarity)
    }

    /// Build the page for `raw_query` over `records`
    pub fn page<R: Record>(&self, records: &[R], raw_query: &str) -> Result<GridPage, QueryError> {
        let table = self.param_table();
        let state = table.decode(&QueryString::parse(raw_query));
        let results = self.view(records, &state);

        let href = |next: &QueryState| -> Result<String, QueryError> {
            Ok(table.encode(next)?.to_href(self.path))
        };

        let show_badge = state.sort != DEFAULT_SORT;
        let cards = results
            .iter()
            .map(|record| GridCard {
                id: record.id().to_string(),
                name: record.name().to_string(),
                href: format!("{}/{}", self.path, record.id()),
                rarity: Rarity::from_tier(record.rarity())
                    .map(Rarity::label)
                    .unwrap_or("unknown"),
                badge: if show_badge {
                    record.attribute(&state.sort).map(|value| value.to_string())
                } else {
                    None
                },
            })
            .collect();

        let sorts = self
            .sorts
            .iter()
            .map(|option| {
                Ok(ToggleLink {
                    label: option.label.to_string(),
                    value: option.key.to_string(),
                    href: href(&state.with_sort(option.key))?,
                    active: state.sort == option.key,
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        let directions = [SortDirection::Asc, SortDirection::Desc]
            .into_iter()
            .map(|direction| {
                Ok(ToggleLink {
                    label: title_case(direction.as_str()),
                    value: direction.as_str().to_string(),
                    href: href(&state.with_direction(direction))?,
                    active: state.sort_direction == direction,
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        let categories = category_facets(records)
            .into_iter()
            .map(|category| {
                Ok(ToggleLink {
                    label: title_case(&category),
                    href: href(&state.toggle_category(&category))?,
                    active: state.categories.contains(&category),
                    value: category,
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        let rarities = Rarity::ALL
            .into_iter()
            .map(|rarity| {
                Ok(ToggleLink {
                    label: title_case(rarity.label()),
                    value: rarity.label().to_string(),
                    href: href(&state.toggle_rarity(rarity))?,
                    active: state.rarity.contains(&rarity),
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        let canonical = table.encode(&state)?;
        let hidden = canonical
            .iter()
            .filter(|(name, _)| *name != PARAM_SEARCH)
            .map(|(name, value)| HiddenField {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect();

        Ok(GridPage {
            title: self.title,
            kind: self.kind,
            path: self.path,
            query: canonical.encode(),
            hidden,
            count: results.len(),
            total: records.len(),
            cards,
            sorts,
            directions,
            categories,
            rarities,
            clear_href: self.path.to_string(),
            state,
        })
    }
}

/// `"sugar-glider"` -> `"Sugar Glider"`
pub fn title_case(label: &str) -> String {
    label
        .split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::item::Item;

    fn item(id: &str, name: &str, type_a: &str, rarity: i64, price: f64) -> Item {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "typeA": type_a, "rarity": rarity, "price": price
        }))
        .unwrap()
    }

    fn items() -> Vec<Item> {
        vec![
            item("axe", "Axe", "weapon", 0, 50.0),
            item("great-axe", "Great Axe", "weapon", 2, 200.0),
            item("wood", "Wood", "material", 0, 5.0),
            item("relic", "Relic", "material", 7, 999.0),
        ]
    }

    #[test]
    fn test_badge_only_when_not_sorting_by_name() {
        let items = items();
        let page = ITEM_GRID.page(&items, "").unwrap();
        assert!(page.cards.iter().all(|c| c.badge.is_none()));

        let page = ITEM_GRID
            .page(&items, "search=axe&sort=price&sortDirection=desc")
            .unwrap();
        let ids: Vec<&str> = page.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["great-axe", "axe"]);
        assert_eq!(page.cards[0].badge.as_deref(), Some("200"));
        assert_eq!(page.query, "search=axe&sort=price&sortDirection=desc");
        let hidden: Vec<&str> = page.hidden.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(hidden, vec!["sort", "sortDirection"]);
    }

    #[test]
    fn test_zero_results_page() {
        let items = items();
        let page = ITEM_GRID.page(&items, "search=zzz").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.count, 0);
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_out_of_table_rarity_never_shown() {
        let items = items();
        let page = ITEM_GRID.page(&items, "").unwrap();
        assert_eq!(page.count, 3);
        assert!(page.cards.iter().all(|c| c.rarity != "unknown"));
    }

    #[test]
    fn test_category_toggles_change_only_categories() {
        let items = items();
        let page = ITEM_GRID.page(&items, "sort=price").unwrap();
        let labels: Vec<&str> = page.categories.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Material", "Weapon"]);
        assert_eq!(page.categories[1].href, "/items?sort=price&categories=weapon");
        assert!(!page.categories[1].active);

        let page = ITEM_GRID.page(&items, "sort=price&categories=weapon").unwrap();
        assert!(page.categories[1].active);
        assert_eq!(page.categories[1].href, "/items?sort=price");
    }

    #[test]
    fn test_sort_links_omit_defaults() {
        let items = items();
        let page = ITEM_GRID.page(&items, "sort=price&sortDirection=desc").unwrap();
        let name = page.sorts.iter().find(|s| s.value == "name").unwrap();
        assert_eq!(name.href, "/items?sortDirection=desc");
        let asc = &page.directions[0];
        assert_eq!(asc.href, "/items?sort=price");
        assert!(page.directions[1].active);
    }

    #[test]
    fn test_malformed_sort_falls_back_to_default() {
        let items = items();
        let page = ITEM_GRID.page(&items, "sort=bogus&rarity=mythic").unwrap();
        assert_eq!(page.state.sort, "name");
        assert!(page.state.rarity.is_empty());
        assert_eq!(page.query, "");
    }

    #[test]
    fn test_pal_grid_defaults_to_paldeck_order() {
        let table = PAL_GRID.param_table();
        assert_eq!(table.default_sort(), "paldeckIndex");
        assert_eq!(PAL_GRID.state("").sort, "paldeckIndex");
        assert_eq!(PAL_GRID.sort_label("paldeckIndex"), Some("Paldeck Index"));
    }

    fn pal(id: &str, name: &str, paldeck_index: i64, rarity: i64) -> crate::catalog::Pal {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "paldeckIndex": paldeck_index,
            "elementType1": "neutral",
            "rarity": rarity,
            "partnerSkill": {"name": null, "description": null}
        }))
        .unwrap()
    }

    #[test]
    fn test_pal_grid_lists_rarity_above_item_table() {
        let pals = vec![pal("lamball", "Lamball", 1, 1), pal("anubis", "Anubis", 100, 10)];

        let page = PAL_GRID.page(&pals, "").unwrap();
        let ids: Vec<&str> = page.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["lamball", "anubis"]);
        assert_eq!(page.count, 2);
        assert_eq!(page.cards[1].rarity, "unknown");

        let page = PAL_GRID.page(&pals, "rarity=uncommon").unwrap();
        let ids: Vec<&str> = page.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["lamball"]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sugar-glider"), "Sugar Glider");
        assert_eq!(title_case("weapon"), "Weapon");
        assert_eq!(title_case("desc"), "Desc");
    }
}
