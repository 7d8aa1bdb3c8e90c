//! Filter-sort pipeline
//!
//! `view(records, state)` is a pure function. Stages always run in this order:
//!
//! 1. sort by `state.sort` in `state.sort_direction` (stable)
//! 2. text filter on the lower-cased display name
//! 3. category filter
//! 4. rarity filter
//!
//! Stages 2-4 only remove records, so the output keeps the order of stage 1.

use crate::core::query::{QueryState, SortDirection};
use crate::core::rarity::Rarity;
use crate::core::record::{AttrValue, Record, compare_attrs};

/// How stage 4 treats a record whose tier is outside the rarity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnrankedRarity {
    /// Always excluded, whether or not a rarity filter is active
    #[default]
    Exclude,
    /// Kept while no rarity filter is active
    Keep,
}

/// Compute the filtered, ordered view of `records`
///
/// Records with a tier outside the rarity table are never part of the view.
pub fn view<'a, R: Record>(records: &'a [R], state: &QueryState) -> Vec<&'a R> {
    view_with(records, state, UnrankedRarity::Exclude)
}

/// [`view`] with an explicit policy for tiers outside the rarity table
pub fn view_with<'a, R: Record>(
    records: &'a [R],
    state: &QueryState,
    unranked: UnrankedRarity,
) -> Vec<&'a R> {
    let needle = normalize_search(&state.search);

    let result: Vec<&R> = sort_records(records, &state.sort, state.sort_direction)
        .into_iter()
        .filter(|record| matches_search(record.name(), &needle))
        .filter(|record| matches_category(*record, &state.categories))
        .filter(|record| matches_rarity(*record, &state.rarity, unranked))
        .collect();

    tracing::debug!(
        total = records.len(),
        matched = result.len(),
        sort = %state.sort,
        direction = %state.sort_direction,
        ?unranked,
        "pipeline view computed"
    );

    result
}

/// Stage 1: stable sort by the named attribute
///
/// Keys are extracted once per record. Descending order reverses the
/// comparator, so records with equal keys keep their dataset order in both
/// directions.
pub fn sort_records<'a, R: Record>(
    records: &'a [R],
    key: &str,
    direction: SortDirection,
) -> Vec<&'a R> {
    let mut keyed: Vec<(Option<AttrValue>, &R)> =
        records.iter().map(|r| (r.attribute(key), r)).collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_attrs(a.as_ref(), b.as_ref());
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, r)| r).collect()
}

/// Trim and lower-case a search term
pub fn normalize_search(search: &str) -> String {
    search.trim().to_lowercase()
}

/// Stage 2 predicate; `needle` must already be normalized
pub fn matches_search(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

/// Stage 3 predicate
pub fn matches_category<R: Record + ?Sized>(record: &R, categories: &[String]) -> bool {
    categories.is_empty() || categories.iter().any(|c| c == record.category())
}

/// Stage 4 predicate
///
/// A tier outside the rarity table never matches an active rarity filter.
/// With no filter active, `unranked` decides.
pub fn matches_rarity<R: Record + ?Sized>(
    record: &R,
    selected: &[Rarity],
    unranked: UnrankedRarity,
) -> bool {
    match Rarity::from_tier(record.rarity()) {
        Some(rarity) => selected.is_empty() || selected.contains(&rarity),
        None => selected.is_empty() && unranked == UnrankedRarity::Keep,
    }
}

/// Sorted unique category labels present in `records`
pub fn category_facets<R: Record>(records: &[R]) -> Vec<String> {
    let mut categories: Vec<String> = records.iter().map(|r| r.category().to_string()).collect();
    categories.sort();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{DEFAULT_SORT, ParamTable};
    use crate::core::codec::QueryString;

    #[derive(Debug, Clone, PartialEq)]
    struct TestRecord {
        id: &'static str,
        name: &'static str,
        rarity: i64,
        category: &'static str,
        price: f64,
    }

    impl Record for TestRecord {
        fn id(&self) -> &str {
            self.id
        }
        fn name(&self) -> &str {
            self.name
        }
        fn rarity(&self) -> i64 {
            self.rarity
        }
        fn category(&self) -> &str {
            self.category
        }
        fn attribute(&self, key: &str) -> Option<AttrValue> {
            match key {
                "name" => Some(self.name.into()),
                "price" => Some(self.price.into()),
                "rarity" => Some(self.rarity.into()),
                _ => None,
            }
        }
    }

    fn rec(id: &'static str, name: &'static str, rarity: i64, category: &'static str, price: f64) -> TestRecord {
        TestRecord { id, name, rarity, category, price }
    }

    fn table() -> ParamTable {
        ParamTable::new(vec!["name".into(), "price".into(), "rarity".into()], DEFAULT_SORT)
    }

    fn state(query: &str) -> QueryState {
        table().decode(&QueryString::parse(query))
    }

    fn ids(view: &[&TestRecord]) -> Vec<&'static str> {
        view.iter().map(|r| r.id).collect()
    }

    fn dataset() -> Vec<TestRecord> {
        vec![
            rec("1", "Stone Axe", 0, "weapon", 10.0),
            rec("2", "Great Axe", 2, "weapon", 50.0),
            rec("3", "Wood", 0, "material", 1.0),
            rec("4", "Cursed Relic", 7, "material", 999.0),
            rec("5", "Pal Sphere", 1, "sphere", 10.0),
            rec("6", "Legend Sphere", 4, "sphere", 800.0),
        ]
    }

    #[test]
    fn test_end_to_end_axe_scenario() {
        let records = vec![
            rec("1", "Axe", 0, "weapon", 10.0),
            rec("2", "Great Axe", 2, "weapon", 50.0),
        ];
        let result = view(&records, &state("search=axe&sort=price&sortDirection=desc"));
        assert_eq!(ids(&result), vec!["2", "1"]);
    }

    #[test]
    fn test_default_view_sorts_by_name_and_drops_unknown_tier() {
        let records = dataset();
        let result = view(&records, &state(""));
        assert_eq!(ids(&result), vec!["2", "6", "5", "1", "3"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let records = dataset();
        let result = view(&records, &state("search=%20%20SPHERE%20"));
        assert_eq!(ids(&result), vec!["6", "5"]);
    }

    #[test]
    fn test_category_filter() {
        let records = dataset();
        let result = view(&records, &state("categories=sphere,material"));
        assert_eq!(ids(&result), vec!["6", "5", "3"]);
    }

    #[test]
    fn test_rarity_filter() {
        let records = dataset();
        let result = view(&records, &state("rarity=rare,legendary"));
        assert_eq!(ids(&result), vec!["2", "6"]);
    }

    #[test]
    fn test_out_of_table_tier_excluded_with_rarity_selected() {
        let records = vec![rec("x", "Relic", 7, "material", 1.0)];
        assert!(view(&records, &state("rarity=common")).is_empty());
    }

    #[test]
    fn test_out_of_table_tier_excluded_without_rarity_filter() {
        let records = vec![rec("x", "Relic", 7, "material", 1.0)];
        assert!(view(&records, &state("")).is_empty());
    }

    #[test]
    fn test_stable_sort_with_duplicate_keys() {
        let records = dataset();
        // "1" and "5" share price 10
        let asc = view(&records, &state("sort=price"));
        assert_eq!(ids(&asc), vec!["3", "1", "5", "2", "6"]);
        let again = view(&records, &state("sort=price"));
        assert_eq!(ids(&asc), ids(&again));

        let desc = view(&records, &state("sort=price&sortDirection=desc"));
        assert_eq!(ids(&desc), vec!["6", "2", "1", "5", "3"]);
    }

    #[test]
    fn test_filtering_never_reorders_sort_stage() {
        let records = dataset();
        let queries = [
            "sort=price&search=a",
            "sort=rarity&sortDirection=desc&categories=sphere,weapon",
            "sort=name&rarity=common,rare",
            "search=e&categories=material&rarity=common",
        ];
        for query in queries {
            let st = state(query);
            let sorted = ids(&sort_records(&records, &st.sort, st.sort_direction));
            let filtered = ids(&view(&records, &st));

            let mut cursor = sorted.iter();
            for id in &filtered {
                assert!(cursor.any(|s| s == id), "{} out of order for {}", id, query);
            }
            for record in view(&records, &st) {
                assert!(matches_search(record.name, &normalize_search(&st.search)));
                assert!(matches_category(record, &st.categories));
                assert!(matches_rarity(record, &st.rarity, UnrankedRarity::Exclude));
            }
        }
    }

    #[test]
    fn test_keep_policy_lists_unranked_tier_until_rarity_filter() {
        let records = dataset();
        let all = view_with(&records, &state(""), UnrankedRarity::Keep);
        assert_eq!(ids(&all), vec!["4", "2", "6", "5", "1", "3"]);

        let filtered = view_with(&records, &state("rarity=common"), UnrankedRarity::Keep);
        assert_eq!(ids(&filtered), vec!["1", "3"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let records = dataset();
        assert!(view(&records, &state("search=nothing-like-this")).is_empty());
    }

    #[test]
    fn test_category_facets_sorted_unique() {
        let records = dataset();
        assert_eq!(category_facets(&records), vec!["material", "sphere", "weapon"]);
    }
}
