//! HTTP tests for the site routes
//!
//! These tests verify that:
//! - Grid pages follow the query string (sort, filters, badges)
//! - Empty views render the placeholder instead of an error
//! - Unknown ids render the not-found page with a 404
//! - The JSON API reports the canonical query with defaults omitted

mod common;

use axum::http::StatusCode;
use common::{axe_server, shipped_server};
use serde_json::Value;

/// Names of the cards on a rendered grid, in page order
fn card_names(html: &str) -> Vec<String> {
    html.split("<span class=\"name\">")
        .skip(1)
        .filter_map(|rest| rest.split("</span>").next())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = axe_server().await;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "palbook");
    }

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let server = axe_server().await;

        let response = server.get("/healthz").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

// =============================================================================
// Grid Page Tests
// =============================================================================

mod grid_tests {
    use super::*;

    #[tokio::test]
    async fn test_default_grid_sorted_by_name_without_badges() {
        let server = axe_server().await;

        let response = server.get("/items").await;
        response.assert_status_ok();

        let html = response.text();
        assert_eq!(card_names(&html), vec!["Axe", "Great Axe"]);
        assert!(!html.contains("class=\"badge\""));
        assert!(html.contains("2 results"));
    }

    #[tokio::test]
    async fn test_sorted_search_shows_badges() {
        let server = axe_server().await;

        let response = server
            .get("/items")
            .add_raw_query_param("search=axe&sort=price&sortDirection=desc")
            .await;
        response.assert_status_ok();

        let html = response.text();
        assert_eq!(card_names(&html), vec!["Great Axe", "Axe"]);
        assert!(html.contains("<span class=\"badge\">200</span>"));
        assert!(html.contains("<span class=\"badge\">100</span>"));
    }

    #[tokio::test]
    async fn test_search_form_carries_non_search_state() {
        let server = axe_server().await;

        let html = server
            .get("/items")
            .add_raw_query_param("sort=price&categories=weapon")
            .await
            .text();

        assert!(html.contains(r#"<input type="hidden" name="sort" value="price">"#));
        assert!(html.contains(r#"<input type="hidden" name="categories" value="weapon">"#));
    }

    #[tokio::test]
    async fn test_no_results_placeholder() {
        let server = axe_server().await;

        let response = server
            .get("/items")
            .add_raw_query_param("search=sword")
            .await;
        response.assert_status_ok();

        let html = response.text();
        assert!(html.contains("No items found"));
        assert!(card_names(&html).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_sort_falls_back_to_default() {
        let server = axe_server().await;

        let response = server
            .get("/items")
            .add_raw_query_param("sort=bogus&sortDirection=sideways")
            .await;
        response.assert_status_ok();

        let html = response.text();
        assert_eq!(card_names(&html), vec!["Axe", "Great Axe"]);
        assert!(!html.contains("class=\"badge\""));
    }

    #[tokio::test]
    async fn test_rarity_filter_on_shipped_data() {
        let server = shipped_server().await;

        let html = server
            .get("/items")
            .add_raw_query_param("rarity=epic")
            .await
            .text();

        assert_eq!(card_names(&html), vec!["Great Axe"]);
    }

    #[tokio::test]
    async fn test_out_of_table_rarity_never_listed() {
        let server = shipped_server().await;

        let html = server.get("/items").await.text();
        assert!(!html.contains("Ancient Civilization Core"));
        assert!(html.contains("14 results"));
    }

    #[tokio::test]
    async fn test_pal_grid_defaults_to_paldeck_order() {
        let server = shipped_server().await;

        let html = server.get("/pals").await.text();
        let names = card_names(&html);
        assert_eq!(names.first().map(String::as_str), Some("Lamball"));
        assert_eq!(names.get(1).map(String::as_str), Some("Cattiva"));
    }

    #[tokio::test]
    async fn test_pal_rarity_above_item_table_is_listed() {
        let server = shipped_server().await;

        let html = server.get("/pals").await.text();
        let names = card_names(&html);
        assert_eq!(names.last().map(String::as_str), Some("Anubis"));
        assert!(html.contains("8 results"));

        let body: Value = server.get("/api/pals").await.json();
        assert_eq!(body["count"], 8);

        let filtered = server
            .get("/pals")
            .add_raw_query_param("rarity=uncommon")
            .await
            .text();
        assert!(!card_names(&filtered).contains(&"Anubis".to_string()));
    }
}

// =============================================================================
// Detail Page Tests
// =============================================================================

mod detail_tests {
    use super::*;

    #[tokio::test]
    async fn test_item_detail_lists_recipe_materials() {
        let server = shipped_server().await;

        let response = server.get("/items/metal-axe").await;
        response.assert_status_ok();

        let html = response.text();
        assert!(html.contains("Metal Axe"));
        assert!(html.contains("Ingot"));
    }

    #[tokio::test]
    async fn test_unknown_item_renders_not_found() {
        let server = axe_server().await;

        let response = server.get("/items/x").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("No item found with the id x"));
    }

    #[tokio::test]
    async fn test_unknown_pal_renders_not_found() {
        let server = shipped_server().await;

        let response = server.get("/pals/nobody").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("No pal found with the id nobody"));
    }

    #[tokio::test]
    async fn test_pal_detail_shows_skills() {
        let server = shipped_server().await;

        let response = server.get("/pals/foxparks").await;
        response.assert_status_ok();

        let html = response.text();
        assert!(html.contains("Ignis Blast"));
        assert!(html.contains("Flare Arrow"));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found() {
        let server = axe_server().await;

        let response = server.get("/nowhere").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// JSON API Tests
// =============================================================================

mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_items_reports_canonical_query() {
        let server = axe_server().await;

        let response = server
            .get("/api/items")
            .add_raw_query_param("search=axe&sort=price&sortDirection=desc&sortDirection=asc")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], 2);
        assert_eq!(body["query"], "search=axe&sort=price");
        assert_eq!(body["results"][0]["id"], "axe");
        assert_eq!(body["results"][1]["id"], "great-axe");
    }

    #[tokio::test]
    async fn test_list_items_default_query_is_empty() {
        let server = axe_server().await;

        let body: Value = server.get("/api/items").await.json();
        assert_eq!(body["query"], "");
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn test_list_skills_filters_by_search() {
        let server = shipped_server().await;

        let body: Value = server
            .get("/api/skills")
            .add_raw_query_param("search=blast")
            .await
            .json();

        assert_eq!(body["count"], 2);
        assert_eq!(body["results"][0]["name"], "Ignis Blast");
        assert_eq!(body["results"][1]["name"], "Spark Blast");
        assert_eq!(body["query"], "search=blast");
    }

    #[tokio::test]
    async fn test_get_record_by_id() {
        let server = shipped_server().await;

        let response = server.get("/api/pals/lamball").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["name"], "Lamball");
        assert_eq!(body["paldeckIndex"], 1);
    }

    #[tokio::test]
    async fn test_get_missing_record_returns_404_json() {
        let server = axe_server().await;

        let response = server.get("/api/items/x").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "RECORD_NOT_FOUND");
        assert_eq!(body["details"]["catalog"], "items");
        assert_eq!(body["details"]["id"], "x");
    }

    #[tokio::test]
    async fn test_get_from_unknown_catalog_returns_404() {
        let server = axe_server().await;

        let response = server.get("/api/weapons/axe").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "UNKNOWN_CATALOG");
    }
}
