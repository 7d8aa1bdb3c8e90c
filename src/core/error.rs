//! Typed error handling for palbook
//!
//! # Error Categories
//!
//! - [`DatasetError`]: loading and validating the static datasets (fatal at startup)
//! - [`QueryError`]: programmatic misuse of the query-state codec
//! - [`ConfigError`]: site configuration parsing and validation
//! - [`RenderError`]: page template failures
//! - [`RecordError`]: lookups of records that don't exist
//!
//! Malformed query strings coming from users are not errors: the codec falls
//! back to each parameter's default.
//!
//! # Example
//!
//! ```rust,ignore
//! match catalog.items.get(&id) {
//!     Some(item) => Ok(Json(item.clone())),
//!     None => Err(PalbookError::Record(RecordError::NotFound {
//!         catalog: "items".to_string(),
//!         id,
//!     })),
//! }
//! ```

use crate::core::validation::SchemaError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for palbook
#[derive(Debug)]
pub enum PalbookError {
    /// Dataset load or validation failure
    Dataset(DatasetError),

    /// Query codec misuse
    Query(QueryError),

    /// Configuration errors
    Config(ConfigError),

    /// Template rendering errors
    Render(RenderError),

    /// Record lookups
    Record(RecordError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for PalbookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PalbookError::Dataset(e) => write!(f, "{}", e),
            PalbookError::Query(e) => write!(f, "{}", e),
            PalbookError::Config(e) => write!(f, "{}", e),
            PalbookError::Render(e) => write!(f, "{}", e),
            PalbookError::Record(e) => write!(f, "{}", e),
            PalbookError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for PalbookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PalbookError::Dataset(e) => Some(e),
            PalbookError::Query(e) => Some(e),
            PalbookError::Config(e) => Some(e),
            PalbookError::Render(e) => Some(e),
            PalbookError::Record(e) => Some(e),
            PalbookError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl PalbookError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PalbookError::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PalbookError::Query(_) => StatusCode::BAD_REQUEST,
            PalbookError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PalbookError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PalbookError::Record(e) => e.status_code(),
            PalbookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PalbookError::Dataset(e) => e.error_code(),
            PalbookError::Query(e) => e.error_code(),
            PalbookError::Config(_) => "CONFIG_ERROR",
            PalbookError::Render(_) => "RENDER_ERROR",
            PalbookError::Record(e) => e.error_code(),
            PalbookError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            PalbookError::Record(RecordError::NotFound { catalog, id }) => {
                Some(serde_json::json!({
                    "catalog": catalog,
                    "id": id
                }))
            }
            PalbookError::Dataset(DatasetError::Invalid(schema_error)) => {
                let failures = schema_error.failures();
                let prefixed = failures.len() > 1;
                let lines: Vec<String> = failures
                    .into_iter()
                    .flat_map(|failure| {
                        let dataset = failure.dataset().unwrap_or_default();
                        failure
                            .violations()
                            .into_iter()
                            .flat_map(|violations| violations.iter())
                            .map(move |v| {
                                if prefixed {
                                    format!("{}: {}", dataset, v)
                                } else {
                                    v.to_string()
                                }
                            })
                    })
                    .collect();
                (!lines.is_empty()).then(|| serde_json::json!({ "violations": lines }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for PalbookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Dataset Errors
// =============================================================================

/// Errors raised while loading datasets
#[derive(Debug)]
pub enum DatasetError {
    /// The feed could not provide the dataset
    Unavailable { dataset: String, message: String },

    /// The dataset is not valid JSON
    Malformed { dataset: String, message: String },

    /// The dataset violates its schema or references
    Invalid(SchemaError),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Unavailable { dataset, message } => {
                write!(f, "Dataset '{}' is unavailable: {}", dataset, message)
            }
            DatasetError::Malformed { dataset, message } => {
                write!(f, "Dataset '{}' is not valid JSON: {}", dataset, message)
            }
            DatasetError::Invalid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl DatasetError {
    pub fn error_code(&self) -> &'static str {
        match self {
            DatasetError::Unavailable { .. } => "DATASET_UNAVAILABLE",
            DatasetError::Malformed { .. } => "DATASET_MALFORMED",
            DatasetError::Invalid(_) => "DATASET_INVALID",
        }
    }
}

impl From<SchemaError> for DatasetError {
    fn from(err: SchemaError) -> Self {
        DatasetError::Invalid(err)
    }
}

impl From<DatasetError> for PalbookError {
    fn from(err: DatasetError) -> Self {
        PalbookError::Dataset(err)
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors from writing query parameters through the codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The parameter is not in the codec table
    UnknownParameter { name: String },

    /// Scalar written to a list parameter or vice versa
    KindMismatch { name: String, expected: &'static str },

    /// Value outside the parameter's closed set
    InvalidValue { name: String, value: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnknownParameter { name } => {
                write!(f, "Unknown query parameter: {}", name)
            }
            QueryError::KindMismatch { name, expected } => {
                write!(f, "Query parameter '{}' expects a {} value", name, expected)
            }
            QueryError::InvalidValue { name, value } => {
                write!(f, "'{}' is not a valid value for '{}'", value, name)
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::UnknownParameter { .. } => "UNKNOWN_QUERY_PARAMETER",
            QueryError::KindMismatch { .. } => "QUERY_KIND_MISMATCH",
            QueryError::InvalidValue { .. } => "INVALID_QUERY_VALUE",
        }
    }
}

impl From<QueryError> for PalbookError {
    fn from(err: QueryError) -> Self {
        PalbookError::Query(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to the site configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    Io { path: String, message: String },

    /// YAML parse error
    Parse { message: String },

    /// Parsed values are out of range
    Invalid { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "Failed to read config '{}': {}", path, message)
            }
            ConfigError::Parse { message } => write!(f, "Failed to parse config: {}", message),
            ConfigError::Invalid { message } => write!(f, "Invalid config: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for PalbookError {
    fn from(err: ConfigError) -> Self {
        PalbookError::Config(err)
    }
}

// =============================================================================
// Render Errors
// =============================================================================

/// Page template failures
#[derive(Debug)]
pub enum RenderError {
    /// Template registration failed
    Setup { message: String },

    /// A template failed to render
    Template { template: String, message: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Setup { message } => write!(f, "Failed to load templates: {}", message),
            RenderError::Template { template, message } => {
                write!(f, "Failed to render '{}': {}", template, message)
            }
        }
    }
}

impl std::error::Error for RenderError {}

impl From<RenderError> for PalbookError {
    fn from(err: RenderError) -> Self {
        PalbookError::Render(err)
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Record lookup errors
#[derive(Debug)]
pub enum RecordError {
    /// No record with this id in the catalog
    NotFound { catalog: String, id: String },

    /// The catalog name is not served
    UnknownCatalog { catalog: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotFound { catalog, id } => {
                write!(f, "No {} record found with the id {}", catalog, id)
            }
            RecordError::UnknownCatalog { catalog } => write!(f, "Unknown catalog: {}", catalog),
        }
    }
}

impl std::error::Error for RecordError {}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::UnknownCatalog { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
            RecordError::UnknownCatalog { .. } => "UNKNOWN_CATALOG",
        }
    }
}

impl From<RecordError> for PalbookError {
    fn from(err: RecordError) -> Self {
        PalbookError::Record(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{Violation, Violations};

    #[test]
    fn test_record_not_found_returns_404() {
        let err = PalbookError::Record(RecordError::NotFound {
            catalog: "items".to_string(),
            id: "nope".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");

        let response = err.to_response();
        let details = response.details.unwrap();
        assert_eq!(details["id"], "nope");
    }

    #[test]
    fn test_query_error_returns_400() {
        let err: PalbookError = QueryError::UnknownParameter {
            name: "page".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Unknown query parameter: page");
    }

    #[test]
    fn test_invalid_dataset_lists_violations_in_details() {
        let schema_error = SchemaError::Invalid {
            dataset: "items".to_string(),
            violations: Violations(vec![Violation {
                record: Some(2),
                record_id: Some("wood".to_string()),
                path: "price".to_string(),
                message: "expected integer, found string".to_string(),
            }]),
        };
        let err: PalbookError = DatasetError::from(schema_error).into();
        assert_eq!(err.error_code(), "DATASET_INVALID");
        let details = err.to_response().details.unwrap();
        assert_eq!(
            details["violations"][0],
            "[2] (id=wood) price: expected integer, found string"
        );
    }

    #[test]
    fn test_several_failures_prefix_dataset_in_details() {
        let invalid = |dataset: &str, path: &str| SchemaError::Invalid {
            dataset: dataset.to_string(),
            violations: Violations(vec![Violation {
                record: Some(0),
                record_id: None,
                path: path.to_string(),
                message: "dangling".to_string(),
            }]),
        };
        let schema_error = SchemaError::Several(vec![
            invalid("recipes", "product"),
            invalid("pals", "activeSkills[0].skillId"),
        ]);
        let err: PalbookError = DatasetError::from(schema_error).into();
        let details = err.to_response().details.unwrap();
        assert_eq!(details["violations"][0], "recipes: [0] product: dangling");
        assert_eq!(details["violations"][1], "pals: [0] activeSkills[0].skillId: dangling");
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err = PalbookError::Render(RenderError::Template {
            template: "items.html".to_string(),
            message: "boom".to_string(),
        });
        assert!(err.source().is_some());
        assert!(PalbookError::Internal("x".into()).source().is_none());
    }
}
