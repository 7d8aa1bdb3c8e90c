//! Dataset validation
//!
//! Raw JSON datasets are checked against a declared [`Schema`] once, at load
//! time. Validation is all-or-nothing per dataset.

pub mod schema;
pub mod validators;

pub use schema::{
    FieldSpec, FieldType, Schema, SchemaError, Violation, Violations, validate_dataset,
};
pub use validators::Rule;
