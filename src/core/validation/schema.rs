//! Declarative record schemas and all-or-nothing dataset validation
//!
//! A [`Schema`] maps field names to a [`FieldSpec`] (primitive type, nested
//! object shape, enumerated set, list or map, plus optional [`Rule`]s).
//! [`validate_dataset`] checks every record of a raw JSON array, collects
//! every violation, and only then converts the records into typed values.
//! One bad field anywhere rejects the whole dataset.

use super::validators::Rule;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Expected shape of a field value
#[derive(Debug, Clone)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    /// String out of a closed set
    Enum(Vec<String>),
    /// Nested object with its own schema
    Object(Schema),
    /// Homogeneous list
    Array(Box<FieldType>),
    /// Object with arbitrary keys and homogeneous values
    Map(Box<FieldType>),
}

impl FieldType {
    pub fn enumeration(values: &[&str]) -> Self {
        FieldType::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn array_of(inner: FieldType) -> Self {
        FieldType::Array(Box::new(inner))
    }

    pub fn map_of(inner: FieldType) -> Self {
        FieldType::Map(Box::new(inner))
    }

    fn describe(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Number => "number".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Enum(values) => format!("one of [{}]", values.join(", ")),
            FieldType::Object(_) => "object".to_string(),
            FieldType::Array(inner) => format!("array of {}", inner.describe()),
            FieldType::Map(inner) => format!("map of {}", inner.describe()),
        }
    }
}

/// Declaration of a single field
#[derive(Clone)]
pub struct FieldSpec {
    pub ty: FieldType,
    pub required: bool,
    pub nullable: bool,
    rules: Vec<Rule>,
}

impl FieldSpec {
    /// Field must be present and non-null
    pub fn required(ty: FieldType) -> Self {
        Self {
            ty,
            required: true,
            nullable: false,
            rules: Vec::new(),
        }
    }

    /// Field may be absent or null
    pub fn optional(ty: FieldType) -> Self {
        Self {
            ty,
            required: false,
            nullable: true,
            rules: Vec::new(),
        }
    }

    /// Field may be absent (the record type supplies a default) but not null
    pub fn defaulted(ty: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(ty)
        }
    }

    /// Allow an explicit `null`
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Attach a rule, checked after the type
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("ty", &self.ty)
            .field("required", &self.required)
            .field("nullable", &self.nullable)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Ordered field declarations of one record shape
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldSpec>,
    deny_unknown: bool,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.fields.insert(name.to_string(), spec);
        self
    }

    pub fn required(self, name: &str, ty: FieldType) -> Self {
        self.field(name, FieldSpec::required(ty))
    }

    pub fn optional(self, name: &str, ty: FieldType) -> Self {
        self.field(name, FieldSpec::optional(ty))
    }

    /// Reject fields the schema does not declare
    pub fn deny_unknown(mut self) -> Self {
        self.deny_unknown = true;
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check one value against this schema, appending `(path, message)` pairs
    pub fn check(&self, value: &Value, path: &str, out: &mut Vec<(String, String)>) {
        let Some(object) = value.as_object() else {
            out.push((
                display_path(path),
                format!("expected object, found {}", json_type(value)),
            ));
            return;
        };

        for (name, spec) in &self.fields {
            let field_path = join_path(path, name);
            match object.get(name) {
                None => {
                    if spec.required {
                        out.push((field_path, "missing required field".to_string()));
                    }
                }
                Some(Value::Null) => {
                    if !spec.nullable {
                        out.push((
                            field_path,
                            format!("expected {}, found null", spec.ty.describe()),
                        ));
                    }
                }
                Some(value) => {
                    if check_type(&spec.ty, value, &field_path, out) {
                        for rule in &spec.rules {
                            if let Err(message) = rule(&field_path, value) {
                                out.push((field_path.clone(), message));
                            }
                        }
                    }
                }
            }
        }

        if self.deny_unknown {
            for key in object.keys() {
                if !self.fields.contains_key(key) {
                    out.push((join_path(path, key), "unknown field".to_string()));
                }
            }
        }
    }
}

/// Returns true when no violation was added
fn check_type(ty: &FieldType, value: &Value, path: &str, out: &mut Vec<(String, String)>) -> bool {
    let before = out.len();
    let mismatch = |out: &mut Vec<(String, String)>| {
        out.push((
            path.to_string(),
            format!("expected {}, found {}", ty.describe(), json_type(value)),
        ));
    };

    match ty {
        FieldType::String => {
            if !value.is_string() {
                mismatch(out);
            }
        }
        FieldType::Integer => {
            if !(value.is_i64() || value.is_u64()) {
                mismatch(out);
            }
        }
        FieldType::Number => {
            if !value.is_number() {
                mismatch(out);
            }
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                mismatch(out);
            }
        }
        FieldType::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => {}
            Some(s) => out.push((
                path.to_string(),
                format!("expected {}, found '{}'", ty.describe(), s),
            )),
            None => mismatch(out),
        },
        FieldType::Object(schema) => schema.check(value, path, out),
        FieldType::Array(inner) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_type(inner, item, &format!("{}[{}]", path, i), out);
                }
            }
            None => mismatch(out),
        },
        FieldType::Map(inner) => match value.as_object() {
            Some(entries) => {
                for (key, item) in entries {
                    check_type(inner, item, &join_path(path, key), out);
                }
            }
            None => mismatch(out),
        },
    }

    out.len() == before
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.to_string()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Index of the offending record in the dataset, if record-scoped
    pub record: Option<usize>,
    /// The record's `id`, when it had a string one
    pub record_id: Option<String>,
    /// Dotted path of the offending field (`$` for the record itself)
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(index) = self.record {
            write!(f, "[{}]", index)?;
        }
        if let Some(id) = &self.record_id {
            write!(f, " (id={})", id)?;
        }
        if self.record.is_some() || self.record_id.is_some() {
            f.write_str(" ")?;
        }
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every violation found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

/// Schema validation failure
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// The dataset root is not a JSON array
    #[error("dataset '{dataset}' must be an array of records, found {found}")]
    NotAnArray {
        dataset: String,
        found: &'static str,
    },

    /// One or more records violate the schema
    #[error("dataset '{dataset}' failed validation with {} violation(s):\n{violations}", .violations.len())]
    Invalid {
        dataset: String,
        violations: Violations,
    },

    /// A cross-dataset check failed in more than one dataset
    #[error("{}", join_lines(.0))]
    Several(Vec<SchemaError>),
}

impl SchemaError {
    /// Violations of a single-dataset failure
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            SchemaError::Invalid { violations, .. } => Some(violations),
            SchemaError::NotAnArray { .. } | SchemaError::Several(_) => None,
        }
    }

    /// Name of the failing dataset, if only one failed
    pub fn dataset(&self) -> Option<&str> {
        match self {
            SchemaError::NotAnArray { dataset, .. } | SchemaError::Invalid { dataset, .. } => {
                Some(dataset)
            }
            SchemaError::Several(_) => None,
        }
    }

    /// Single-dataset failures, flattened
    pub fn failures(&self) -> Vec<&SchemaError> {
        match self {
            SchemaError::Several(failures) => failures.iter().flat_map(|f| f.failures()).collect(),
            single => vec![single],
        }
    }

    /// Combine failures; `None` when there are none
    pub fn combine(mut failures: Vec<SchemaError>) -> Option<SchemaError> {
        match failures.len() {
            0 => None,
            1 => failures.pop(),
            _ => Some(SchemaError::Several(failures)),
        }
    }
}

fn join_lines(failures: &[SchemaError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate a raw dataset and convert it into typed records
///
/// Returns every violation across every record, or the typed records in
/// their original order.
pub fn validate_dataset<T: DeserializeOwned>(
    dataset: &str,
    raw: &Value,
    schema: &Schema,
) -> Result<Vec<T>, SchemaError> {
    let records = raw.as_array().ok_or_else(|| SchemaError::NotAnArray {
        dataset: dataset.to_string(),
        found: json_type(raw),
    })?;

    let mut violations = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let mut found = Vec::new();
        schema.check(record, "", &mut found);
        let record_id = record_id(record);
        violations.extend(found.into_iter().map(|(path, message)| Violation {
            record: Some(index),
            record_id: record_id.clone(),
            path,
            message,
        }));
    }

    if !violations.is_empty() {
        return Err(SchemaError::Invalid {
            dataset: dataset.to_string(),
            violations: Violations(violations),
        });
    }

    let mut typed = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match serde_json::from_value::<T>(record.clone()) {
            Ok(value) => typed.push(value),
            Err(e) => violations.push(Violation {
                record: Some(index),
                record_id: record_id(record),
                path: "$".to_string(),
                message: format!("does not match record type: {}", e),
            }),
        }
    }

    if !violations.is_empty() {
        return Err(SchemaError::Invalid {
            dataset: dataset.to_string(),
            violations: Violations(violations),
        });
    }

    Ok(typed)
}

fn record_id(record: &Value) -> Option<String> {
    record.get("id").and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validators::{min_value, non_empty};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
        price: i64,
        kind: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    fn schema() -> Schema {
        Schema::new()
            .field("id", FieldSpec::required(FieldType::String).rule(non_empty()))
            .field(
                "price",
                FieldSpec::required(FieldType::Integer).rule(min_value(0.0)),
            )
            .required("kind", FieldType::enumeration(&["weapon", "material"]))
            .optional("tags", FieldType::array_of(FieldType::String))
    }

    #[test]
    fn test_valid_dataset_is_typed_in_order() {
        let raw = json!([
            {"id": "a", "price": 1, "kind": "weapon"},
            {"id": "b", "price": 2, "kind": "material", "tags": ["x"]}
        ]);
        let things: Vec<Thing> = validate_dataset("things", &raw, &schema()).unwrap();
        assert_eq!(things.len(), 2);
        assert_eq!(things[0].id, "a");
        assert_eq!(things[1].tags, vec!["x".to_string()]);
    }

    #[test]
    fn test_every_violation_is_reported() {
        let raw = json!([
            {"id": "a", "price": "free", "kind": "weapon"},
            {"id": "", "price": -3, "kind": "armor"},
            {"price": 1, "kind": "weapon", "tags": ["ok", 5]}
        ]);
        let err = validate_dataset::<Thing>("things", &raw, &schema()).unwrap_err();
        let violations = err.violations().unwrap();

        let summary: Vec<(Option<usize>, &str)> = violations
            .iter()
            .map(|v| (v.record, v.path.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some(0), "price"),
                (Some(1), "id"),
                (Some(1), "price"),
                (Some(1), "kind"),
                (Some(2), "id"),
                (Some(2), "tags[1]"),
            ]
        );

        let message = err.to_string();
        assert!(message.contains("6 violation(s)"));
        assert!(message.contains("[0] (id=a) price: expected integer, found string"));
    }

    #[test]
    fn test_non_array_root() {
        let err = validate_dataset::<Thing>("things", &json!({"id": "a"}), &schema()).unwrap_err();
        assert!(matches!(err, SchemaError::NotAnArray { found: "object", .. }));
    }

    #[test]
    fn test_non_object_record() {
        let err = validate_dataset::<Thing>("things", &json!([42]), &schema()).unwrap_err();
        let v = &err.violations().unwrap().0[0];
        assert_eq!(v.path, "$");
        assert_eq!(v.message, "expected object, found integer");
    }

    #[test]
    fn test_nested_object_and_nullable() {
        let partner = Schema::new()
            .field("name", FieldSpec::required(FieldType::String).nullable())
            .required("level", FieldType::Integer);
        let schema = Schema::new().required("partner", FieldType::Object(partner));

        let mut out = Vec::new();
        schema.check(&json!({"partner": {"name": null, "level": 1}}), "", &mut out);
        assert!(out.is_empty());

        schema.check(&json!({"partner": {"name": "x", "level": "high"}}), "", &mut out);
        assert_eq!(out[0].0, "partner.level");
    }

    #[test]
    fn test_map_values_are_checked() {
        let schema = Schema::new().required("work", FieldType::map_of(FieldType::Integer));
        let mut out = Vec::new();
        schema.check(&json!({"work": {"mining": 1, "kindling": "two"}}), "", &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, "work.kindling");
    }

    #[test]
    fn test_deny_unknown() {
        let schema = Schema::new().required("id", FieldType::String).deny_unknown();
        let mut out = Vec::new();
        schema.check(&json!({"id": "a", "extra": 1}), "", &mut out);
        assert_eq!(out, vec![("extra".to_string(), "unknown field".to_string())]);
    }

    #[test]
    fn test_rules_skip_mistyped_values() {
        // price is a string: only the type violation is reported, not min_value
        let raw = json!([{"id": "a", "price": "x", "kind": "weapon"}]);
        let err = validate_dataset::<Thing>("things", &raw, &schema()).unwrap_err();
        assert_eq!(err.violations().unwrap().len(), 1);
    }
}
