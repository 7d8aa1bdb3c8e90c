//! Reusable field rules
//!
//! Rules run after a field passed its type check. A rule that does not
//! apply to the value's shape lets it through; the type check owns shape.

use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

/// A field rule: `(field path, value) -> Ok | Err(message)`
pub type Rule = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Rule: string must not be empty or whitespace only
pub fn non_empty() -> Rule {
    Arc::new(|field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.trim().is_empty() {
                return Err(format!("'{}' must not be empty", field));
            }
        }
        Ok(())
    })
}

/// Rule: number must be at least `min`
pub fn min_value(min: f64) -> Rule {
    Arc::new(move |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num < min {
                return Err(format!(
                    "'{}' must be at least {} (value: {})",
                    field, min, num
                ));
            }
        }
        Ok(())
    })
}

/// Rule: number must not exceed `max`
pub fn max_value(max: f64) -> Rule {
    Arc::new(move |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num > max {
                return Err(format!(
                    "'{}' must not exceed {} (value: {})",
                    field, max, num
                ));
            }
        }
        Ok(())
    })
}

/// Rule: string length (in chars) must be within `min..=max`
pub fn string_length(min: usize, max: usize) -> Rule {
    Arc::new(move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if len < min {
                return Err(format!(
                    "'{}' must have at least {} characters (currently: {})",
                    field, min, len
                ));
            }
            if len > max {
                return Err(format!(
                    "'{}' must not exceed {} characters (currently: {})",
                    field, max, len
                ));
            }
        }
        Ok(())
    })
}

/// Rule: string must match `regex`
pub fn pattern(regex: Regex) -> Rule {
    Arc::new(move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !regex.is_match(s) {
                return Err(format!(
                    "'{}' must match {} (value: {})",
                    field,
                    regex.as_str(),
                    s
                ));
            }
        }
        Ok(())
    })
}

/// Rule: string must not contain `forbidden`
pub fn excludes_char(forbidden: char) -> Rule {
    Arc::new(move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.contains(forbidden) {
                return Err(format!(
                    "'{}' must not contain '{}' (value: {})",
                    field, forbidden, s
                ));
            }
        }
        Ok(())
    })
}

/// Identifier slugs used in detail routes: lowercase ascii, digits, `-`, `_`
pub fn slug() -> Rule {
    match Regex::new(r"^[a-z0-9][a-z0-9_-]*$") {
        Ok(regex) => pattern(regex),
        Err(e) => Arc::new(move |_: &str, _: &Value| Err(format!("invalid slug rule: {}", e))),
    }
}
