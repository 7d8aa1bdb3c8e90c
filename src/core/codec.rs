//! Table-driven URL query codec
//!
//! Every recognized parameter is described by a [`ParamSpec`]: its name, its
//! serialization rule (scalar or list) and its default. Decoding never fails:
//! absent or malformed input resolves to the default. Encoding omits any
//! parameter holding its default, so `default -> absent -> default` round-trips.

use crate::core::error::QueryError;
use indexmap::IndexMap;
use std::fmt;
use url::form_urlencoded;

/// Delimiter used by list-valued parameters
pub const LIST_DELIMITER: char = ',';

/// Raw query string parameters, kept in first-seen order
///
/// Parameters the codec table does not know about are preserved untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    params: IndexMap<String, String>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (with or without the leading `?`)
    ///
    /// When a key appears more than once the last value wins.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut params = IndexMap::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
        Self { params }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize to `application/x-www-form-urlencoded` form (no leading `?`)
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Append this query to a path, omitting the `?` when empty
    pub fn to_href(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// A decoded parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(items) => Some(items),
            ParamValue::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            ParamValue::List(items) => Some(items),
            ParamValue::Text(_) => None,
        }
    }
}

/// Serialization rule of a parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Free text; any value is accepted
    Text,
    /// One literal out of a closed set
    Choice(Vec<String>),
    /// Delimited set of labels. When `allowed` is given, members outside it
    /// are dropped while decoding.
    List { allowed: Option<Vec<String>> },
}

impl ParamKind {
    fn describe(&self) -> &'static str {
        match self {
            ParamKind::Text => "text",
            ParamKind::Choice(_) => "choice",
            ParamKind::List { .. } => "list",
        }
    }
}

/// Codec entry for a single parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
}

impl ParamSpec {
    /// Free-text parameter
    pub fn text(name: &'static str, default: &str) -> Self {
        Self {
            name,
            kind: ParamKind::Text,
            default: ParamValue::Text(default.to_string()),
        }
    }

    /// Closed-set scalar parameter
    pub fn choice(name: &'static str, allowed: Vec<String>, default: &str) -> Self {
        Self {
            name,
            kind: ParamKind::Choice(allowed),
            default: ParamValue::Text(default.to_string()),
        }
    }

    /// Set-valued parameter, empty by default
    pub fn list(name: &'static str, allowed: Option<Vec<String>>) -> Self {
        Self {
            name,
            kind: ParamKind::List { allowed },
            default: ParamValue::List(Vec::new()),
        }
    }

    /// Decode a raw value; absent or malformed input yields the default
    pub fn decode(&self, raw: Option<&str>) -> ParamValue {
        let Some(raw) = raw else {
            return self.default.clone();
        };

        match &self.kind {
            ParamKind::Text => {
                if raw.is_empty() {
                    self.default.clone()
                } else {
                    ParamValue::Text(raw.to_string())
                }
            }
            ParamKind::Choice(allowed) => {
                if allowed.iter().any(|a| a == raw) {
                    ParamValue::Text(raw.to_string())
                } else {
                    tracing::debug!(param = self.name, value = raw, "unknown value, using default");
                    self.default.clone()
                }
            }
            ParamKind::List { allowed } => {
                let mut members: Vec<String> = Vec::new();
                for member in raw.split(LIST_DELIMITER).map(str::trim) {
                    if member.is_empty() || members.iter().any(|m| m == member) {
                        continue;
                    }
                    if let Some(allowed) = allowed {
                        if !allowed.iter().any(|a| a == member) {
                            tracing::debug!(param = self.name, value = member, "dropping unknown list member");
                            continue;
                        }
                    }
                    members.push(member.to_string());
                }
                ParamValue::List(members)
            }
        }
    }

    /// Encode a value; `Ok(None)` means the parameter must be absent
    pub fn encode(&self, value: &ParamValue) -> Result<Option<String>, QueryError> {
        match (&self.kind, value) {
            (ParamKind::Text, ParamValue::Text(s)) => {
                if value == &self.default || s.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(s.clone()))
                }
            }
            (ParamKind::Choice(allowed), ParamValue::Text(s)) => {
                if !allowed.iter().any(|a| a == s) {
                    return Err(QueryError::InvalidValue {
                        name: self.name.to_string(),
                        value: s.clone(),
                    });
                }
                if value == &self.default {
                    Ok(None)
                } else {
                    Ok(Some(s.clone()))
                }
            }
            (ParamKind::List { .. }, ParamValue::List(items)) => {
                // a member holding the delimiter would decode as two members
                if let Some(item) = items.iter().find(|item| item.contains(LIST_DELIMITER)) {
                    return Err(QueryError::InvalidValue {
                        name: self.name.to_string(),
                        value: item.clone(),
                    });
                }
                if items.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(items.join(&LIST_DELIMITER.to_string())))
                }
            }
            (kind, _) => Err(QueryError::KindMismatch {
                name: self.name.to_string(),
                expected: kind.describe(),
            }),
        }
    }

    /// Read this parameter out of a query string
    pub fn read(&self, query: &QueryString) -> ParamValue {
        self.decode(query.get(self.name))
    }

    /// Write this parameter into a query string, removing it on default
    pub fn write(&self, query: &mut QueryString, value: &ParamValue) -> Result<(), QueryError> {
        match self.encode(value)? {
            Some(encoded) => query.insert(self.name, encoded),
            None => {
                query.remove(self.name);
            }
        }
        Ok(())
    }
}
