//! Typed, validated datasets with id lookup

use crate::catalog::feed::DatasetFeed;
use crate::core::error::DatasetError;
use crate::core::validation::{Schema, SchemaError, Violation, Violations, validate_dataset};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// A record type that is loaded from its own dataset
pub trait DatasetRecord: DeserializeOwned + Send + Sync + 'static {
    /// Dataset name, also the feed key
    const NAME: &'static str;

    /// Declared shape of one raw record
    fn schema() -> Schema;

    fn record_id(&self) -> &str;
}

/// Ordered records plus an id index
#[derive(Debug, Clone)]
pub struct Dataset<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: DatasetRecord> Dataset<T> {
    /// Validate a raw JSON array against `T::schema()`
    ///
    /// Fails with every violation in the dataset, including duplicate ids.
    pub fn from_value(raw: &Value) -> Result<Self, SchemaError> {
        let records: Vec<T> = validate_dataset(T::NAME, raw, &T::schema())?;

        let mut index = HashMap::with_capacity(records.len());
        let mut violations = Vec::new();
        for (position, record) in records.iter().enumerate() {
            let id = record.record_id();
            if let Some(first) = index.get(id) {
                violations.push(Violation {
                    record: Some(position),
                    record_id: Some(id.to_string()),
                    path: "id".to_string(),
                    message: format!("duplicate id (first used by record {})", first),
                });
            } else {
                index.insert(id.to_string(), position);
            }
        }

        if !violations.is_empty() {
            return Err(SchemaError::Invalid {
                dataset: T::NAME.to_string(),
                violations: Violations(violations),
            });
        }

        Ok(Self { records, index })
    }

    /// Fetch, parse and validate the dataset from `feed`
    pub async fn load(feed: &dyn DatasetFeed) -> Result<Self, DatasetError> {
        let text = feed
            .fetch(T::NAME)
            .await
            .map_err(|e| DatasetError::Unavailable {
                dataset: T::NAME.to_string(),
                message: format!("{:#}", e),
            })?;
        let raw: Value = serde_json::from_str(&text).map_err(|e| DatasetError::Malformed {
            dataset: T::NAME.to_string(),
            message: e.to_string(),
        })?;
        let dataset = Self::from_value(&raw)?;
        tracing::info!(dataset = T::NAME, records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }
}

impl<T> Dataset<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Records in load order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::feed::StaticFeed;
    use crate::core::validation::FieldType;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Tag {
        id: String,
    }

    impl DatasetRecord for Tag {
        const NAME: &'static str = "tags";

        fn schema() -> Schema {
            Schema::new().required("id", FieldType::String)
        }

        fn record_id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let dataset = Dataset::<Tag>::from_value(&json!([{"id": "a"}, {"id": "b"}])).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("b").unwrap().id, "b");
        assert!(dataset.get("c").is_none());
    }

    #[test]
    fn test_duplicate_ids_are_violations() {
        let err = Dataset::<Tag>::from_value(&json!([{"id": "a"}, {"id": "b"}, {"id": "a"}]))
            .unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.0[0].to_string(),
            "[2] (id=a) id: duplicate id (first used by record 0)"
        );
    }

    #[tokio::test]
    async fn test_load_reports_malformed_json() {
        let feed = StaticFeed::new().with("tags", "[{");
        let err = Dataset::<Tag>::load(&feed).await.unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_load_reports_missing_dataset() {
        let err = Dataset::<Tag>::load(&StaticFeed::new()).await.unwrap_err();
        assert!(matches!(err, DatasetError::Unavailable { .. }));
    }
}
