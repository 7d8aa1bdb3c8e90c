//! Active skills pals can learn

use crate::catalog::dataset::DatasetRecord;
use crate::core::pipeline::{matches_search, normalize_search};
use crate::core::validation::validators::{min_value, non_empty, slug};
use crate::core::validation::{FieldSpec, FieldType, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub element: String,
    pub power: i64,
    /// Seconds
    pub cooldown: i64,
    #[serde(default)]
    pub description: String,
}

impl DatasetRecord for Skill {
    const NAME: &'static str = "skills";

    fn schema() -> Schema {
        Schema::new()
            .field("id", FieldSpec::required(FieldType::String).rule(slug()))
            .field("name", FieldSpec::required(FieldType::String).rule(non_empty()))
            .field("element", FieldSpec::required(FieldType::String).rule(non_empty()))
            .field(
                "power",
                FieldSpec::required(FieldType::Integer).rule(min_value(0.0)),
            )
            .field(
                "cooldown",
                FieldSpec::required(FieldType::Integer).rule(min_value(0.0)),
            )
            .field("description", FieldSpec::defaulted(FieldType::String))
    }

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Skill list view: name order, optional name search
pub fn skill_view<'a>(skills: &'a [Skill], search: &str) -> Vec<&'a Skill> {
    let needle = normalize_search(search);
    let mut view: Vec<&Skill> = skills
        .iter()
        .filter(|skill| matches_search(&skill.name, &needle))
        .collect();
    view.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    view
}
