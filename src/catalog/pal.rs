//! Pals: the creatures of the paldeck

use crate::catalog::dataset::DatasetRecord;
use crate::core::record::{AttrValue, Record};
use crate::core::codec::LIST_DELIMITER;
use crate::core::validation::validators::{
    excludes_char, max_value, min_value, non_empty, slug, string_length,
};
use crate::core::validation::{FieldSpec, FieldType, Schema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub paldeck_index: i64,
    /// Variant marker such as `B`; empty for base forms
    #[serde(default)]
    pub paldeck_index_suffix: String,
    pub element_type1: String,
    #[serde(default)]
    pub element_type2: Option<String>,
    pub rarity: i64,
    /// Work type -> level; level 0 means unsuited
    #[serde(default)]
    pub work_suitabilities: BTreeMap<String, i64>,
    pub partner_skill: PartnerSkill,
    #[serde(default)]
    pub active_skills: Vec<ActiveSkill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerSkill {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSkill {
    pub skill_id: String,
    pub level: i64,
}

impl Pal {
    /// Paldeck number as displayed, e.g. `#012B`
    pub fn paldeck_label(&self) -> String {
        format!("#{:03}{}", self.paldeck_index, self.paldeck_index_suffix)
    }

    /// Primary then secondary element
    pub fn elements(&self) -> Vec<&str> {
        std::iter::once(self.element_type1.as_str())
            .chain(self.element_type2.as_deref())
            .collect()
    }

    /// Work types with a level above zero, highest level first
    pub fn suited_work(&self) -> Vec<(&str, i64)> {
        let mut work: Vec<(&str, i64)> = self
            .work_suitabilities
            .iter()
            .filter(|(_, level)| **level > 0)
            .map(|(name, level)| (name.as_str(), *level))
            .collect();
        work.sort_by(|a, b| b.1.cmp(&a.1));
        work
    }
}

impl DatasetRecord for Pal {
    const NAME: &'static str = "pals";

    fn schema() -> Schema {
        let partner_skill = Schema::new()
            .field("name", FieldSpec::required(FieldType::String).nullable())
            .field("description", FieldSpec::required(FieldType::String).nullable());
        let active_skill = Schema::new()
            .field("skillId", FieldSpec::required(FieldType::String).rule(non_empty()))
            .field(
                "level",
                FieldSpec::required(FieldType::Integer).rule(min_value(1.0)),
            );

        Schema::new()
            .field("id", FieldSpec::required(FieldType::String).rule(slug()))
            .field("name", FieldSpec::required(FieldType::String).rule(non_empty()))
            .field("title", FieldSpec::defaulted(FieldType::String))
            .field("description", FieldSpec::defaulted(FieldType::String))
            .field(
                "paldeckIndex",
                FieldSpec::required(FieldType::Integer)
                    .rule(min_value(0.0))
                    .rule(max_value(999.0)),
            )
            .field(
                "paldeckIndexSuffix",
                FieldSpec::defaulted(FieldType::String).rule(string_length(0, 2)),
            )
            .field(
                "elementType1",
                FieldSpec::required(FieldType::String)
                    .rule(non_empty())
                    .rule(excludes_char(LIST_DELIMITER)),
            )
            .optional("elementType2", FieldType::String)
            .required("rarity", FieldType::Integer)
            .field(
                "workSuitabilities",
                FieldSpec::defaulted(FieldType::map_of(FieldType::Integer)),
            )
            .required("partnerSkill", FieldType::Object(partner_skill))
            .field(
                "activeSkills",
                FieldSpec::defaulted(FieldType::array_of(FieldType::Object(active_skill))),
            )
    }

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Pal {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn rarity(&self) -> i64 {
        self.rarity
    }

    fn category(&self) -> &str {
        &self.element_type1
    }

    fn attribute(&self, key: &str) -> Option<AttrValue> {
        match key {
            "name" => Some(self.name.as_str().into()),
            "paldeckIndex" => Some(self.paldeck_index.into()),
            "rarity" => Some(self.rarity.into()),
            _ => None,
        }
    }
}
