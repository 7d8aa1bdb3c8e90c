//! Items: weapons, materials, consumables and the like

use crate::catalog::dataset::DatasetRecord;
use crate::core::record::{AttrValue, Record};
use crate::core::codec::LIST_DELIMITER;
use crate::core::validation::validators::{excludes_char, min_value, non_empty, slug};
use crate::core::validation::{FieldSpec, FieldType, Schema};
use serde::{Deserialize, Serialize};

/// Numeric item stats, in sort-menu order
pub const ITEM_STATS: [&str; 16] = [
    "corruptionFactor",
    "durability",
    "hpValue",
    "magazineSize",
    "magicAttackValue",
    "magicDefenseValue",
    "maxStackCount",
    "physicalAttackValue",
    "physicalDefenseValue",
    "price",
    "restoreConcentration",
    "restoreHealth",
    "restoreSanity",
    "restoreSatiety",
    "shieldValue",
    "weight",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category label
    pub type_a: String,
    pub rarity: i64,
    #[serde(default)]
    pub corruption_factor: f64,
    #[serde(default)]
    pub durability: f64,
    #[serde(default)]
    pub hp_value: f64,
    #[serde(default)]
    pub magazine_size: f64,
    #[serde(default)]
    pub magic_attack_value: f64,
    #[serde(default)]
    pub magic_defense_value: f64,
    #[serde(default)]
    pub max_stack_count: f64,
    #[serde(default)]
    pub physical_attack_value: f64,
    #[serde(default)]
    pub physical_defense_value: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub restore_concentration: f64,
    #[serde(default)]
    pub restore_health: f64,
    #[serde(default)]
    pub restore_sanity: f64,
    #[serde(default)]
    pub restore_satiety: f64,
    #[serde(default)]
    pub shield_value: f64,
    #[serde(default)]
    pub weight: f64,
}

impl Item {
    /// Value of a numeric stat by its camelCase key
    pub fn stat(&self, key: &str) -> Option<f64> {
        let value = match key {
            "corruptionFactor" => self.corruption_factor,
            "durability" => self.durability,
            "hpValue" => self.hp_value,
            "magazineSize" => self.magazine_size,
            "magicAttackValue" => self.magic_attack_value,
            "magicDefenseValue" => self.magic_defense_value,
            "maxStackCount" => self.max_stack_count,
            "physicalAttackValue" => self.physical_attack_value,
            "physicalDefenseValue" => self.physical_defense_value,
            "price" => self.price,
            "restoreConcentration" => self.restore_concentration,
            "restoreHealth" => self.restore_health,
            "restoreSanity" => self.restore_sanity,
            "restoreSatiety" => self.restore_satiety,
            "shieldValue" => self.shield_value,
            "weight" => self.weight,
            _ => return None,
        };
        Some(value)
    }
}

impl DatasetRecord for Item {
    const NAME: &'static str = "items";

    fn schema() -> Schema {
        let mut schema = Schema::new()
            .field("id", FieldSpec::required(FieldType::String).rule(slug()))
            .field("name", FieldSpec::required(FieldType::String).rule(non_empty()))
            .field("description", FieldSpec::defaulted(FieldType::String))
            // category labels travel in the comma-delimited `categories` param
            .field(
                "typeA",
                FieldSpec::required(FieldType::String)
                    .rule(non_empty())
                    .rule(excludes_char(LIST_DELIMITER)),
            )
            // tiers outside 0..=4 load fine and are excluded by the grid
            .required("rarity", FieldType::Integer);
        for stat in ITEM_STATS {
            let spec = FieldSpec::defaulted(FieldType::Number);
            let spec = match stat {
                "price" | "weight" | "maxStackCount" => spec.rule(min_value(0.0)),
                _ => spec,
            };
            schema = schema.field(stat, spec);
        }
        schema
    }

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Item {
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
        &self.type_a
    }

    fn attribute(&self, key: &str) -> Option<AttrValue> {
        match key {
            "name" => Some(self.name.as_str().into()),
            "rarity" => Some(self.rarity.into()),
            "typeA" => Some(self.type_a.as_str().into()),
            _ => self.stat(key).map(AttrValue::from),
        }
    }
}
