//! Crafting recipes that produce items

use crate::catalog::dataset::DatasetRecord;
use crate::core::validation::validators::{min_value, non_empty, slug};
use crate::core::validation::{FieldSpec, FieldType, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    /// Id of the produced item
    pub product: String,
    pub product_count: i64,
    pub work_amount: f64,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub item_id: String,
    pub count: i64,
}

impl DatasetRecord for Recipe {
    const NAME: &'static str = "recipes";

    fn schema() -> Schema {
        let material = Schema::new()
            .field("itemId", FieldSpec::required(FieldType::String).rule(non_empty()))
            .field(
                "count",
                FieldSpec::required(FieldType::Integer).rule(min_value(1.0)),
            );

        Schema::new()
            .field("id", FieldSpec::required(FieldType::String).rule(slug()))
            .field("product", FieldSpec::required(FieldType::String).rule(non_empty()))
            .field(
                "productCount",
                FieldSpec::required(FieldType::Integer).rule(min_value(1.0)),
            )
            .field(
                "workAmount",
                FieldSpec::required(FieldType::Number).rule(min_value(0.0)),
            )
            .required("materials", FieldType::array_of(FieldType::Object(material)))
    }

    fn record_id(&self) -> &str {
        &self.id
    }
}
