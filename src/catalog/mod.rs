//! Game data catalogs
//!
//! The [`Catalog`] holds every dataset the site serves. It is loaded once
//! from a [`DatasetFeed`], validated, cross-checked and then shared
//! read-only for the lifetime of the process.

pub mod dataset;
pub mod feed;
pub mod grid;
pub mod item;
pub mod pal;
pub mod recipe;
pub mod skill;

pub use dataset::{Dataset, DatasetRecord};
pub use feed::{DatasetFeed, DirectoryFeed, StaticFeed};
pub use grid::{
    GridCard, GridPage, GridSpec, HiddenField, ITEM_GRID, PAL_GRID, SortOption, ToggleLink,
};
pub use item::Item;
pub use pal::{ActiveSkill, PartnerSkill, Pal};
pub use recipe::{Material, Recipe};
pub use skill::Skill;

use crate::core::error::DatasetError;
use crate::core::validation::{SchemaError, Violation, Violations};

/// All datasets of the site
#[derive(Debug, Clone)]
pub struct Catalog {
    pub items: Dataset<Item>,
    pub pals: Dataset<Pal>,
    pub skills: Dataset<Skill>,
    pub recipes: Dataset<Recipe>,
}

impl Catalog {
    /// Load, validate and cross-check every dataset
    ///
    /// Any failure is fatal: the site must not start on partial data.
    pub async fn load(feed: &dyn DatasetFeed) -> Result<Self, DatasetError> {
        tracing::info!(feed = %feed.describe(), "loading datasets");

        let catalog = Self {
            items: Dataset::load(feed).await?,
            pals: Dataset::load(feed).await?,
            skills: Dataset::load(feed).await?,
            recipes: Dataset::load(feed).await?,
        };
        catalog.check_references()?;

        tracing::info!(
            items = catalog.items.len(),
            pals = catalog.pals.len(),
            skills = catalog.skills.len(),
            recipes = catalog.recipes.len(),
            "catalog ready"
        );
        Ok(catalog)
    }

    /// Every recipe item id and pal skill id must resolve
    ///
    /// Both checks always run; a failure lists the dangling references of
    /// every dataset involved.
    pub fn check_references(&self) -> Result<(), SchemaError> {
        let mut recipe_violations = Vec::new();
        for (index, recipe) in self.recipes.records().iter().enumerate() {
            let mut dangling = |path: String, id: &str| {
                recipe_violations.push(Violation {
                    record: Some(index),
                    record_id: Some(recipe.id.clone()),
                    path,
                    message: format!("unknown item '{}'", id),
                });
            };
            if !self.items.contains(&recipe.product) {
                dangling("product".to_string(), &recipe.product);
            }
            for (i, material) in recipe.materials.iter().enumerate() {
                if !self.items.contains(&material.item_id) {
                    dangling(format!("materials[{}].itemId", i), &material.item_id);
                }
            }
        }

        let mut pal_violations = Vec::new();
        for (index, pal) in self.pals.records().iter().enumerate() {
            for (i, skill) in pal.active_skills.iter().enumerate() {
                if !self.skills.contains(&skill.skill_id) {
                    pal_violations.push(Violation {
                        record: Some(index),
                        record_id: Some(pal.id.clone()),
                        path: format!("activeSkills[{}].skillId", i),
                        message: format!("unknown skill '{}'", skill.skill_id),
                    });
                }
            }
        }

        let failures = [
            (Recipe::NAME, recipe_violations),
            (Pal::NAME, pal_violations),
        ]
        .into_iter()
        .filter(|(_, violations)| !violations.is_empty())
        .map(|(dataset, violations)| SchemaError::Invalid {
            dataset: dataset.to_string(),
            violations: Violations(violations),
        })
        .collect();

        match SchemaError::combine(failures) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The recipe that produces `item_id`, if any
    pub fn recipe_for(&self, item_id: &str) -> Option<&Recipe> {
        self.recipes.records().iter().find(|r| r.product == item_id)
    }

    /// Active skills of a pal joined with the skills dataset
    pub fn pal_skills<'a>(&'a self, pal: &'a Pal) -> Vec<(&'a Skill, i64)> {
        pal.active_skills
            .iter()
            .filter_map(|active| {
                self.skills
                    .get(&active.skill_id)
                    .map(|skill| (skill, active.level))
            })
            .collect()
    }
}
