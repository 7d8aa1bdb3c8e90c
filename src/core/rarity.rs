//! Rarity tiers and their fixed labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed, ordinal rarity table
///
/// | tier | label     |
/// |------|-----------|
/// | 0    | common    |
/// | 1    | uncommon  |
/// | 2    | rare      |
/// | 3    | epic      |
/// | 4    | legendary |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All rarities in tier order
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Look up the label for a raw tier. Tiers outside 0..=4 have none.
    pub fn from_tier(tier: i64) -> Option<Self> {
        match tier {
            0 => Some(Rarity::Common),
            1 => Some(Rarity::Uncommon),
            2 => Some(Rarity::Rare),
            3 => Some(Rarity::Epic),
            4 => Some(Rarity::Legendary),
            _ => None,
        }
    }

    pub fn tier(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Parse a URL label. Matching is exact (lowercase).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }

    /// All labels in tier order
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|r| r.label().to_string()).collect()
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
