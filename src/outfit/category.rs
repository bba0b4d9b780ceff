//! The fixed set of garment categories and the draw policy attached to each.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Category a garment is filed under. Every outfit slot maps to exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Outerwear,
    Accessory,
}

/// How a category's slot gets filled during a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotPolicy {
    /// Always filled; generation is impossible without at least one item.
    Required,
    /// Filled whenever the category has items.
    WhenAvailable,
    /// Filled when the category has items and an inclusion draw exceeds the threshold.
    Sometimes { threshold: f64 },
}

impl Category {
    /// Number of categories, and so of outfit slots.
    pub const COUNT: usize = 5;

    /// All categories, in slot order.
    pub const ALL: [Category; Self::COUNT] = [
        Category::Top,
        Category::Bottom,
        Category::Shoes,
        Category::Outerwear,
        Category::Accessory,
    ];

    /// Position of the category in [`Category::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Category::Top => 0,
            Category::Bottom => 1,
            Category::Shoes => 2,
            Category::Outerwear => 3,
            Category::Accessory => 4,
        }
    }

    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Outerwear => "outerwear",
            Category::Accessory => "accessory",
        }
    }

    /// Draw policy for this category's slot.
    pub const fn policy(self) -> SlotPolicy {
        match self {
            Category::Top | Category::Bottom => SlotPolicy::Required,
            Category::Shoes => SlotPolicy::WhenAvailable,
            // ~45% of outfits get a layer, ~35% an accessory
            Category::Outerwear => SlotPolicy::Sometimes { threshold: 0.55 },
            Category::Accessory => SlotPolicy::Sometimes { threshold: 0.65 },
        }
    }

    /// Score bonus for filling this slot.
    pub const fn completeness_bonus(self) -> i32 {
        match self {
            Category::Top | Category::Bottom => 0,
            Category::Shoes => 8,
            Category::Outerwear | Category::Accessory => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string does not name a known category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown garment category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
