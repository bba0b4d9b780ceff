use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

use crate::outfit::{Category, Rgb, Wearable};

/// Garment record as persisted by every storage backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GarmentEntity {
    /// Stable identifier for the garment.
    pub id: Uuid,
    /// Category the garment was filed under when captured.
    pub category: Category,
    /// Representative color extracted from the photo, stored as `[r, g, b]`.
    #[serde(default)]
    pub dominant_color: Option<Rgb>,
    /// Secondary colors, most frequent first.
    #[serde(default)]
    pub palette: Vec<Rgb>,
    /// Optional display name.
    #[serde(default)]
    pub label: Option<String>,
    /// Opaque reference the client uses to locate the garment photo.
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Time the garment was added to the closet.
    pub added_at: SystemTime,
}

/// Sort garments newest first, breaking ties on the identifier so listings are stable.
pub fn sort_newest_first(garments: &mut [GarmentEntity]) {
    garments.sort_by(|a, b| b.added_at.cmp(&a.added_at).then_with(|| a.id.cmp(&b.id)));
}

impl Wearable for GarmentEntity {
    fn category(&self) -> Category {
        self.category
    }

    fn dominant_color(&self) -> Option<Rgb> {
        self.dominant_color
    }
}
