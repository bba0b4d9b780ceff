use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    dao::models::GarmentEntity,
    dto::{color::ColorView, garment::GarmentSummary},
    outfit::{Category, Outfit},
};

/// Query string accepted by the daily suggestion endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OutfitQuery {
    /// Number of candidates to draw; defaults to the configured count.
    pub count: Option<usize>,
    /// Calendar day to preview (`YYYY-MM-DD`); defaults to today.
    pub date: Option<String>,
}

/// Ranked suggestions for one day.
#[derive(Debug, Serialize, ToSchema)]
pub struct OutfitsResponse {
    /// Day the suggestions were computed for (`YYYY-MM-DD`).
    pub date: String,
    /// Seed derived from `date`; equal seeds yield equal suggestions for an unchanged closet.
    pub day_seed: u32,
    /// Best first.
    pub outfits: Vec<OutfitSummary>,
}

/// One suggested outfit.
#[derive(Debug, Serialize, ToSchema)]
pub struct OutfitSummary {
    /// Filled slots in slot order.
    pub slots: Vec<OutfitSlot>,
    pub score: u8,
}

/// A garment worn in a given slot.
#[derive(Debug, Serialize, ToSchema)]
pub struct OutfitSlot {
    pub slot: Category,
    /// Dominant color the garment contributes to the harmony score, if any.
    pub color: Option<ColorView>,
    pub garment: GarmentSummary,
}

impl From<&Outfit<'_, GarmentEntity>> for OutfitSummary {
    fn from(outfit: &Outfit<'_, GarmentEntity>) -> Self {
        Self {
            slots: outfit
                .pieces()
                .map(|(slot, garment)| OutfitSlot {
                    slot,
                    color: garment.dominant_color.map(ColorView::from),
                    garment: GarmentSummary::from(garment),
                })
                .collect(),
            score: outfit.score,
        }
    }
}
