//! Outfit suggestion engine.
//!
//! Pure and synchronous: the engine receives a read-only catalogue and a day
//! seed and returns ranked outfits. It never touches storage or the clock.

pub mod category;
pub mod harmony;
pub mod rng;
pub mod sampler;

pub use category::{Category, SlotPolicy, UnknownCategory};
pub use harmony::{Harmony, Hsl, Rgb, classify, harmony_score};
pub use rng::{DaySeed, Mulberry32};
pub use sampler::{Catalogue, Outfit, generate, score};

/// Multiplier separating the seeds of successive draws within one day.
pub const DRAW_SEED_STRIDE: u32 = 7919;
/// Score every outfit starts from before harmony and completeness points.
pub const BASE_SCORE: i32 = 50;
/// Upper bound of the clamped outfit score.
pub const MAX_SCORE: u8 = 100;

/// Anything the engine can dress someone in.
pub trait Wearable {
    /// Category the item is filed under.
    fn category(&self) -> Category;
    /// Representative color, when one was extracted.
    fn dominant_color(&self) -> Option<Rgb>;
}
