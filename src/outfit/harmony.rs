//! Hue/saturation color harmony model used to score outfits.
//!
//! Colors are compared pairwise: neutrals go with everything, close hues read
//! as analogous, opposite hues as complementary, and hues a third of the wheel
//! apart as triadic. Everything else earns nothing.

use serde::{Deserialize, Serialize};

/// Saturation below which a color is treated as a neutral (gray, beige, black, white).
pub const NEUTRAL_SATURATION: f64 = 0.15;
/// Widest hue distance, in degrees, still considered analogous.
pub const ANALOGOUS_MAX_DEG: f64 = 30.0;
/// Inclusive hue distance band, in degrees, considered complementary.
pub const COMPLEMENTARY_BAND_DEG: (f64, f64) = (150.0, 210.0);
/// Inclusive hue distance band, in degrees, considered triadic.
pub const TRIADIC_BAND_DEG: (f64, f64) = (105.0, 135.0);

/// 8-bit sRGB color as extracted from a garment photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to hue/saturation/lightness.
    ///
    /// Gray inputs (all channels equal) map to hue 0 and saturation 0.
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return Hsl {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let d = max - min;
        let saturation = if lightness > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            hue: sector * 60.0,
            saturation,
            lightness,
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(value: Rgb) -> Self {
        [value.r, value.g, value.b]
    }
}

/// Cylindrical representation of an [`Rgb`] color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f64,
    /// Saturation, `[0, 1]`.
    pub saturation: f64,
    /// Lightness, `[0, 1]`.
    pub lightness: f64,
}

impl Hsl {
    /// Whether the color is too washed out to carry a hue.
    pub fn is_neutral(&self) -> bool {
        self.saturation < NEUTRAL_SATURATION
    }
}

/// Shortest angular distance between two hues, in `[0, 180]`.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    diff.min(360.0 - diff)
}

/// Relationship between two colors, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Harmony {
    /// At least one of the colors is a neutral.
    Neutral,
    /// Hues within 30° of each other.
    Analogous,
    /// Hues roughly opposite on the wheel.
    Complementary,
    /// Hues roughly a third of the wheel apart.
    Triadic,
    /// No recognised relationship.
    Clash,
}

impl Harmony {
    /// Points this relationship adds to an outfit score.
    pub const fn points(self) -> i32 {
        match self {
            Self::Neutral | Self::Analogous => 10,
            Self::Complementary => 15,
            Self::Triadic => 8,
            Self::Clash => 0,
        }
    }
}

/// Classify the pair `(a, b)`. Only the first matching rule applies.
pub fn classify(a: Rgb, b: Rgb) -> Harmony {
    let (a, b) = (a.to_hsl(), b.to_hsl());
    if a.is_neutral() || b.is_neutral() {
        return Harmony::Neutral;
    }

    let d = hue_distance(a.hue, b.hue);
    if d <= ANALOGOUS_MAX_DEG {
        Harmony::Analogous
    } else if (COMPLEMENTARY_BAND_DEG.0..=COMPLEMENTARY_BAND_DEG.1).contains(&d) {
        Harmony::Complementary
    } else if (TRIADIC_BAND_DEG.0..=TRIADIC_BAND_DEG.1).contains(&d) {
        Harmony::Triadic
    } else {
        Harmony::Clash
    }
}

/// Harmony contribution of a single color pair.
pub fn harmony_score(a: Rgb, b: Rgb) -> i32 {
    classify(a, b).points()
}
