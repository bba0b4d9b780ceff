//! Wire representation of garment colors.

use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::outfit::Rgb;

/// Color as sent by clients: either `[r, g, b]` channels or a `#rrggbb` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    Channels([u8; 3]),
    Hex(String),
}

/// Raised when a hex color string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color `{0}`")]
pub struct InvalidHexColor(pub String);

impl TryFrom<&ColorInput> for Rgb {
    type Error = InvalidHexColor;

    fn try_from(value: &ColorInput) -> Result<Self, Self::Error> {
        match value {
            ColorInput::Channels(channels) => Ok(Rgb::from(*channels)),
            ColorInput::Hex(text) => {
                let trimmed = text.trim();
                // palette also accepts the 3-digit shorthand
                if !(trimmed.len() == 7 || trimmed.len() == 4) || !trimmed.starts_with('#') {
                    return Err(InvalidHexColor(text.clone()));
                }
                let srgb = Srgb::<u8>::from_str(trimmed)
                    .map_err(|_| InvalidHexColor(text.clone()))?;
                Ok(Rgb::new(srgb.red, srgb.green, srgb.blue))
            }
        }
    }
}

/// Color as returned to clients, carrying both notations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ColorView {
    /// `[r, g, b]` channels.
    #[schema(value_type = Vec<u8>, example = json!([200, 30, 30]))]
    pub rgb: [u8; 3],
    /// Lowercase `#rrggbb` notation.
    #[schema(example = "#c81e1e")]
    pub hex: String,
}

impl From<Rgb> for ColorView {
    fn from(color: Rgb) -> Self {
        let srgb = Srgb::new(color.r, color.g, color.b);
        Self {
            rgb: color.into(),
            hex: format!("#{:x}", srgb),
        }
    }
}
