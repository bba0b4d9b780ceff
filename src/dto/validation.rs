//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::{dto::color::ColorInput, outfit::Rgb};

/// Validates that a color is either a channel triple or a `#rrggbb` string.
///
/// # Examples
///
/// ```ignore
/// validate_color(&ColorInput::Channels([10, 20, 30])) // Ok
/// validate_color(&ColorInput::Hex("#0a141e".into()))   // Ok
/// validate_color(&ColorInput::Hex("0a141e".into()))    // Err - missing '#'
/// ```
pub fn validate_color(color: &ColorInput) -> Result<(), ValidationError> {
    Rgb::try_from(color).map(|_| ()).map_err(|err| {
        let mut error = ValidationError::new("color_format");
        error.message = Some(err.to_string().into());
        error
    })
}

/// Validates every palette entry with [`validate_color`].
pub fn validate_palette(palette: &[ColorInput]) -> Result<(), ValidationError> {
    palette.iter().try_for_each(validate_color)
}

/// Rejects labels made only of whitespace.
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        let mut err = ValidationError::new("label_blank");
        err.message = Some("Label must contain a visible character".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_color() {
        assert!(validate_color(&ColorInput::Channels([0, 0, 0])).is_ok());
        assert!(validate_color(&ColorInput::Hex("#a0b1c2".into())).is_ok());
        assert!(validate_color(&ColorInput::Hex("a0b1c2".into())).is_err());
        assert!(validate_color(&ColorInput::Hex("#a0b1".into())).is_err());
    }

    #[test]
    fn test_validate_palette_reports_first_bad_entry() {
        let palette = vec![
            ColorInput::Channels([1, 2, 3]),
            ColorInput::Hex("teal".into()),
        ];
        let err = validate_palette(&palette).unwrap_err();
        assert_eq!(err.code, "color_format");
        assert!(validate_palette(&[]).is_ok());
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("Navy chinos").is_ok());
        assert!(validate_label("   ").is_err());
    }
}
