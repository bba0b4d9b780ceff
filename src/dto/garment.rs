use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::GarmentEntity,
    dto::{
        color::{ColorInput, ColorView},
        format_system_time,
        validation::{validate_color, validate_label, validate_palette},
    },
    outfit::Category,
};

/// Payload used to add a garment to the closet.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGarmentRequest {
    pub category: Category,
    /// `[r, g, b]` channels or a `#rrggbb` string.
    #[serde(default)]
    #[schema(value_type = Option<Object>, example = json!([200, 30, 30]))]
    #[validate(custom(function = "validate_color"))]
    pub dominant_color: Option<ColorInput>,
    /// Secondary colors, most frequent first.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    #[validate(length(max = 5), custom(function = "validate_palette"))]
    pub palette: Vec<ColorInput>,
    #[serde(default)]
    #[validate(length(min = 1, max = 64), custom(function = "validate_label"))]
    pub label: Option<String>,
    /// Client-side reference to the garment photo.
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub image_ref: Option<String>,
}

/// Query string accepted by the garment listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GarmentListQuery {
    /// Restrict the listing to one category (case-insensitive).
    pub category: Option<String>,
}

/// Public projection of a stored garment.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct GarmentSummary {
    pub id: Uuid,
    pub category: Category,
    pub dominant_color: Option<ColorView>,
    pub palette: Vec<ColorView>,
    pub label: Option<String>,
    pub image_ref: Option<String>,
    /// RFC 3339 timestamp.
    pub added_at: String,
}

impl From<&GarmentEntity> for GarmentSummary {
    fn from(entity: &GarmentEntity) -> Self {
        Self {
            id: entity.id,
            category: entity.category,
            dominant_color: entity.dominant_color.map(ColorView::from),
            palette: entity.palette.iter().copied().map(ColorView::from).collect(),
            label: entity.label.clone(),
            image_ref: entity.image_ref.clone(),
            added_at: format_system_time(entity.added_at),
        }
    }
}

impl From<GarmentEntity> for GarmentSummary {
    fn from(entity: GarmentEntity) -> Self {
        Self::from(&entity)
    }
}

/// Number of garments in the closet.
#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;
    use crate::outfit::Rgb;

    fn request(json: &str) -> CreateGarmentRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_request_is_valid() {
        let req = request(r#"{ "category": "top" }"#);
        assert!(req.validate().is_ok());
        assert!(req.palette.is_empty());
    }

    #[test]
    fn palette_is_capped() {
        let req = request(
            r#"{ "category": "top", "palette": [[1,1,1],[2,2,2],[3,3,3],[4,4,4],[5,5,5],[6,6,6]] }"#,
        );
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("palette"));
    }

    #[test]
    fn label_and_image_ref_lengths_are_checked() {
        let long_label = "x".repeat(65);
        let req = request(&format!(
            r#"{{ "category": "shoes", "label": "{long_label}" }}"#
        ));
        assert!(req.validate().unwrap_err().field_errors().contains_key("label"));

        let req = request(r#"{ "category": "shoes", "label": "" }"#);
        assert!(req.validate().is_err());

        let long_ref = "a".repeat(2049);
        let req = request(&format!(
            r#"{{ "category": "shoes", "image_ref": "{long_ref}" }}"#
        ));
        assert!(
            req.validate()
                .unwrap_err()
                .field_errors()
                .contains_key("image_ref")
        );
    }

    #[test]
    fn bad_hex_color_is_a_validation_error() {
        let req = request(r#"{ "category": "bottom", "dominant_color": "navy" }"#);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("dominant_color"));
    }

    #[test]
    fn unknown_category_fails_to_deserialize() {
        assert!(serde_json::from_str::<CreateGarmentRequest>(r#"{ "category": "hat" }"#).is_err());
    }

    #[test]
    fn summary_carries_hex_and_rfc3339_time() {
        let entity = GarmentEntity {
            id: Uuid::nil(),
            category: Category::Top,
            dominant_color: Some(Rgb::new(255, 0, 0)),
            palette: vec![Rgb::new(0, 0, 255)],
            label: Some("Red tee".into()),
            image_ref: None,
            added_at: SystemTime::UNIX_EPOCH + Duration::from_secs(86_400),
        };
        let summary = GarmentSummary::from(&entity);
        assert_eq!(summary.dominant_color.unwrap().hex, "#ff0000");
        assert_eq!(summary.palette[0].hex, "#0000ff");
        assert_eq!(summary.added_at, "1970-01-02T00:00:00Z");
    }
}
