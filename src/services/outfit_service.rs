//! Daily outfit suggestions computed from the current closet.

use time::{Date, format_description::well_known::Iso8601};
use tracing::debug;

use crate::{
    config::AppConfig,
    dao::models::GarmentEntity,
    dto::outfit::{OutfitQuery, OutfitSummary, OutfitsResponse},
    error::ServiceError,
    outfit::{Catalogue, DaySeed, generate},
    state::SharedState,
};

/// Number of candidates to draw, validated against the configured bounds.
fn resolve_count(config: &AppConfig, requested: Option<usize>) -> Result<usize, ServiceError> {
    let max = config.max_outfit_count();
    match requested {
        None => Ok(config.default_outfit_count()),
        Some(0) => Err(ServiceError::InvalidInput(
            "count must be at least 1".into(),
        )),
        Some(count) if count > max => Err(ServiceError::InvalidInput(format!(
            "count must not exceed {max}"
        ))),
        Some(count) => Ok(count),
    }
}

/// Day to compute suggestions for: the requested `YYYY-MM-DD`, else today.
fn resolve_date(config: &AppConfig, requested: Option<&str>) -> Result<Date, ServiceError> {
    match requested {
        Some(raw) => Date::parse(raw.trim(), &Iso8601::DATE)
            .map_err(|err| ServiceError::InvalidInput(format!("invalid date `{raw}`: {err}"))),
        None => Ok(config.today()),
    }
}

/// Rank `count` candidate outfits drawn from `garments` for `date`.
///
/// Draws index each category in the order garments were added, so the input order does not matter.
pub fn suggest_for(garments: &[GarmentEntity], date: Date, count: usize) -> OutfitsResponse {
    let seed = DaySeed::from_date(date);
    let mut oldest_first: Vec<&GarmentEntity> = garments.iter().collect();
    oldest_first.sort_by(|a, b| a.added_at.cmp(&b.added_at).then_with(|| a.id.cmp(&b.id)));
    let catalogue = Catalogue::partition(oldest_first);
    let outfits = generate(&catalogue, count, seed);

    debug!(
        %date,
        day_seed = seed.get(),
        garments = catalogue.len(),
        drawn = outfits.len(),
        "computed outfit suggestions"
    );

    OutfitsResponse {
        date: date.to_string(),
        day_seed: seed.get(),
        outfits: outfits.iter().map(OutfitSummary::from).collect(),
    }
}

/// Suggestions for the requested day using the closet currently in storage.
pub async fn suggest_outfits(
    state: &SharedState,
    query: OutfitQuery,
) -> Result<OutfitsResponse, ServiceError> {
    let count = resolve_count(state.config(), query.count)?;
    let date = resolve_date(state.config(), query.date.as_deref())?;

    let store = state.require_garment_store().await?;
    let garments = store.list_garments().await?;

    Ok(suggest_for(&garments, date, count))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use time::Month;
    use uuid::Uuid;

    use super::*;
    use crate::outfit::{Category, Rgb};

    fn garment(category: Category, color: Rgb, n: u64) -> GarmentEntity {
        GarmentEntity {
            id: Uuid::from_u128(u128::from(n)),
            category,
            dominant_color: Some(color),
            palette: Vec::new(),
            label: None,
            image_ref: None,
            added_at: SystemTime::UNIX_EPOCH + Duration::from_secs(n),
        }
    }

    fn closet() -> Vec<GarmentEntity> {
        vec![
            garment(Category::Top, Rgb::new(200, 30, 30), 1),
            garment(Category::Top, Rgb::new(240, 240, 240), 2),
            garment(Category::Bottom, Rgb::new(30, 30, 200), 3),
            garment(Category::Bottom, Rgb::new(60, 60, 60), 4),
            garment(Category::Shoes, Rgb::new(20, 20, 20), 5),
            garment(Category::Outerwear, Rgb::new(120, 90, 40), 6),
            garment(Category::Accessory, Rgb::new(200, 170, 40), 7),
        ]
    }

    #[test]
    fn count_defaults_and_bounds() {
        let config = AppConfig::default();
        assert_eq!(resolve_count(&config, None).unwrap(), 6);
        assert_eq!(resolve_count(&config, Some(24)).unwrap(), 24);
        assert!(matches!(
            resolve_count(&config, Some(0)),
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_count(&config, Some(25)),
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[test]
    fn explicit_date_is_parsed() {
        let config = AppConfig::default();
        let date = resolve_date(&config, Some("2024-03-05")).unwrap();
        assert_eq!(date, Date::from_calendar_date(2024, Month::March, 5).unwrap());
        assert!(resolve_date(&config, Some("2024-13-01")).is_err());
        assert!(resolve_date(&config, Some("yesterday")).is_err());
    }

    #[test]
    fn suggestions_are_stable_for_a_day() {
        let garments = closet();
        let date = Date::from_calendar_date(2024, Month::March, 5).unwrap();

        let first = suggest_for(&garments, date, 6);
        let second = suggest_for(&garments, date, 6);

        assert_eq!(first.date, "2024-03-05");
        assert_eq!(first.day_seed, 20_240_305);
        assert_eq!(first.outfits.len(), 6);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
        assert!(first.outfits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn every_outfit_starts_with_top_and_bottom() {
        let garments = closet();
        let date = Date::from_calendar_date(2025, Month::January, 1).unwrap();
        let response = suggest_for(&garments, date, 12);

        for outfit in &response.outfits {
            assert_eq!(outfit.slots[0].slot, Category::Top);
            assert_eq!(outfit.slots[1].slot, Category::Bottom);
            assert!(outfit.slots.iter().all(|slot| slot.color.is_some()));
            assert!(outfit.score <= 100);
        }
    }

    #[test]
    fn draws_index_garments_in_insertion_order() {
        let oldest_first = closet();
        let mut newest_first = closet();
        newest_first.reverse();
        let date = Date::from_calendar_date(2024, Month::June, 21).unwrap();

        let from_store = suggest_for(&newest_first, date, 8);
        let expected: Vec<OutfitSummary> = generate(
            &Catalogue::partition(&oldest_first),
            8,
            DaySeed::from_date(date),
        )
        .iter()
        .map(OutfitSummary::from)
        .collect();

        assert_eq!(
            serde_json::to_value(&from_store.outfits).unwrap(),
            serde_json::to_value(&expected).unwrap()
        );
    }

    #[test]
    fn closet_without_bottoms_yields_nothing() {
        let garments: Vec<_> = closet()
            .into_iter()
            .filter(|g| g.category != Category::Bottom)
            .collect();
        let date = Date::from_calendar_date(2025, Month::January, 1).unwrap();
        let response = suggest_for(&garments, date, 6);
        assert!(response.outfits.is_empty());
        assert_eq!(response.day_seed, 20_250_101);
    }
}
