//! Closet management: adding, listing and removing garments.

use std::time::SystemTime;

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dao::models::GarmentEntity,
    dto::{
        color::ColorInput,
        garment::{CountResponse, CreateGarmentRequest, GarmentListQuery, GarmentSummary},
    },
    error::ServiceError,
    outfit::{Category, Rgb},
    services::sse_events,
    state::SharedState,
};

fn parse_color(input: &ColorInput) -> Result<Rgb, ServiceError> {
    Rgb::try_from(input).map_err(|err| ServiceError::InvalidInput(err.to_string()))
}

fn parse_category(raw: &str) -> Result<Category, ServiceError> {
    raw.parse::<Category>()
        .map_err(|err| ServiceError::InvalidInput(err.to_string()))
}

/// Build the entity stored for a validated creation request.
fn entity_from_request(request: CreateGarmentRequest) -> Result<GarmentEntity, ServiceError> {
    let dominant_color = request.dominant_color.as_ref().map(parse_color).transpose()?;
    let palette = request
        .palette
        .iter()
        .map(parse_color)
        .collect::<Result<Vec<_>, _>>()?;
    let label = request
        .label
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty());

    Ok(GarmentEntity {
        id: Uuid::new_v4(),
        category: request.category,
        dominant_color,
        palette,
        label,
        image_ref: request.image_ref,
        added_at: SystemTime::now(),
    })
}

/// Every garment in the closet, newest first, optionally restricted to one category.
pub async fn list_garments(
    state: &SharedState,
    query: GarmentListQuery,
) -> Result<Vec<GarmentSummary>, ServiceError> {
    let category = query.category.as_deref().map(parse_category).transpose()?;
    let store = state.require_garment_store().await?;
    let garments = match category {
        Some(category) => store.list_by_category(category).await?,
        None => store.list_garments().await?,
    };
    Ok(garments.into_iter().map(GarmentSummary::from).collect())
}

pub async fn get_garment(state: &SharedState, id: Uuid) -> Result<GarmentSummary, ServiceError> {
    let store = state.require_garment_store().await?;

    let Some(garment) = store.find_garment(id).await? else {
        return Err(ServiceError::NotFound(format!("garment `{id}` not found")));
    };

    Ok(garment.into())
}

/// Persist a new garment and announce it to SSE subscribers.
pub async fn add_garment(
    state: &SharedState,
    request: CreateGarmentRequest,
) -> Result<GarmentSummary, ServiceError> {
    let store = state.require_garment_store().await?;
    let entity = entity_from_request(request)?;
    let summary = GarmentSummary::from(&entity);
    let (id, category) = (entity.id, entity.category);

    store.save_garment(entity).await?;
    info!(%id, %category, "garment added to closet");

    sse_events::broadcast_garment_added(state, summary.clone());
    Ok(summary)
}

pub async fn delete_garment(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_garment_store().await?;

    let Some(garment) = store.find_garment(id).await? else {
        return Err(ServiceError::NotFound(format!("garment `{id}` not found")));
    };

    if !store.delete_garment(id).await? {
        debug!(%id, "garment vanished before it could be deleted");
        return Err(ServiceError::NotFound(format!("garment `{id}` not found")));
    }

    info!(%id, category = %garment.category, "garment removed from closet");
    sse_events::broadcast_garment_removed(state, id, garment.category);
    Ok(())
}

pub async fn count_garments(state: &SharedState) -> Result<CountResponse, ServiceError> {
    let store = state.require_garment_store().await?;
    let count = store.count_garments().await?;
    Ok(CountResponse { count })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig, dao::garment_store::local::LocalGarmentStore, state::AppState,
    };

    async fn ready_state() -> SharedState {
        let state = AppState::new(AppConfig::default());
        state
            .install_garment_store(Arc::new(LocalGarmentStore::in_memory()))
            .await;
        state
    }

    fn request(json: &str) -> CreateGarmentRequest {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn add_then_list_and_count() {
        let state = ready_state().await;
        let mut events = state.sse().subscribe();

        let added = add_garment(
            &state,
            request(r##"{ "category": "top", "dominant_color": "#ff0000", "label": "  Red tee " }"##),
        )
        .await
        .unwrap();
        assert_eq!(added.label.as_deref(), Some("Red tee"));
        assert_eq!(added.dominant_color.as_ref().unwrap().rgb, [255, 0, 0]);

        let event = events.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some("garment.added"));

        add_garment(&state, request(r#"{ "category": "bottom" }"#))
            .await
            .unwrap();

        let tops = list_garments(
            &state,
            GarmentListQuery {
                category: Some("TOP".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(tops.len(), 1);
        assert_eq!(tops[0].id, added.id);

        assert_eq!(count_garments(&state).await.unwrap().count, 2);
    }

    #[tokio::test]
    async fn unknown_category_filter_is_invalid_input() {
        let state = ready_state().await;
        let err = list_garments(
            &state,
            GarmentListQuery {
                category: Some("hat".into()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn delete_missing_garment_is_not_found() {
        let state = ready_state().await;
        let added = add_garment(&state, request(r#"{ "category": "shoes" }"#))
            .await
            .unwrap();

        delete_garment(&state, added.id).await.unwrap();
        assert!(matches!(
            delete_garment(&state, added.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            get_garment(&state, added.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn degraded_state_rejects_every_operation() {
        let state = AppState::new(AppConfig::default());
        assert!(matches!(
            count_garments(&state).await,
            Err(ServiceError::Degraded)
        ));
        assert!(matches!(
            add_garment(&state, request(r#"{ "category": "top" }"#)).await,
            Err(ServiceError::Degraded)
        ));
    }
}
