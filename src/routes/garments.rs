use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::garment::{CountResponse, CreateGarmentRequest, GarmentListQuery, GarmentSummary},
    error::AppError,
    services::wardrobe_service,
    state::SharedState,
};

/// Closet management endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/garments", get(list_garments).post(create_garment))
        .route("/garments/count", get(count_garments))
        .route("/garments/{id}", get(get_garment).delete(delete_garment))
}

/// List the closet, newest first.
#[utoipa::path(
    get,
    path = "/garments",
    tag = "garments",
    params(GarmentListQuery),
    responses(
        (status = 200, description = "Garments, newest first", body = [GarmentSummary]),
        (status = 400, description = "Unknown category"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn list_garments(
    State(state): State<SharedState>,
    Query(query): Query<GarmentListQuery>,
) -> Result<Json<Vec<GarmentSummary>>, AppError> {
    Ok(Json(wardrobe_service::list_garments(&state, query).await?))
}

/// Add a garment to the closet.
#[utoipa::path(
    post,
    path = "/garments",
    tag = "garments",
    request_body = CreateGarmentRequest,
    responses(
        (status = 201, description = "Garment stored", body = GarmentSummary),
        (status = 400, description = "Invalid garment"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn create_garment(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateGarmentRequest>>,
) -> Result<(StatusCode, Json<GarmentSummary>), AppError> {
    let summary = wardrobe_service::add_garment(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Number of garments in the closet.
#[utoipa::path(
    get,
    path = "/garments/count",
    tag = "garments",
    responses((status = 200, description = "Closet size", body = CountResponse))
)]
pub async fn count_garments(
    State(state): State<SharedState>,
) -> Result<Json<CountResponse>, AppError> {
    Ok(Json(wardrobe_service::count_garments(&state).await?))
}

/// Retrieve one garment.
#[utoipa::path(
    get,
    path = "/garments/{id}",
    tag = "garments",
    params(("id" = Uuid, Path, description = "Identifier of the garment")),
    responses(
        (status = 200, description = "Garment", body = GarmentSummary),
        (status = 404, description = "Unknown garment")
    )
)]
pub async fn get_garment(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GarmentSummary>, AppError> {
    Ok(Json(wardrobe_service::get_garment(&state, id).await?))
}

/// Remove a garment from the closet.
#[utoipa::path(
    delete,
    path = "/garments/{id}",
    tag = "garments",
    params(("id" = Uuid, Path, description = "Identifier of the garment to delete")),
    responses(
        (status = 204, description = "Garment deleted"),
        (status = 404, description = "Unknown garment")
    )
)]
pub async fn delete_garment(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    wardrobe_service::delete_garment(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
