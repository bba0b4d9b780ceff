use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::outfit::{OutfitQuery, OutfitsResponse},
    error::AppError,
    services::outfit_service,
    state::SharedState,
};

/// Outfit suggestion endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route("/outfits/today", get(today))
}

/// Ranked outfit suggestions for today, or for the requested day.
///
/// The same closet and day always yield the same suggestions.
#[utoipa::path(
    get,
    path = "/outfits/today",
    tag = "outfits",
    params(OutfitQuery),
    responses(
        (status = 200, description = "Suggestions, best first", body = OutfitsResponse),
        (status = 400, description = "Invalid count or date"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn today(
    State(state): State<SharedState>,
    Query(query): Query<OutfitQuery>,
) -> Result<Json<OutfitsResponse>, AppError> {
    Ok(Json(outfit_service::suggest_outfits(&state, query).await?))
}
