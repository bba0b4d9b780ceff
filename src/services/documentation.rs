use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for Laundry Closet Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::closet_stream,
        crate::routes::garments::list_garments,
        crate::routes::garments::create_garment,
        crate::routes::garments::count_garments,
        crate::routes::garments::get_garment,
        crate::routes::garments::delete_garment,
        crate::routes::outfits::today,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::color::ColorView,
            crate::dto::garment::CreateGarmentRequest,
            crate::dto::garment::GarmentSummary,
            crate::dto::garment::CountResponse,
            crate::dto::outfit::OutfitsResponse,
            crate::dto::outfit::OutfitSummary,
            crate::dto::outfit::OutfitSlot,
            crate::dto::sse::SystemStatus,
            crate::dto::sse::GarmentAddedEvent,
            crate::dto::sse::GarmentRemovedEvent,
            crate::outfit::Category,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "garments", description = "Closet management"),
        (name = "outfits", description = "Daily outfit suggestions"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/healthcheck",
            "/sse/closet",
            "/garments",
            "/garments/count",
            "/garments/{id}",
            "/outfits/today",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
