use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{services::sse_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/sse/closet",
    tag = "sse",
    responses((status = 200, description = "Closet SSE stream", content_type = "text/event-stream", body = String))
)]
/// Stream closet changes and degraded mode updates to connected frontends.
pub async fn closet_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe_closet(&state);
    info!("New closet SSE connection");
    sse_service::broadcast_info(state.sse(), "closet stream connected");
    sse_service::to_sse_stream(receiver)
}

/// Configure the SSE endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/closet", get(closet_stream))
}
