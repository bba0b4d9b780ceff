use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod garments;
pub mod health;
pub mod outfits;
pub mod sse;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(sse::router())
        .merge(garments::router())
        .merge(outfits::router())
        .merge(docs::router())
        .with_state(state)
}
