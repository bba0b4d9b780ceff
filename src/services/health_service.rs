use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the closet is usable, logging connectivity issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let reachable = match state.garment_store().await {
        Some(store) => match store.health_check().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "storage health check failed");
                false
            }
        },
        None => {
            warn!("storage unavailable (degraded mode)");
            false
        }
    };

    if reachable && !state.is_degraded() {
        HealthResponse::ok()
    } else {
        HealthResponse::degraded()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig, dao::garment_store::local::LocalGarmentStore,
        dto::health::HealthStatus, state::AppState,
    };

    #[tokio::test]
    async fn reports_degraded_without_a_store() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(health_status(&state).await.status, HealthStatus::Degraded);

        state
            .install_garment_store(Arc::new(LocalGarmentStore::in_memory()))
            .await;
        assert_eq!(health_status(&state).await.status, HealthStatus::Ok);
    }
}
