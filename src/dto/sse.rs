use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{dto::garment::GarmentSummary, outfit::Category};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Event carrying a plain text payload.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the backend enters or leaves degraded mode.
pub struct SystemStatus {
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a garment joins the closet.
pub struct GarmentAddedEvent {
    pub garment: GarmentSummary,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a garment is removed from the closet.
pub struct GarmentRemovedEvent {
    pub id: Uuid,
    pub category: Category,
}
