use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::{
        garment::GarmentSummary,
        sse::{GarmentAddedEvent, GarmentRemovedEvent, ServerEvent, SystemStatus},
    },
    outfit::Category,
    state::{SharedState, SseHub},
};

const EVENT_GARMENT_ADDED: &str = "garment.added";
const EVENT_GARMENT_REMOVED: &str = "garment.removed";
const EVENT_SYSTEM_STATUS: &str = "system.status";

/// Broadcast that a garment joined the closet.
pub fn broadcast_garment_added(state: &SharedState, garment: GarmentSummary) {
    let payload = GarmentAddedEvent { garment };
    send_event(state.sse(), EVENT_GARMENT_ADDED, &payload);
}

/// Broadcast that a garment left the closet.
pub fn broadcast_garment_removed(state: &SharedState, id: Uuid, category: Category) {
    let payload = GarmentRemovedEvent { id, category };
    send_event(state.sse(), EVENT_GARMENT_REMOVED, &payload);
}

/// Broadcast a degraded mode change.
pub fn broadcast_system_status(hub: &SseHub, degraded: bool) {
    send_event(hub, EVENT_SYSTEM_STATUS, &SystemStatus { degraded });
}

fn send_event(hub: &SseHub, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => hub.broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
    }
}
