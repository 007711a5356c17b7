//! Realtime relay boundary.
//!
//! Mutations republish `{type, payload}` messages to a named realtime
//! channel so other open sessions refresh their lists. The relay is an
//! opaque collaborator here: mutations hand a [`BroadcastEvent`] to a
//! [`BroadcastPublisher`] and move on. A failed publish never fails the
//! mutation that triggered it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message relayed to a named realtime channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastEvent {
    pub channel: String,
    pub event_type: String,
    pub payload: Value,
}

impl BroadcastEvent {
    pub fn new(
        channel: impl Into<String>,
        event_type: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            channel: channel.into(),
            event_type: event_type.into(),
            payload,
        }
    }
}

/// Outbound hook to the realtime relay endpoint.
pub trait BroadcastPublisher: Send + Sync {
    fn publish(&self, event: BroadcastEvent) -> Result<(), BroadcastError>;
}

/// Relay dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("broadcast transport unavailable: {0}")]
    Transport(String),
}
