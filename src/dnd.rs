//! External drop protocol.
//!
//! Palette items arrive as a JSON string (typically an HTML drag-and-drop
//! data payload):
//!
//! ```json
//! { "type": "node", "nodeType": "task", "nodeData": { "label": "Review" } }
//! ```
//!
//! `nodeData` is opaque to the engine and forwarded untouched on the
//! resulting [`crate::events::CanvasEvent::NodeDrop`]. Malformed payloads
//! and unknown `type` tags are logged and ignored; a drop must never panic
//! on hostile input.

use serde::Deserialize;
use serde_json::Value;

/// Payload `type` tag this crate understands.
const PAYLOAD_TYPE_NODE: &str = "node";

#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "nodeType")]
    node_type: String,
    #[serde(rename = "nodeData", default)]
    node_data: Value,
}

/// A parsed, accepted drop payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DropPayload {
    pub node_type: String,
    pub data: Value,
}

/// Parse a drop payload string. `None` (with a `log::warn`) for anything
/// that is not a well-formed node payload.
pub fn parse_drop_payload(raw: &str) -> Option<DropPayload> {
    let payload: RawPayload = match serde_json::from_str(raw) {
        Ok(p) => p,
        Err(err) => {
            log::warn!("ignoring malformed drop payload: {}", err);
            return None;
        }
    };

    if payload.kind != PAYLOAD_TYPE_NODE {
        log::warn!("ignoring drop payload with type {:?}", payload.kind);
        return None;
    }

    Some(DropPayload {
        node_type: payload.node_type,
        data: payload.node_data,
    })
}
