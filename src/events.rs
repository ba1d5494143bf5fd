//! Events emitted back to the host.
//!
//! The engine never mutates the diagram; every model change the user's
//! gestures imply is described by a [`CanvasEvent`] returned from the
//! pointer handlers. The host applies them to its own model (ids for new
//! connections and dropped nodes are the host's to assign).

use crate::geometry::Point;
use serde_json::Value;

/// Where a dropped connection endpoint should attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef {
    pub node_id: String,
    pub anchor: String,
}

impl AnchorRef {
    pub fn new(node_id: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            anchor: anchor.into(),
        }
    }
}

/// One node's updated position during a drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMove {
    pub node_id: String,
    pub position: Point,
}

/// An interaction outcome for the host to apply or react to.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A node was clicked (pointer released within the click tolerance).
    NodeClick { node_id: String, shift: bool },
    /// Continuous drag update; each entry is a dragged node with its
    /// current diagram-space position, snapping already applied. Emitted on
    /// every pointer-move past the click tolerance.
    NodeDrag { moves: Vec<NodeMove> },
    /// A validated connection gesture completed. The host creates the
    /// connection and assigns its id.
    ConnectionAdd { from: AnchorRef, to: AnchorRef },
    /// An existing connection's curve was clicked.
    ConnectionClick { connection_id: String },
    /// The selection set changed; carries the full new set, sorted.
    SelectionChange { selected: Vec<String> },
    /// Scale or translation changed (zoom, pan, or fit).
    ViewportChange,
    /// A click landed on empty canvas (clears the selection).
    CanvasClick { position: Point },
    /// Secondary-button press, with the diagram-space position for
    /// host-side context menus.
    CanvasContextMenu {
        position: Point,
        node_id: Option<String>,
    },
    /// A palette item was dropped onto the canvas. The host materializes
    /// the node; `data` is the payload's opaque `nodeData` field.
    NodeDrop {
        node_type: String,
        position: Point,
        data: Value,
    },
}
