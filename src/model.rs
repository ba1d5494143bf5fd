//! Caller-owned diagram entities.
//!
//! The engine never stores or mutates the diagram: nodes and connections are
//! passed in as a borrowed [`Diagram`] view on every pointer event, and all
//! mutations flow back out as [`crate::events::CanvasEvent`]s for the host
//! to apply. The engine assumes the host applies them synchronously before
//! the next interaction frame.

use crate::geometry::{Point, Rect, Size};

/// A node in the diagram. Position and size are in diagram space;
/// `type_name` selects the anchor layout via the
/// [`crate::registry::NodeTypeRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub position: Point,
    pub size: Size,
    pub type_name: String,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        position: Point,
        size: Size,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            size,
            type_name: type_name.into(),
        }
    }

    /// Bounding box of the node body.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height,
        )
    }
}

/// A directional edge between two anchors. Created only through the
/// connection-drawing gesture, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: String,
    pub from_node: String,
    pub from_anchor: String,
    pub to_node: String,
    pub to_anchor: String,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        from_node: impl Into<String>,
        from_anchor: impl Into<String>,
        to_node: impl Into<String>,
        to_anchor: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_node: from_node.into(),
            from_anchor: from_anchor.into(),
            to_node: to_node.into(),
            to_anchor: to_anchor.into(),
        }
    }
}

/// Borrowed read-only view over the host's diagram model.
#[derive(Debug, Clone, Copy)]
pub struct Diagram<'a> {
    pub nodes: &'a [Node],
    pub connections: &'a [Connection],
}

impl<'a> Diagram<'a> {
    pub fn new(nodes: &'a [Node], connections: &'a [Connection]) -> Self {
        Self { nodes, connections }
    }

    /// Look up a node by id. `None` for stale references (a node removed by
    /// an external mutation mid-gesture).
    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Bounding box of all node bodies, or `None` for an empty diagram.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut iter = self.nodes.iter();
        let first = iter.next()?.bounds();
        Some(iter.fold(first, |acc, n| acc.union(&n.bounds())))
    }
}
