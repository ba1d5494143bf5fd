//! Node-type registry seam.
//!
//! The engine stays agnostic of the concrete node-type catalog: anchor
//! layouts (and default sizes for dropped nodes) are looked up through the
//! [`NodeTypeRegistry`] trait the host injects. [`SimpleRegistry`] is the
//! HashMap-backed default.

use crate::geometry::{anchor_position, AnchorSide, Point, Size};
use crate::model::Node;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Direction class of an anchor. Connections always run output → input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    Input,
    Output,
}

/// Data-type tag carried by an anchor, used for compatibility checks.
///
/// An open string tag; the wildcard `any` is compatible with everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType(String);

impl DataType {
    pub const ANY: &'static str = "any";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn any() -> Self {
        Self(Self::ANY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        self.0 == Self::ANY
    }

    /// Symmetric compatibility: equal tags, or either side is `any`.
    pub fn compatible_with(&self, other: &DataType) -> bool {
        self.is_any() || other.is_any() || self.0 == other.0
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One anchor in a node type's layout.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorSpec {
    /// Anchor identifier, unique within the node type (`"input"`,
    /// `"output"`, or a custom port name).
    pub name: String,
    pub side: AnchorSide,
    pub kind: AnchorKind,
    pub data_type: DataType,
    /// Fractional position along the side's edge, 0.0..=1.0.
    pub t: f32,
}

impl AnchorSpec {
    pub fn new(
        name: impl Into<String>,
        side: AnchorSide,
        kind: AnchorKind,
        data_type: DataType,
    ) -> Self {
        Self {
            name: name.into(),
            side,
            kind,
            data_type,
            t: 0.5,
        }
    }

    pub fn at(mut self, t: f32) -> Self {
        self.t = t;
        self
    }
}

/// Per-type configuration the engine needs: anchor layout and the default
/// size applied to dropped nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTypeDescriptor {
    pub default_size: Size,
    pub anchors: SmallVec<[AnchorSpec; 4]>,
}

impl NodeTypeDescriptor {
    pub fn new(default_size: Size, anchors: impl IntoIterator<Item = AnchorSpec>) -> Self {
        Self {
            default_size,
            anchors: anchors.into_iter().collect(),
        }
    }

    pub fn anchor(&self, name: &str) -> Option<&AnchorSpec> {
        self.anchors.iter().find(|a| a.name == name)
    }
}

/// Lookup seam between the engine and the host's node-type catalog.
pub trait NodeTypeRegistry {
    fn lookup(&self, type_name: &str) -> Option<&NodeTypeDescriptor>;
}

/// HashMap-backed registry. Sufficient for most hosts; implement
/// [`NodeTypeRegistry`] directly when the catalog lives elsewhere.
#[derive(Debug, Default)]
pub struct SimpleRegistry {
    types: HashMap<String, NodeTypeDescriptor>,
}

impl SimpleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, type_name: impl Into<String>, descriptor: NodeTypeDescriptor) {
        self.types.insert(type_name.into(), descriptor);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl NodeTypeRegistry for SimpleRegistry {
    fn lookup(&self, type_name: &str) -> Option<&NodeTypeDescriptor> {
        self.types.get(type_name)
    }
}

/// An anchor resolved against a concrete node: identity, classification and
/// the derived diagram-space position. Never stored; recomputed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAnchor {
    pub node_id: String,
    pub name: String,
    pub side: AnchorSide,
    pub kind: AnchorKind,
    pub data_type: DataType,
    pub position: Point,
}

/// Resolve every anchor of `node`. A node whose type has no registry entry
/// resolves to no anchors (it still drags and selects normally).
pub fn resolve_anchors<'a, R: NodeTypeRegistry + ?Sized>(
    node: &'a Node,
    registry: &'a R,
) -> impl Iterator<Item = ResolvedAnchor> + 'a {
    registry
        .lookup(&node.type_name)
        .map(|d| d.anchors.as_slice())
        .unwrap_or(&[])
        .iter()
        .map(move |spec| ResolvedAnchor {
            node_id: node.id.clone(),
            name: spec.name.clone(),
            side: spec.side,
            kind: spec.kind,
            data_type: spec.data_type.clone(),
            position: anchor_position(node.position, node.size, spec.side, spec.t),
        })
}

/// Resolve a single named anchor of `node`, `None` when the node type or
/// anchor name is unknown.
pub fn resolve_anchor<R: NodeTypeRegistry + ?Sized>(
    node: &Node,
    anchor_name: &str,
    registry: &R,
) -> Option<ResolvedAnchor> {
    let spec = registry.lookup(&node.type_name)?.anchor(anchor_name)?;
    Some(ResolvedAnchor {
        node_id: node.id.clone(),
        name: spec.name.clone(),
        side: spec.side,
        kind: spec.kind,
        data_type: spec.data_type.clone(),
        position: anchor_position(node.position, node.size, spec.side, spec.t),
    })
}
