//! UI-agnostic interaction engine for node-link diagram editors.
//!
//! This crate turns raw pointer input into diagram-editing gestures:
//! panning and zooming a viewport, dragging nodes with grid snapping and
//! alignment guides, rubber-band selection, and drawing validated
//! connections between typed anchors with magnetic snapping. It renders
//! nothing and stores no diagram: the host owns the model, passes it in as
//! a borrowed [`Diagram`] view on every event, and applies the
//! [`CanvasEvent`]s the engine emits.
//!
//! # Example
//!
//! ```
//! use diagram_canvas::{
//!     AnchorKind, AnchorSide, AnchorSpec, CanvasEngine, DataType, Diagram,
//!     Modifiers, Node, NodeTypeDescriptor, Point, PointerButton,
//!     SimpleRegistry, Size,
//! };
//!
//! let mut registry = SimpleRegistry::new();
//! registry.register(
//!     "task",
//!     NodeTypeDescriptor::new(
//!         Size::new(150.0, 80.0),
//!         [
//!             AnchorSpec::new("input", AnchorSide::Left, AnchorKind::Input, DataType::any()),
//!             AnchorSpec::new("output", AnchorSide::Right, AnchorKind::Output, DataType::any()),
//!         ],
//!     ),
//! );
//!
//! let mut engine = CanvasEngine::new(registry);
//! let nodes = vec![Node::new("n1", Point::new(100.0, 100.0), Size::new(150.0, 80.0), "task")];
//! let diagram = Diagram::new(&nodes, &[]);
//!
//! // Click the node: press and release without moving.
//! let center = Point::new(175.0, 140.0);
//! engine.pointer_down(&diagram, center, PointerButton::Primary, Modifiers::NONE);
//! let events = engine.pointer_up(&diagram, center);
//! assert!(!events.is_empty());
//! assert!(engine.selection().contains("n1"));
//! ```

pub mod dnd;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod model;
pub mod path;
pub mod registry;
pub mod selection;
pub mod snap;
pub mod validate;
pub mod viewport;

pub use dnd::{parse_drop_payload, DropPayload};
pub use events::{AnchorRef, CanvasEvent, NodeMove};
pub use geometry::{anchor_position, AnchorSide, Point, Rect, Size, ANCHOR_OUTSET};
pub use grid::grid_path;
pub use hit_test::{anchor_at, connection_at, connection_curve, node_at, nodes_in_rect};
pub use interaction::{CanvasEngine, EngineConfig, Modifiers, PointerButton};
pub use model::{Connection, Diagram, Node};
pub use path::{
    distance_to_curve, live_route_path, route_path, CubicCurve, DEFAULT_CURVE_OFFSET,
};
pub use registry::{
    resolve_anchor, resolve_anchors, AnchorKind, AnchorSpec, DataType, NodeTypeDescriptor,
    NodeTypeRegistry, ResolvedAnchor, SimpleRegistry,
};
pub use selection::SelectionManager;
pub use snap::{
    alignment_guides, snap_to_grid, snap_to_magnetic, AlignmentGuide, GuideAxis, MagneticTarget,
};
pub use validate::{
    ConnectionRule, ConnectionValidator, DirectionRule, NoDuplicates, NoSelfConnections,
    TypeCompatibility, ValidationError, ValidationResult,
};
pub use viewport::{Viewport, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};
