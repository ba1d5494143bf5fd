//! Test harness simulating a host application.
//!
//! Owns a small diagram model and a [`CanvasEngine`], forwards pointer
//! gestures, records every emitted event and applies the mutating ones to
//! the model the way a real host would (node moves, connection creation,
//! node drops).

#![allow(dead_code)]

use diagram_canvas::{
    AnchorKind, AnchorSide, AnchorSpec, CanvasEngine, CanvasEvent, Connection, DataType, Diagram,
    Modifiers, Node, NodeTypeDescriptor, NodeTypeRegistry, Point, PointerButton, SimpleRegistry,
    Size,
};

/// Standard node body used by the default catalog.
pub const NODE_SIZE: Size = Size {
    width: 100.0,
    height: 60.0,
};

/// Node-type catalog used across the levels:
///
/// - `task`: `any` input on the left, `any` output on the right
/// - `source`: single `string` output on the right
/// - `sink`: single `number` input on the left
/// - `any_sink`: single `any` input on the left
pub fn catalog() -> SimpleRegistry {
    let mut registry = SimpleRegistry::new();
    registry.register(
        "task",
        NodeTypeDescriptor::new(
            NODE_SIZE,
            [
                AnchorSpec::new("input", AnchorSide::Left, AnchorKind::Input, DataType::any()),
                AnchorSpec::new(
                    "output",
                    AnchorSide::Right,
                    AnchorKind::Output,
                    DataType::any(),
                ),
            ],
        ),
    );
    registry.register(
        "source",
        NodeTypeDescriptor::new(
            NODE_SIZE,
            [AnchorSpec::new(
                "output",
                AnchorSide::Right,
                AnchorKind::Output,
                DataType::new("string"),
            )],
        ),
    );
    registry.register(
        "sink",
        NodeTypeDescriptor::new(
            NODE_SIZE,
            [AnchorSpec::new(
                "input",
                AnchorSide::Left,
                AnchorKind::Input,
                DataType::new("number"),
            )],
        ),
    );
    registry.register(
        "any_sink",
        NodeTypeDescriptor::new(
            NODE_SIZE,
            [AnchorSpec::new(
                "input",
                AnchorSide::Left,
                AnchorKind::Input,
                DataType::any(),
            )],
        ),
    );
    registry
}

pub struct CanvasHarness {
    pub engine: CanvasEngine<SimpleRegistry>,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub events: Vec<CanvasEvent>,
}

impl CanvasHarness {
    /// Harness with the default two-node diagram: task `a` at (100, 100),
    /// task `b` at (400, 100).
    pub fn new() -> Self {
        Self::with_nodes(vec![
            Node::new("a", Point::new(100.0, 100.0), NODE_SIZE, "task"),
            Node::new("b", Point::new(400.0, 100.0), NODE_SIZE, "task"),
        ])
    }

    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        Self {
            engine: CanvasEngine::new(catalog()),
            nodes,
            connections: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn node(&self, id: &str) -> &Node {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .unwrap_or_else(|| panic!("no node {id}"))
    }

    pub fn remove_node(&mut self, id: &str) {
        self.nodes.retain(|n| n.id != id);
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Diagram-space anchor position for `node_id`/`anchor` at the current
    /// model state.
    pub fn anchor_pos(&self, node_id: &str, anchor: &str) -> Point {
        let node = self.node(node_id);
        diagram_canvas::resolve_anchor(node, anchor, self.engine.registry())
            .unwrap_or_else(|| panic!("no anchor {node_id}.{anchor}"))
            .position
    }

    // ------------------------------------------------------------------
    // Raw pointer forwarding
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, screen: Point) {
        self.pointer_down_with(screen, PointerButton::Primary, Modifiers::NONE);
    }

    pub fn pointer_down_with(&mut self, screen: Point, button: PointerButton, mods: Modifiers) {
        let diagram = Diagram::new(&self.nodes, &self.connections);
        let events = self.engine.pointer_down(&diagram, screen, button, mods);
        self.apply(events);
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let diagram = Diagram::new(&self.nodes, &self.connections);
        let events = self.engine.pointer_move(&diagram, screen);
        self.apply(events);
    }

    pub fn pointer_up(&mut self, screen: Point) {
        let diagram = Diagram::new(&self.nodes, &self.connections);
        let events = self.engine.pointer_up(&diagram, screen);
        self.apply(events);
    }

    pub fn context_menu(&mut self, screen: Point) {
        let diagram = Diagram::new(&self.nodes, &self.connections);
        let events = self.engine.context_menu(&diagram, screen);
        self.apply(events);
    }

    pub fn drop_payload(&mut self, screen: Point, payload: &str) {
        let events = self.engine.handle_drop(screen, payload);
        self.apply(events);
    }

    pub fn wheel_zoom(&mut self, screen: Point, factor: f32) {
        let events = self.engine.wheel_zoom(screen, factor);
        self.apply(events);
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    pub fn click(&mut self, screen: Point) {
        self.pointer_down(screen);
        self.pointer_up(screen);
    }

    pub fn shift_click(&mut self, screen: Point) {
        self.pointer_down_with(screen, PointerButton::Primary, Modifiers::SHIFT);
        self.pointer_up(screen);
    }

    /// Press at `from`, move through a midpoint to `to`, release.
    pub fn drag(&mut self, from: Point, to: Point) {
        self.drag_with(from, to, Modifiers::NONE);
    }

    pub fn drag_with(&mut self, from: Point, to: Point, mods: Modifiers) {
        self.pointer_down_with(from, PointerButton::Primary, mods);
        let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
        self.pointer_move(mid);
        self.pointer_move(to);
        self.pointer_up(to);
    }

    // ------------------------------------------------------------------
    // Event application (the "host" side)
    // ------------------------------------------------------------------

    fn apply(&mut self, events: Vec<CanvasEvent>) {
        for event in &events {
            match event {
                CanvasEvent::NodeDrag { moves } => {
                    for m in moves {
                        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == m.node_id) {
                            node.position = m.position;
                        }
                    }
                }
                CanvasEvent::ConnectionAdd { from, to } => {
                    let id = format!("c{}", self.connections.len() + 1);
                    self.connections.push(Connection::new(
                        id,
                        from.node_id.clone(),
                        from.anchor.clone(),
                        to.node_id.clone(),
                        to.anchor.clone(),
                    ));
                }
                CanvasEvent::NodeDrop {
                    node_type,
                    position,
                    ..
                } => {
                    let size = self
                        .engine
                        .registry()
                        .lookup(node_type)
                        .map(|d| d.default_size)
                        .unwrap_or(NODE_SIZE);
                    let id = format!("n{}", self.nodes.len() + 1);
                    self.nodes.push(Node::new(id, *position, size, node_type.clone()));
                }
                _ => {}
            }
        }
        self.events.extend(events);
    }

    // ------------------------------------------------------------------
    // Event queries
    // ------------------------------------------------------------------

    pub fn has_event(&self, pred: impl Fn(&CanvasEvent) -> bool) -> bool {
        self.events.iter().any(|e| pred(e))
    }

    /// The most recent `SelectionChange` payload, if any was emitted.
    pub fn last_selection(&self) -> Option<&[String]> {
        self.events.iter().rev().find_map(|e| match e {
            CanvasEvent::SelectionChange { selected } => Some(selected.as_slice()),
            _ => None,
        })
    }
}

impl Default for CanvasHarness {
    fn default() -> Self {
        Self::new()
    }
}
