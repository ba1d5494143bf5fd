//! The interaction state machine.
//!
//! [`CanvasEngine`] turns raw pointer input into diagram gestures. It owns
//! the viewport, the selection set and a single active [`Mode`]; every
//! pointer-down leaves `Idle` for exactly one mode and every pointer-up or
//! cancellation returns to `Idle`. The engine hit-tests internally
//! (anchor, then node body, then connection, then empty canvas) so hosts
//! only forward events.
//!
//! Outcomes flow back as [`CanvasEvent`]s; transient visuals (rubber band,
//! live connection, magnetic target, alignment guides) are polled through
//! accessors each frame instead of being pushed.

use crate::dnd::parse_drop_payload;
use crate::events::{AnchorRef, CanvasEvent, NodeMove};
use crate::geometry::{Point, Rect, Size};
use crate::hit_test::{anchor_at, connection_at, node_at, nodes_in_rect};
use crate::model::Diagram;
use crate::path::{live_route_path, CubicCurve, DEFAULT_CURVE_OFFSET};
use crate::registry::{resolve_anchors, NodeTypeRegistry, ResolvedAnchor};
use crate::selection::SelectionManager;
use crate::snap::{alignment_guides, snap_to_grid, snap_to_magnetic, AlignmentGuide, MagneticTarget};
use crate::validate::{ConnectionValidator, ValidationResult};
use crate::viewport::Viewport;
use smallvec::SmallVec;

/// Pointer button classification. Anything beyond primary and secondary is
/// ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

/// Tuning knobs for gesture recognition and snapping. Pixel-denominated
/// fields are screen pixels, constant across zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Grid cell size in diagram units.
    pub grid_size: f32,
    /// Snap dragged nodes and dropped nodes to the grid.
    pub snap_to_grid: bool,
    /// Attraction radius of anchors while drawing a connection.
    pub magnetic_threshold_px: f32,
    /// Hit radius around anchor dots on pointer-down.
    pub anchor_hit_radius_px: f32,
    /// Hit tolerance around connection curves.
    pub connection_hit_tolerance_px: f32,
    /// Below this much pointer travel a press-release pair is a click.
    pub click_tolerance_px: f32,
    /// Edge/center alignment detection distance while dragging.
    pub alignment_tolerance_px: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            snap_to_grid: true,
            magnetic_threshold_px: 20.0,
            anchor_hit_radius_px: 10.0,
            connection_hit_tolerance_px: 6.0,
            click_tolerance_px: 4.0,
            alignment_tolerance_px: 5.0,
            min_scale: crate::viewport::DEFAULT_MIN_SCALE,
            max_scale: crate::viewport::DEFAULT_MAX_SCALE,
        }
    }
}

/// The single active gesture. Exactly one variant is live at a time.
enum Mode {
    Idle,
    Panning {
        press_screen: Point,
        last_screen: Point,
    },
    RubberBand {
        /// Fixed corner, diagram space.
        origin: Point,
        cursor: Point,
    },
    DraggingNode {
        node_id: String,
        /// Pointer position minus node position at press, diagram space.
        grab_offset: Point,
        /// Original positions of every node in the drag group.
        start_positions: Vec<(String, Point)>,
        press_screen: Point,
        /// Whether the pointer ever left the click tolerance.
        moved: bool,
        shift: bool,
        guides: SmallVec<[AlignmentGuide; 8]>,
    },
    Connecting {
        from: ResolvedAnchor,
        cursor: Point,
        target: Option<MagneticTarget>,
    },
}

impl Mode {
    fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Panning { .. } => "panning",
            Mode::RubberBand { .. } => "rubber-band",
            Mode::DraggingNode { .. } => "dragging-node",
            Mode::Connecting { .. } => "connecting",
        }
    }
}

/// UI-agnostic interaction engine for a node-link diagram canvas.
///
/// The host forwards pointer input together with a borrowed [`Diagram`]
/// view of its model and applies the returned events. The engine never
/// mutates the diagram.
pub struct CanvasEngine<R: NodeTypeRegistry> {
    config: EngineConfig,
    viewport: Viewport,
    selection: SelectionManager,
    validator: ConnectionValidator,
    registry: R,
    mode: Mode,
}

impl<R: NodeTypeRegistry> CanvasEngine<R> {
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    pub fn with_config(registry: R, config: EngineConfig) -> Self {
        let viewport = Viewport::with_scale_bounds(config.min_scale, config.max_scale);
        Self {
            config,
            viewport,
            selection: SelectionManager::new(),
            validator: ConnectionValidator::new(),
            registry,
            mode: Mode::Idle,
        }
    }

    /// Swap in a validator with host-specific rules.
    pub fn set_validator(&mut self, validator: ConnectionValidator) {
        self.validator = validator;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mutable config access for runtime toggles (snap on/off, grid size).
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, Mode::Idle)
    }

    /// Name of the active mode, for host-side debugging.
    pub fn mode_name(&self) -> &'static str {
        self.mode.name()
    }

    fn enter(&mut self, mode: Mode) {
        log::debug!("mode {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
    }

    // ------------------------------------------------------------------
    // Transient feedback accessors
    // ------------------------------------------------------------------

    /// Current rubber-band rectangle in diagram space, if one is active.
    pub fn rubber_band_rect(&self) -> Option<Rect> {
        match &self.mode {
            Mode::RubberBand { origin, cursor } => Some(Rect::from_points(*origin, *cursor)),
            _ => None,
        }
    }

    /// Live connection curve from the source anchor to the (possibly
    /// magnetically snapped) cursor.
    pub fn live_connection(&self) -> Option<CubicCurve> {
        match &self.mode {
            Mode::Connecting { from, cursor, .. } => Some(live_route_path(
                from.position,
                from.side,
                *cursor,
                DEFAULT_CURVE_OFFSET,
            )),
            _ => None,
        }
    }

    /// Anchor the live connection is currently snapped onto.
    pub fn magnetic_target(&self) -> Option<&MagneticTarget> {
        match &self.mode {
            Mode::Connecting { target, .. } => target.as_ref(),
            _ => None,
        }
    }

    /// Alignment guides for the node being dragged.
    pub fn drag_alignment_guides(&self) -> &[AlignmentGuide] {
        match &self.mode {
            Mode::DraggingNode { guides, .. } => guides,
            _ => &[],
        }
    }

    /// Routed curve for an existing connection, for rendering. `None` when
    /// either endpoint is stale.
    pub fn connection_curve(
        &self,
        diagram: &Diagram<'_>,
        connection: &crate::model::Connection,
    ) -> Option<CubicCurve> {
        crate::hit_test::connection_curve(connection, diagram, &self.registry)
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Handle a pointer press. Ignored unless the engine is idle.
    pub fn pointer_down(
        &mut self,
        diagram: &Diagram<'_>,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Vec<CanvasEvent> {
        if !self.is_idle() {
            return Vec::new();
        }
        if button == PointerButton::Secondary {
            return self.context_menu(diagram, screen);
        }

        let point = self.viewport.to_diagram(screen);

        if let Some(anchor) = anchor_at(
            point,
            diagram.nodes,
            &self.registry,
            self.config.anchor_hit_radius_px,
            self.viewport.scale,
        ) {
            self.enter(Mode::Connecting {
                from: anchor,
                cursor: point,
                target: None,
            });
            return Vec::new();
        }

        if let Some(node) = node_at(point, diagram.nodes) {
            let group: Vec<(String, Point)> = if self.selection.contains(&node.id) {
                diagram
                    .nodes
                    .iter()
                    .filter(|n| self.selection.contains(&n.id))
                    .map(|n| (n.id.clone(), n.position))
                    .collect()
            } else {
                vec![(node.id.clone(), node.position)]
            };
            self.enter(Mode::DraggingNode {
                node_id: node.id.clone(),
                grab_offset: point - node.position,
                start_positions: group,
                press_screen: screen,
                moved: false,
                shift: modifiers.shift,
                guides: SmallVec::new(),
            });
            return Vec::new();
        }

        if let Some(connection) = connection_at(
            point,
            diagram,
            &self.registry,
            self.config.connection_hit_tolerance_px,
            self.viewport.scale,
        ) {
            return vec![CanvasEvent::ConnectionClick {
                connection_id: connection.id.clone(),
            }];
        }

        if modifiers.shift {
            self.enter(Mode::RubberBand {
                origin: point,
                cursor: point,
            });
        } else {
            self.enter(Mode::Panning {
                press_screen: screen,
                last_screen: screen,
            });
        }
        Vec::new()
    }

    /// Handle pointer movement for the active gesture.
    pub fn pointer_move(&mut self, diagram: &Diagram<'_>, screen: Point) -> Vec<CanvasEvent> {
        match &mut self.mode {
            Mode::Idle => Vec::new(),

            Mode::Panning { last_screen, .. } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.viewport.pan_by(delta);
                vec![CanvasEvent::ViewportChange]
            }

            Mode::RubberBand { origin, cursor } => {
                *cursor = self.viewport.to_diagram(screen);
                let rect = Rect::from_points(*origin, *cursor);
                let hit: Vec<String> = nodes_in_rect(rect, diagram.nodes)
                    .into_iter()
                    .map(|n| n.id.clone())
                    .collect();
                if self.selection.replace_selection(hit) {
                    vec![CanvasEvent::SelectionChange {
                        selected: self.selection.ids(),
                    }]
                } else {
                    Vec::new()
                }
            }

            Mode::DraggingNode {
                node_id,
                grab_offset,
                start_positions,
                press_screen,
                moved,
                guides,
                ..
            } => {
                if !*moved
                    && screen.distance_to(*press_screen) <= self.config.click_tolerance_px
                {
                    return Vec::new();
                }
                *moved = true;

                // Stale grab: the node was removed mid-gesture.
                let Some(primary) = diagram.node(node_id) else {
                    guides.clear();
                    return Vec::new();
                };
                let primary_start = start_positions
                    .iter()
                    .find(|(id, _)| id == node_id)
                    .map(|(_, p)| *p)
                    .unwrap_or(primary.position);

                let pointer = self.viewport.to_diagram(screen);
                let mut primary_new = pointer - *grab_offset;
                if self.config.snap_to_grid {
                    primary_new = snap_to_grid(primary_new, self.config.grid_size);
                }
                let delta = primary_new - primary_start;

                let moves: Vec<NodeMove> = start_positions
                    .iter()
                    .filter(|(id, _)| diagram.node(id).is_some())
                    .map(|(id, start)| NodeMove {
                        node_id: id.clone(),
                        position: *start + delta,
                    })
                    .collect();

                let moving_bounds = Rect::new(
                    primary_new.x,
                    primary_new.y,
                    primary.size.width,
                    primary.size.height,
                );
                let others: Vec<Rect> = diagram
                    .nodes
                    .iter()
                    .filter(|n| !start_positions.iter().any(|(id, _)| id == &n.id))
                    .map(|n| n.bounds())
                    .collect();
                *guides = alignment_guides(
                    moving_bounds,
                    &others,
                    self.config.alignment_tolerance_px / self.viewport.scale,
                );

                if moves.is_empty() {
                    Vec::new()
                } else {
                    vec![CanvasEvent::NodeDrag { moves }]
                }
            }

            Mode::Connecting {
                from,
                cursor,
                target,
            } => {
                let pointer = self.viewport.to_diagram(screen);
                let candidates = compatible_anchors(from, diagram, &self.registry, &self.validator);
                let (snapped, new_target) = snap_to_magnetic(
                    pointer,
                    &candidates,
                    Some(from.node_id.as_str()),
                    self.config.magnetic_threshold_px,
                    self.viewport.scale,
                );
                *cursor = snapped;
                *target = new_target;
                Vec::new()
            }
        }
    }

    /// Handle pointer release: finalize the active gesture and return to
    /// idle.
    pub fn pointer_up(&mut self, diagram: &Diagram<'_>, screen: Point) -> Vec<CanvasEvent> {
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        if !matches!(mode, Mode::Idle) {
            log::debug!("mode {} -> idle", mode.name());
        }

        match mode {
            Mode::Idle => Vec::new(),

            Mode::Panning { press_screen, .. } => {
                if screen.distance_to(press_screen) <= self.config.click_tolerance_px {
                    let mut events = vec![CanvasEvent::CanvasClick {
                        position: self.viewport.to_diagram(screen),
                    }];
                    if self.selection.clear() {
                        events.push(CanvasEvent::SelectionChange {
                            selected: Vec::new(),
                        });
                    }
                    events
                } else {
                    Vec::new()
                }
            }

            // Selection was committed live on every move.
            Mode::RubberBand { .. } => Vec::new(),

            Mode::DraggingNode {
                node_id,
                moved,
                shift,
                ..
            } => {
                if moved {
                    return Vec::new();
                }
                if diagram.node(&node_id).is_none() {
                    return Vec::new();
                }
                let mut events = vec![CanvasEvent::NodeClick {
                    node_id: node_id.clone(),
                    shift,
                }];
                if self.selection.handle_interaction(&node_id, shift) {
                    events.push(CanvasEvent::SelectionChange {
                        selected: self.selection.ids(),
                    });
                }
                events
            }

            Mode::Connecting { from, target, .. } => {
                let point = self.viewport.to_diagram(screen);
                let to = match target {
                    Some(t) => resolve_target(&t, diagram, &self.registry),
                    None => anchor_at(
                        point,
                        diagram.nodes,
                        &self.registry,
                        self.config.anchor_hit_radius_px,
                        self.viewport.scale,
                    ),
                };
                let Some(to) = to else {
                    return Vec::new();
                };
                match self.validator.validate(&from, &to, diagram) {
                    ValidationResult::Valid => vec![CanvasEvent::ConnectionAdd {
                        from: AnchorRef::new(from.node_id, from.name),
                        to: AnchorRef::new(to.node_id, to.name),
                    }],
                    ValidationResult::Invalid(err) => {
                        log::debug!("connection rejected: {}", err);
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Escape: discard the in-progress gesture without emitting anything.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            log::debug!("mode {} cancelled", self.mode.name());
            self.mode = Mode::Idle;
        }
    }

    // ------------------------------------------------------------------
    // Viewport input
    // ------------------------------------------------------------------

    /// Zoom by `factor` around a screen point (wheel or pinch input).
    pub fn wheel_zoom(&mut self, screen: Point, factor: f32) -> Vec<CanvasEvent> {
        if self.viewport.zoom_at(screen, factor) {
            vec![CanvasEvent::ViewportChange]
        } else {
            Vec::new()
        }
    }

    /// Fit the diagram's content into `viewport_size` with `margin`.
    pub fn fit_to_content(
        &mut self,
        diagram: &Diagram<'_>,
        viewport_size: Size,
        margin: f32,
    ) -> Vec<CanvasEvent> {
        let Some(bounds) = diagram.content_bounds() else {
            return Vec::new();
        };
        if self.viewport.fit_to_content(bounds, viewport_size, margin) {
            vec![CanvasEvent::ViewportChange]
        } else {
            Vec::new()
        }
    }

    // ------------------------------------------------------------------
    // External input
    // ------------------------------------------------------------------

    /// Secondary-button press: emit a context-menu event with the
    /// diagram-space position and the node under the pointer, if any.
    pub fn context_menu(&mut self, diagram: &Diagram<'_>, screen: Point) -> Vec<CanvasEvent> {
        let point = self.viewport.to_diagram(screen);
        vec![CanvasEvent::CanvasContextMenu {
            position: point,
            node_id: node_at(point, diagram.nodes).map(|n| n.id.clone()),
        }]
    }

    /// Drop selected ids whose nodes no longer exist in the diagram.
    /// Hosts call this after deleting nodes.
    pub fn prune_selection(&mut self, diagram: &Diagram<'_>) -> Vec<CanvasEvent> {
        let existing = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
        if self.selection.retain_existing(&existing) {
            vec![CanvasEvent::SelectionChange {
                selected: self.selection.ids(),
            }]
        } else {
            Vec::new()
        }
    }

    /// Handle an external drop at a screen point carrying a serialized
    /// palette payload. Malformed payloads are ignored.
    pub fn handle_drop(&mut self, screen: Point, payload: &str) -> Vec<CanvasEvent> {
        let Some(payload) = parse_drop_payload(payload) else {
            return Vec::new();
        };
        let mut position = self.viewport.to_diagram(screen);
        if self.config.snap_to_grid {
            position = snap_to_grid(position, self.config.grid_size);
        }
        vec![CanvasEvent::NodeDrop {
            node_type: payload.node_type,
            position,
            data: payload.data,
        }]
    }
}

/// Anchors a connection from `from` could legally end on, per the
/// validator. Magnetic snapping only ever attracts toward these.
fn compatible_anchors<R: NodeTypeRegistry>(
    from: &ResolvedAnchor,
    diagram: &Diagram<'_>,
    registry: &R,
    validator: &ConnectionValidator,
) -> Vec<ResolvedAnchor> {
    diagram
        .nodes
        .iter()
        .flat_map(|n| resolve_anchors(n, registry))
        .filter(|candidate| validator.validate(from, candidate, diagram).is_valid())
        .collect()
}

/// Re-resolve a magnetic target against the current diagram. `None` when
/// the node vanished mid-gesture.
fn resolve_target<R: NodeTypeRegistry>(
    target: &MagneticTarget,
    diagram: &Diagram<'_>,
    registry: &R,
) -> Option<ResolvedAnchor> {
    let node = diagram.node(&target.node_id)?;
    crate::registry::resolve_anchor(node, &target.anchor, registry)
}
