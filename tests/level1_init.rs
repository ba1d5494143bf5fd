//! Level 1: engine construction, viewport operations, basic canvas clicks.

mod common;

use common::{count_events, CanvasHarness};
use diagram_canvas::{CanvasEvent, Diagram, Point, Size};
use pretty_assertions::assert_eq;

// ============================================================================
// Initial state
// ============================================================================

#[test]
fn test_engine_starts_idle_with_identity_viewport() {
    let harness = CanvasHarness::new();
    assert!(harness.engine.is_idle());
    assert_eq!(harness.engine.viewport().scale, 1.0);
    assert_eq!(harness.engine.viewport().translate, Point::ZERO);
    assert!(harness.engine.selection().is_empty());
    assert!(harness.events.is_empty());
}

#[test]
fn test_catalog_anchor_positions() {
    let harness = CanvasHarness::new();
    // Node a spans (100,100)-(200,160); anchors sit 6 units off the edges.
    assert_eq!(harness.anchor_pos("a", "input"), Point::new(94.0, 130.0));
    assert_eq!(harness.anchor_pos("a", "output"), Point::new(206.0, 130.0));
    assert_eq!(harness.anchor_pos("b", "input"), Point::new(394.0, 130.0));
}

// ============================================================================
// Zoom
// ============================================================================

#[test]
fn test_wheel_zoom_emits_viewport_change() {
    let mut harness = CanvasHarness::new();
    harness.wheel_zoom(Point::new(400.0, 300.0), 1.25);
    assert_eq!(
        count_events(&harness.events, |e| matches!(e, CanvasEvent::ViewportChange)),
        1
    );
    assert!((harness.engine.viewport().scale - 1.25).abs() < 1e-4);
}

#[test]
fn test_wheel_zoom_clamps_and_goes_quiet_at_bound() {
    let mut harness = CanvasHarness::new();
    harness.wheel_zoom(Point::ZERO, 100.0);
    assert_eq!(harness.engine.viewport().scale, 3.0);
    harness.clear_events();
    // Saturated: no further change, no event.
    harness.wheel_zoom(Point::ZERO, 2.0);
    assert!(harness.events.is_empty());
}

// ============================================================================
// Pan gesture
// ============================================================================

#[test]
fn test_drag_on_empty_canvas_pans() {
    let mut harness = CanvasHarness::new();
    harness.pointer_down(Point::new(600.0, 400.0));
    harness.pointer_move(Point::new(630.0, 420.0));
    harness.pointer_move(Point::new(650.0, 450.0));
    harness.pointer_up(Point::new(650.0, 450.0));

    assert_eq!(harness.engine.viewport().translate, Point::new(50.0, 50.0));
    assert!(harness.has_event(|e| matches!(e, CanvasEvent::ViewportChange)));
    // A pan is not a click.
    assert!(!harness.has_event(|e| matches!(e, CanvasEvent::CanvasClick { .. })));
    assert!(harness.engine.is_idle());
}

// ============================================================================
// Canvas click
// ============================================================================

#[test]
fn test_empty_canvas_click_emits_position_and_clears_selection() {
    let mut harness = CanvasHarness::new();
    harness.click(Point::new(150.0, 130.0)); // select node a
    assert!(harness.engine.selection().contains("a"));
    harness.clear_events();

    harness.click(Point::new(600.0, 400.0));
    assert!(harness.has_event(|e| matches!(
        e,
        CanvasEvent::CanvasClick { position } if *position == Point::new(600.0, 400.0)
    )));
    assert_eq!(harness.last_selection(), Some(&[][..]));
    assert!(harness.engine.selection().is_empty());
}

// ============================================================================
// Fit to content
// ============================================================================

#[test]
fn test_fit_to_content_centers_diagram() {
    let mut harness = CanvasHarness::new();
    let diagram = Diagram::new(&harness.nodes, &harness.connections);
    let events = harness
        .engine
        .fit_to_content(&diagram, Size::new(800.0, 600.0), 20.0);
    assert_eq!(events, vec![CanvasEvent::ViewportChange]);

    // Content spans (100,100)-(500,160); its center maps to the viewport
    // center, and small content never zooms in past 1.0.
    let vp = harness.engine.viewport();
    assert_eq!(vp.scale, 1.0);
    let center = vp.to_screen(Point::new(300.0, 130.0));
    assert!((center.x - 400.0).abs() < 1e-3);
    assert!((center.y - 300.0).abs() < 1e-3);
}

#[test]
fn test_fit_to_content_empty_diagram_is_noop() {
    let mut harness = CanvasHarness::with_nodes(Vec::new());
    let diagram = Diagram::new(&harness.nodes, &harness.connections);
    let events = harness
        .engine
        .fit_to_content(&diagram, Size::new(800.0, 600.0), 20.0);
    assert!(events.is_empty());
    assert_eq!(harness.engine.viewport().scale, 1.0);
}
