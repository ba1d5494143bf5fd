//! Shared test support for the gesture-level integration tests.

#![allow(dead_code)]

pub mod harness;

pub use harness::{CanvasHarness, NODE_SIZE};

use diagram_canvas::CanvasEvent;

/// Number of events matching a predicate.
pub fn count_events(events: &[CanvasEvent], pred: impl Fn(&CanvasEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}
