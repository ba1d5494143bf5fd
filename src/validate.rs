//! Connection validation.
//!
//! A [`ConnectionValidator`] runs an ordered chain of [`ConnectionRule`]s
//! against a proposed connection and reports the first failure. The same
//! validator serves two moments: live feedback while a connection is being
//! dragged over a candidate anchor, and the final check on release before a
//! [`crate::events::CanvasEvent::ConnectionAdd`] is emitted.
//!
//! The engine never creates an invalid connection; a failed check on
//! release cancels the gesture silently.

use crate::model::Diagram;
use crate::registry::{AnchorKind, ResolvedAnchor};
use std::fmt;

/// Why a proposed connection was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Both anchors belong to the same node.
    SelfConnection,
    /// The source is not an output or the target is not an input.
    DirectionMismatch {
        from_kind: AnchorKind,
        to_kind: AnchorKind,
    },
    /// The anchors carry incompatible data-type tags.
    TypeMismatch { from_type: String, to_type: String },
    /// An identical connection already exists.
    Duplicate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfConnection => write!(f, "connection targets its own node"),
            Self::DirectionMismatch { from_kind, to_kind } => write!(
                f,
                "connections run output to input (got {:?} to {:?})",
                from_kind, to_kind
            ),
            Self::TypeMismatch { from_type, to_type } => {
                write!(f, "incompatible data types: {} vs {}", from_type, to_type)
            }
            Self::Duplicate => write!(f, "connection already exists"),
        }
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Short-circuiting combinator: the first `Invalid` wins.
    pub fn and(self, next: impl FnOnce() -> ValidationResult) -> ValidationResult {
        match self {
            Self::Valid => next(),
            invalid => invalid,
        }
    }
}

/// A single validation rule. Rules are checked in the order the validator
/// holds them; implement this to add host-specific constraints (cycle
/// prevention, cardinality limits) on top of the built-ins.
pub trait ConnectionRule {
    fn check(
        &self,
        from: &ResolvedAnchor,
        to: &ResolvedAnchor,
        diagram: &Diagram<'_>,
    ) -> ValidationResult;
}

/// Rejects connections whose endpoints sit on the same node.
pub struct NoSelfConnections;

impl ConnectionRule for NoSelfConnections {
    fn check(
        &self,
        from: &ResolvedAnchor,
        to: &ResolvedAnchor,
        _diagram: &Diagram<'_>,
    ) -> ValidationResult {
        if from.node_id == to.node_id {
            ValidationResult::Invalid(ValidationError::SelfConnection)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Requires the source anchor to be an output and the target an input.
pub struct DirectionRule;

impl ConnectionRule for DirectionRule {
    fn check(
        &self,
        from: &ResolvedAnchor,
        to: &ResolvedAnchor,
        _diagram: &Diagram<'_>,
    ) -> ValidationResult {
        if from.kind == AnchorKind::Output && to.kind == AnchorKind::Input {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::DirectionMismatch {
                from_kind: from.kind,
                to_kind: to.kind,
            })
        }
    }
}

/// Requires compatible data-type tags on both anchors (`any` matches all).
pub struct TypeCompatibility;

impl ConnectionRule for TypeCompatibility {
    fn check(
        &self,
        from: &ResolvedAnchor,
        to: &ResolvedAnchor,
        _diagram: &Diagram<'_>,
    ) -> ValidationResult {
        if from.data_type.compatible_with(&to.data_type) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::TypeMismatch {
                from_type: from.data_type.as_str().to_string(),
                to_type: to.data_type.as_str().to_string(),
            })
        }
    }
}

/// Rejects a connection whose (from node, from anchor, to node, to anchor)
/// tuple already exists. Direction matters: the reverse edge is distinct.
pub struct NoDuplicates;

impl ConnectionRule for NoDuplicates {
    fn check(
        &self,
        from: &ResolvedAnchor,
        to: &ResolvedAnchor,
        diagram: &Diagram<'_>,
    ) -> ValidationResult {
        let exists = diagram.connections.iter().any(|c| {
            c.from_node == from.node_id
                && c.from_anchor == from.name
                && c.to_node == to.node_id
                && c.to_anchor == to.name
        });
        if exists {
            ValidationResult::Invalid(ValidationError::Duplicate)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Ordered rule chain. [`ConnectionValidator::default`] installs the
/// built-in rules: self-connection, direction, type compatibility,
/// duplicate. Custom rules run after the built-ins via
/// [`with_rule`](Self::with_rule).
pub struct ConnectionValidator {
    rules: Vec<Box<dyn ConnectionRule>>,
}

impl Default for ConnectionValidator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(NoSelfConnections),
                Box::new(DirectionRule),
                Box::new(TypeCompatibility),
                Box::new(NoDuplicates),
            ],
        }
    }
}

impl ConnectionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with no rules at all; every connection passes until rules
    /// are added.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: impl ConnectionRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Run the chain; the first failing rule's error is returned.
    pub fn validate(
        &self,
        from: &ResolvedAnchor,
        to: &ResolvedAnchor,
        diagram: &Diagram<'_>,
    ) -> ValidationResult {
        self.rules
            .iter()
            .fold(ValidationResult::Valid, |result, rule| {
                result.and(|| rule.check(from, to, diagram))
            })
    }
}
