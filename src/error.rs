use thiserror::Error;

use crate::types::BodyHandle;

/// Rejected shape or body parameters (checked constructors only).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    #[error("restitution must be in [0, 1], got {0}")]
    InvalidRestitution(f32),

    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("rectangle extents must be positive and finite, got {width}x{height}")]
    InvalidExtent { width: f32, height: f32 },

    #[error("convex polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("polygon edge {index} has zero length")]
    DegenerateEdge { index: usize },
}

/// Errors surfaced by world-level operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("body handle {handle:?} out of range (count: {count})")]
    UnknownHandle { handle: BodyHandle, count: usize },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

pub type Result<T> = std::result::Result<T, WorldError>;
