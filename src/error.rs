//! Error types for colander.
//!
//! This module defines the errors reported by the validated entry points.
//! Low-level grid operations treat misuse as a precondition failure and
//! panic instead; see the documentation on [`HashGrid`](crate::broad::HashGrid).

use thiserror::Error;

/// Result type alias using [`BroadPhaseError`].
pub type Result<T> = std::result::Result<T, BroadPhaseError>;

/// Errors that can occur while generating collision candidates.
#[derive(Error, Debug)]
pub enum BroadPhaseError {
    /// The two position snapshots have different row counts.
    #[error("position snapshots have {t0} and {t1} rows")]
    SnapshotSizeMismatch {
        /// Number of rows in the first snapshot.
        t0: usize,
        /// Number of rows in the second snapshot.
        t1: usize,
    },

    /// The mesh has no edges, so the grid cell size cannot be estimated.
    #[error("mesh has no edges")]
    NoEdges,

    /// A connectivity row references a vertex outside the position table.
    #[error("element {element} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The row index of the offending edge or face.
        element: usize,
        /// The out-of-range vertex index.
        vertex: usize,
    },

    /// Group labels were provided for the wrong number of vertices.
    #[error("expected {expected} group labels, got {actual}")]
    GroupCountMismatch {
        /// Number of vertices in the position table.
        expected: usize,
        /// Number of labels provided.
        actual: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl BroadPhaseError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        BroadPhaseError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
