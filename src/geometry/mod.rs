//! Geometric primitives and mesh statistics.
//!
//! This module provides the axis-aligned bounding box used throughout the
//! broad phase, the mesh statistics that drive grid sizing, and the analytic
//! triangle-area gradient consumed by downstream contact solvers.
//!
//! Positions are `nalgebra` points; the dimension (2 or 3) is a const
//! generic parameter shared with [`HashGrid`](crate::broad::HashGrid).

mod aabb;
mod gradient;
mod stats;

pub use aabb::Aabb;
pub use gradient::triangle_area_gradient;
pub use stats::{average_displacement_length, average_edge_length, mesh_extents};
