//! # Colander
//!
//! A continuous-collision broad phase for deformable mesh contact.
//!
//! Colander takes two snapshots of a mesh (vertex positions at the start and
//! end of a time step) together with its connectivity, and reports the
//! element pairs whose swept axis-aligned bounding boxes overlap. Pairs of
//! structurally adjacent elements and, optionally, pairs belonging to the
//! same contact group are filtered out. Downstream narrow-phase code (exact
//! CCD, distance queries) consumes the candidate lists.
//!
//! ## Features
//!
//! - **Swept volumes**: every primitive is bounded over its whole motion, so
//!   fast-moving elements cannot tunnel past the broad phase
//! - **Uniform hash grid**: candidate pairs scale with occupied cells, not
//!   grid volume, and cells are sized automatically from mesh statistics
//! - **Deterministic output**: candidate lists are sorted and deduplicated
//!   regardless of thread scheduling
//! - **2D and 3D**: the dimension is a type parameter checked at compile time
//!
//! ## Quick Start
//!
//! ```
//! use colander::prelude::*;
//! use nalgebra::Point3;
//!
//! // Two stacked triangles, the upper one falling onto the lower.
//! let v_t0 = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, 1.0),
//!     Point3::new(0.0, 1.0, 1.0),
//! ];
//! let mut v_t1 = v_t0.clone();
//! for v in &mut v_t1[3..] {
//!     v.z -= 1.0;
//! }
//! let edges = vec![[0, 1], [1, 2], [2, 0], [3, 4], [4, 5], [5, 3]];
//! let faces = vec![[0, 1, 2], [3, 4, 5]];
//!
//! let candidates =
//!     collision_candidates(&v_t0, &v_t1, &edges, &faces, &CandidateOptions::default()).unwrap();
//! assert!(!candidates.ee.is_empty());
//! ```
//!
//! ## Driving the grid directly
//!
//! Pipelines that reuse a grid layout or populate only some element kinds can
//! skip the driver and talk to [`HashGrid`](broad::HashGrid):
//!
//! ```
//! use colander::broad::HashGrid;
//! use nalgebra::{Point2, Vector2};
//!
//! let mut grid = HashGrid::<2>::new();
//! grid.resize(Vector2::new(0.0, 0.0), Vector2::new(10.0, 10.0), 1.0);
//! grid.add_vertex(&Point2::new(0.5, 0.5), &Point2::new(5.5, 0.5), 0, 0.1);
//!
//! let mut candidates = Vec::new();
//! grid.vertex_edge_pairs(&[], &[], &mut candidates);
//! assert!(candidates.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod broad;
pub mod error;
pub mod geometry;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use colander::prelude::*;
/// ```
pub mod prelude {
    pub use crate::broad::{
        collision_candidates, CandidateOptions, Candidates, EdgeEdgeCandidate, EdgeFaceCandidate,
        EdgeVertexCandidate, FaceVertexCandidate, HashGrid,
    };
    pub use crate::error::{BroadPhaseError, Result};
    pub use crate::geometry::Aabb;
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_two_tetrahedra_approaching() {
        // A unit tetrahedron and a copy shifted +3 in x, gliding back until
        // the swept volumes meet.
        let vertices = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces_one = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];

        let mut v_t0: Vec<Point3<f64>> = vertices.to_vec();
        v_t0.extend(vertices.iter().map(|p| Point3::new(p.x + 3.0, p.y, p.z)));
        let mut v_t1 = v_t0.clone();
        for v in &mut v_t1[4..] {
            v.x -= 2.2;
        }

        let mut faces: Vec<[usize; 3]> = faces_one.to_vec();
        faces.extend(faces_one.iter().map(|f| [f[0] + 4, f[1] + 4, f[2] + 4]));
        let mut edges = Vec::new();
        for f in &faces {
            for k in 0..3 {
                let (a, b) = (f[k], f[(k + 1) % 3]);
                let edge = [a.min(b), a.max(b)];
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }

        let candidates =
            collision_candidates(&v_t0, &v_t1, &edges, &faces, &CandidateOptions::default())
                .unwrap();
        assert!(!candidates.ee.is_empty());
        assert!(!candidates.fv.is_empty());

        // With one group per body only cross-body pairs survive.
        let grouped = CandidateOptions::default().with_group_ids(vec![0, 0, 0, 0, 1, 1, 1, 1]);
        let filtered = collision_candidates(&v_t0, &v_t1, &edges, &faces, &grouped).unwrap();
        assert!(!filtered.ee.is_empty());
        assert!(filtered.ee.len() <= candidates.ee.len());
        for pair in &filtered.ee {
            // The first six edge rows belong to the first tetrahedron.
            assert!((pair.edge0_index < 6) != (pair.edge1_index < 6));
        }
        for pair in &filtered.fv {
            assert!((pair.face_index < 4) != (pair.vertex_index < 4));
        }
    }
}
