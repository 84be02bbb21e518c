//! Broad-phase collision candidate generation.
//!
//! This module provides the uniform [`HashGrid`] over swept element bounding
//! boxes and the candidate pair types it produces. Most callers can use
//! [`collision_candidates`], which validates its inputs, sizes the grid from
//! mesh statistics, populates it, and runs the queries appropriate for the
//! mesh dimension. The grid itself remains available for pipelines that want
//! to control sizing and population directly.
//!
//! # Example
//!
//! ```
//! use colander::prelude::*;
//! use nalgebra::Point3;
//!
//! // A triangle falling onto another.
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
//! assert!(!candidates.fv.is_empty());
//! ```

mod candidates;
mod hash_grid;

pub use candidates::{
    Candidates, CollisionCandidate, EdgeEdgeCandidate, EdgeFaceCandidate, EdgeVertexCandidate,
    FaceVertexCandidate,
};
pub use hash_grid::{HashGrid, HashItem};

use nalgebra::Point;

use crate::error::{BroadPhaseError, Result};

/// Options for one-shot candidate generation.
#[derive(Debug, Clone, Default)]
pub struct CandidateOptions {
    /// Margin added to every side of each swept box.
    pub inflation_radius: f64,

    /// Per-vertex group labels. Pairs whose vertices share a label are
    /// treated as self-contact and dropped; leave empty to disable.
    pub group_ids: Vec<usize>,
}

impl CandidateOptions {
    /// Set the inflation radius.
    pub fn with_inflation_radius(mut self, inflation_radius: f64) -> Self {
        self.inflation_radius = inflation_radius;
        self
    }

    /// Set the per-vertex group labels.
    pub fn with_group_ids(mut self, group_ids: Vec<usize>) -> Self {
        self.group_ids = group_ids;
        self
    }
}

/// Compute candidate contact pairs between two snapshots of a mesh.
///
/// The grid domain and cell size are derived from the mesh statistics, each
/// edge-referenced vertex, each edge, and (in 3D) each face is inserted as an
/// inflated swept box, and the queries matching the mesh dimension run: 2D
/// meshes produce edge-vertex candidates, 3D meshes edge-edge and
/// face-vertex candidates. Candidate lists come back sorted and free of
/// duplicates.
///
/// # Errors
///
/// Returns an error if the snapshots have different lengths, the edge list
/// is empty, the inflation radius is negative or not finite, the group
/// labels do not match the vertex count, or any connectivity row references
/// a vertex outside the position table.
pub fn collision_candidates<const D: usize>(
    vertices_t0: &[Point<f64, D>],
    vertices_t1: &[Point<f64, D>],
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
    options: &CandidateOptions,
) -> Result<Candidates> {
    if vertices_t0.len() != vertices_t1.len() {
        return Err(BroadPhaseError::SnapshotSizeMismatch {
            t0: vertices_t0.len(),
            t1: vertices_t1.len(),
        });
    }
    if edges.is_empty() {
        return Err(BroadPhaseError::NoEdges);
    }
    if !options.inflation_radius.is_finite() {
        return Err(BroadPhaseError::invalid_param(
            "inflation_radius",
            options.inflation_radius,
            "must be finite",
        ));
    }
    if options.inflation_radius < 0.0 {
        return Err(BroadPhaseError::invalid_param(
            "inflation_radius",
            options.inflation_radius,
            "must be non-negative",
        ));
    }
    if !options.group_ids.is_empty() && options.group_ids.len() != vertices_t0.len() {
        return Err(BroadPhaseError::GroupCountMismatch {
            expected: vertices_t0.len(),
            actual: options.group_ids.len(),
        });
    }
    for (element, edge) in edges.iter().enumerate() {
        for &vertex in edge {
            if vertex >= vertices_t0.len() {
                return Err(BroadPhaseError::InvalidVertexIndex { element, vertex });
            }
        }
    }
    for (element, face) in faces.iter().enumerate() {
        for &vertex in face {
            if vertex >= vertices_t0.len() {
                return Err(BroadPhaseError::InvalidVertexIndex { element, vertex });
            }
        }
    }

    let r = options.inflation_radius;
    let mut grid = HashGrid::<D>::new();
    grid.resize_for_mesh(vertices_t0, vertices_t1, edges, r);
    grid.add_vertices_from_edges(vertices_t0, vertices_t1, edges, r);
    grid.add_edges(vertices_t0, vertices_t1, edges, r);
    if D == 3 {
        grid.add_faces(vertices_t0, vertices_t1, faces, r);
    }

    let mut candidates = Candidates::default();
    if D == 2 {
        grid.vertex_edge_pairs(edges, &options.group_ids, &mut candidates.ev);
    } else {
        grid.edge_edge_pairs(edges, &options.group_ids, &mut candidates.ee);
        grid.face_vertex_pairs(faces, &options.group_ids, &mut candidates.fv);
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Point3};

    fn falling_triangles() -> (Vec<Point3<f64>>, Vec<Point3<f64>>, Vec<[usize; 2]>, Vec<[usize; 3]>)
    {
        let v_t0 = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let mut v_t1 = v_t0.clone();
        for v in &mut v_t1[3..] {
            v.z -= 1.0;
        }
        let edges = vec![[0, 1], [1, 2], [2, 0], [3, 4], [4, 5], [5, 3]];
        let faces = vec![[0, 1, 2], [3, 4, 5]];
        (v_t0, v_t1, edges, faces)
    }

    #[test]
    fn test_driver_3d() {
        let (v_t0, v_t1, edges, faces) = falling_triangles();
        let candidates =
            collision_candidates(&v_t0, &v_t1, &edges, &faces, &CandidateOptions::default())
                .unwrap();
        assert!(!candidates.ee.is_empty());
        assert!(!candidates.fv.is_empty());
        assert!(candidates.ev.is_empty());
    }

    #[test]
    fn test_driver_2d() {
        // A vertex sliding into a static edge.
        let v_t0 = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 2.0),
            Point2::new(0.6, 2.0),
        ];
        let v_t1 = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, -0.1),
            Point2::new(0.6, 2.0),
        ];
        let edges = vec![[0, 1], [2, 3]];
        let candidates =
            collision_candidates(&v_t0, &v_t1, &edges, &[], &CandidateOptions::default()).unwrap();
        assert!(candidates
            .ev
            .contains(&EdgeVertexCandidate { edge_index: 0, vertex_index: 2 }));
        assert!(candidates.ee.is_empty());
        assert!(candidates.fv.is_empty());
    }

    #[test]
    fn test_driver_group_labels_suppress_self_contact() {
        let (v_t0, v_t1, edges, faces) = falling_triangles();
        // Both triangles in one group: everything is self-contact.
        let options = CandidateOptions::default().with_group_ids(vec![3; 6]);
        let candidates = collision_candidates(&v_t0, &v_t1, &edges, &faces, &options).unwrap();
        assert!(candidates.is_empty());

        // Distinct groups keep the cross-triangle pairs.
        let options = CandidateOptions::default().with_group_ids(vec![0, 0, 0, 1, 1, 1]);
        let candidates = collision_candidates(&v_t0, &v_t1, &edges, &faces, &options).unwrap();
        assert!(!candidates.ee.is_empty());
    }

    #[test]
    fn test_driver_rejects_mismatched_snapshots() {
        let (v_t0, _, edges, faces) = falling_triangles();
        let v_t1 = v_t0[..4].to_vec();
        let err = collision_candidates(&v_t0, &v_t1, &edges, &faces, &CandidateOptions::default())
            .unwrap_err();
        assert!(matches!(err, BroadPhaseError::SnapshotSizeMismatch { t0: 6, t1: 4 }));
    }

    #[test]
    fn test_driver_rejects_empty_edges() {
        let (v_t0, v_t1, _, faces) = falling_triangles();
        let err = collision_candidates(&v_t0, &v_t1, &[], &faces, &CandidateOptions::default())
            .unwrap_err();
        assert!(matches!(err, BroadPhaseError::NoEdges));
    }

    #[test]
    fn test_driver_rejects_negative_radius() {
        let (v_t0, v_t1, edges, faces) = falling_triangles();
        let options = CandidateOptions::default().with_inflation_radius(-0.5);
        let err = collision_candidates(&v_t0, &v_t1, &edges, &faces, &options).unwrap_err();
        assert!(matches!(err, BroadPhaseError::InvalidParameter { name: "inflation_radius", .. }));
    }

    #[test]
    fn test_driver_rejects_wrong_group_count() {
        let (v_t0, v_t1, edges, faces) = falling_triangles();
        let options = CandidateOptions::default().with_group_ids(vec![0, 1]);
        let err = collision_candidates(&v_t0, &v_t1, &edges, &faces, &options).unwrap_err();
        assert!(matches!(err, BroadPhaseError::GroupCountMismatch { expected: 6, actual: 2 }));
    }

    #[test]
    fn test_driver_rejects_out_of_range_connectivity() {
        let (v_t0, v_t1, mut edges, faces) = falling_triangles();
        edges.push([0, 99]);
        let err = collision_candidates(&v_t0, &v_t1, &edges, &faces, &CandidateOptions::default())
            .unwrap_err();
        assert!(matches!(err, BroadPhaseError::InvalidVertexIndex { element: 6, vertex: 99 }));
    }
}
