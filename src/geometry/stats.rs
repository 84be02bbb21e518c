//! Mesh statistics used to size the broad-phase grid.

use nalgebra::{Point, SVector};

/// Componentwise bounds of both position snapshots taken together.
///
/// Returns the `(lower, upper)` corners of the smallest box enclosing every
/// vertex at both times.
///
/// # Panics
///
/// Panics if the snapshots are empty or have different row counts.
pub fn mesh_extents<const D: usize>(
    vertices_t0: &[Point<f64, D>],
    vertices_t1: &[Point<f64, D>],
) -> (SVector<f64, D>, SVector<f64, D>) {
    assert!(!vertices_t0.is_empty(), "mesh has no vertices");
    assert_eq!(vertices_t0.len(), vertices_t1.len());

    let mut lower = vertices_t0[0].coords;
    let mut upper = lower;
    for p in vertices_t0.iter().chain(vertices_t1.iter()) {
        lower = lower.inf(&p.coords);
        upper = upper.sup(&p.coords);
    }
    (lower, upper)
}

/// Average edge length over both snapshots.
///
/// Undefined for an empty edge list; callers must check first.
pub fn average_edge_length<const D: usize>(
    vertices_t0: &[Point<f64, D>],
    vertices_t1: &[Point<f64, D>],
    edges: &[[usize; 2]],
) -> f64 {
    debug_assert!(!edges.is_empty());

    let mut total = 0.0;
    for edge in edges {
        total += (vertices_t0[edge[0]] - vertices_t0[edge[1]]).norm();
        total += (vertices_t1[edge[0]] - vertices_t1[edge[1]]).norm();
    }
    total / (2 * edges.len()) as f64
}

/// Average per-vertex displacement length.
pub fn average_displacement_length<const D: usize>(displacements: &[SVector<f64, D>]) -> f64 {
    displacements.iter().map(|d| d.norm()).sum::<f64>() / displacements.len() as f64
}
