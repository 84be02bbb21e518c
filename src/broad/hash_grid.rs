//! Uniform hash grid over swept element bounding boxes.
//!
//! The grid covers a fixed domain with cells of a single size. Populating it
//! inserts one [`HashItem`] per (element, covered cell); querying it joins the
//! per-kind item lists on the cell key, so only elements sharing a cell are
//! ever tested for box overlap. Each query is one-shot: the grid holds no
//! state between frames beyond what the caller re-populates.

use nalgebra::{Point, SVector};
use rayon::prelude::*;

use crate::broad::candidates::{
    CollisionCandidate, EdgeEdgeCandidate, EdgeFaceCandidate, EdgeVertexCandidate,
    FaceVertexCandidate,
};
use crate::geometry::{average_displacement_length, average_edge_length, mesh_extents, Aabb};

/// An entry in the hash grid: a cell key, an element id, and the element's
/// inflated swept box.
///
/// Items order by `(key, id)`, so after sorting a bucket the items of one
/// cell form a contiguous run with ascending ids. The box is carried along
/// so pair extraction can run the exact overlap test without a second
/// lookup.
#[derive(Debug, Clone)]
pub struct HashItem<const D: usize> {
    /// Perfect integer encoding of the covered cell.
    pub key: i64,
    /// Caller-supplied element id.
    pub id: usize,
    /// Inflated swept box of the element.
    pub aabb: Aabb<D>,
}

impl<const D: usize> HashItem<D> {
    fn new(key: i64, id: usize, aabb: Aabb<D>) -> Self {
        Self { key, id, aabb }
    }
}

impl<const D: usize> PartialEq for HashItem<D> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.id == other.id
    }
}

impl<const D: usize> Eq for HashItem<D> {}

impl<const D: usize> PartialOrd for HashItem<D> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const D: usize> Ord for HashItem<D> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key).then(self.id.cmp(&other.id))
    }
}

/// A uniform cell grid for broad-phase contact between two mesh snapshots.
///
/// The grid buckets swept element boxes (vertices, edges, faces) into cells
/// and reports, for four element-pair kinds, the deduplicated pairs whose
/// boxes overlap. Pairs of structurally adjacent elements and, optionally,
/// pairs whose vertices share a group label are dropped.
///
/// `D` is the ambient dimension and must be 2 or 3; all positions handed to
/// one grid share it.
///
/// Misuse of the low-level operations (non-positive cell size, mismatched
/// snapshot lengths, boxes far outside the domain) is a precondition failure
/// and panics. For a validated surface see
/// [`collision_candidates`](crate::broad::collision_candidates).
///
/// # Example
///
/// ```
/// use colander::broad::HashGrid;
/// use nalgebra::{Point3, Vector3};
///
/// let mut grid = HashGrid::<3>::new();
/// grid.resize(Vector3::zeros(), Vector3::new(2.0, 2.0, 2.0), 1.0);
///
/// let positions = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(1.0, 0.1, 0.1),
///     Point3::new(1.0, 1.0, 1.0),
/// ];
/// let edges = [[0, 1], [2, 3]];
/// grid.add_edges(&positions, &positions, &edges, 0.0);
///
/// let mut candidates = Vec::new();
/// grid.edge_edge_pairs(&edges, &[], &mut candidates);
/// assert_eq!(candidates.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HashGrid<const D: usize> {
    cell_size: f64,
    grid_size: [i64; D],
    domain_min: SVector<f64, D>,
    domain_max: SVector<f64, D>,
    vertex_items: Vec<HashItem<D>>,
    edge_items: Vec<HashItem<D>>,
    face_items: Vec<HashItem<D>>,
}

impl<const D: usize> Default for HashGrid<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> HashGrid<D> {
    /// Create an empty, unsized grid. Call [`resize`](Self::resize) or
    /// [`resize_for_mesh`](Self::resize_for_mesh) before populating it.
    pub fn new() -> Self {
        assert!(D == 2 || D == 3, "grid dimension must be 2 or 3");
        Self {
            cell_size: 0.0,
            grid_size: [0; D],
            domain_min: SVector::zeros(),
            domain_max: SVector::zeros(),
            vertex_items: Vec::new(),
            edge_items: Vec::new(),
            face_items: Vec::new(),
        }
    }

    /// Side length of one grid cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Per-axis cell counts.
    pub fn grid_size(&self) -> [i64; D] {
        self.grid_size
    }

    /// Lower corner of the grid domain.
    pub fn domain_min(&self) -> &SVector<f64, D> {
        &self.domain_min
    }

    /// Upper corner of the grid domain.
    pub fn domain_max(&self) -> &SVector<f64, D> {
        &self.domain_max
    }

    /// Number of items in the vertex bucket.
    pub fn num_vertex_items(&self) -> usize {
        self.vertex_items.len()
    }

    /// Number of items in the edge bucket.
    pub fn num_edge_items(&self) -> usize {
        self.edge_items.len()
    }

    /// Number of items in the face bucket.
    pub fn num_face_items(&self) -> usize {
        self.face_items.len()
    }

    /// Empty the three item buckets, keeping the domain and cell size.
    pub fn clear(&mut self) {
        self.vertex_items.clear();
        self.edge_items.clear();
        self.face_items.clear();
    }

    /// Fix the grid domain and cell size, discarding any buckets.
    ///
    /// The per-axis cell count is `ceil((max - min) / cell_size)`, at least 1.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive.
    pub fn resize(&mut self, min: SVector<f64, D>, max: SVector<f64, D>, cell_size: f64) {
        assert!(cell_size > 0.0, "cell size must be positive");
        self.clear();
        self.cell_size = cell_size;
        self.domain_min = min;
        self.domain_max = max;
        for k in 0..D {
            self.grid_size[k] = (((max[k] - min[k]) / cell_size).ceil() as i64).max(1);
        }
        log::debug!(
            "hash grid resized to {:?} cells of size {}",
            self.grid_size,
            self.cell_size
        );
    }

    /// Size the grid from mesh statistics.
    ///
    /// The domain is the mesh extents over both snapshots grown by
    /// `inflation_radius`, and the cell size is twice the larger of the
    /// average edge length and the average vertex displacement, plus the
    /// radius. Cells sized this way are bigger than a typical primitive and a
    /// typical motion, so a swept box straddles few cells on average.
    pub fn resize_for_mesh(
        &mut self,
        vertices_t0: &[Point<f64, D>],
        vertices_t1: &[Point<f64, D>],
        edges: &[[usize; 2]],
        inflation_radius: f64,
    ) {
        let (mesh_min, mesh_max) = mesh_extents(vertices_t0, vertices_t1);
        let edge_len = average_edge_length(vertices_t0, vertices_t1, edges);
        let displacements: Vec<SVector<f64, D>> = vertices_t0
            .iter()
            .zip(vertices_t1.iter())
            .map(|(p0, p1)| p1 - p0)
            .collect();
        let disp_len = average_displacement_length(&displacements);
        let cell_size = 2.0 * edge_len.max(disp_len) + inflation_radius;
        self.resize(
            mesh_min.add_scalar(-inflation_radius),
            mesh_max.add_scalar(inflation_radius),
            cell_size,
        );
    }

    /// Insert one vertex as the box of its positions at both times.
    pub fn add_vertex(
        &mut self,
        vertex_t0: &Point<f64, D>,
        vertex_t1: &Point<f64, D>,
        index: usize,
        inflation_radius: f64,
    ) {
        let mut items = std::mem::take(&mut self.vertex_items);
        self.push_vertex(vertex_t0, vertex_t1, index, inflation_radius, &mut items);
        self.vertex_items = items;
    }

    /// Insert every vertex of both snapshots.
    ///
    /// # Panics
    ///
    /// Panics if the snapshots have different row counts.
    pub fn add_vertices(
        &mut self,
        vertices_t0: &[Point<f64, D>],
        vertices_t1: &[Point<f64, D>],
        inflation_radius: f64,
    ) {
        assert_eq!(vertices_t0.len(), vertices_t1.len(), "snapshot row counts differ");

        let locals: Vec<Vec<HashItem<D>>> = (0..vertices_t0.len())
            .into_par_iter()
            .fold(Vec::new, |mut local, i| {
                self.push_vertex(&vertices_t0[i], &vertices_t1[i], i, inflation_radius, &mut local);
                local
            })
            .collect();

        merge_local_items(locals, &mut self.vertex_items);
    }

    /// Insert each vertex referenced by `edges` exactly once.
    ///
    /// A vertex shared by several edges is inserted from its lowest-indexed
    /// incident edge only, so queries over the vertex bucket never see the
    /// same vertex twice.
    ///
    /// # Panics
    ///
    /// Panics if the snapshots have different row counts.
    pub fn add_vertices_from_edges(
        &mut self,
        vertices_t0: &[Point<f64, D>],
        vertices_t1: &[Point<f64, D>],
        edges: &[[usize; 2]],
        inflation_radius: f64,
    ) {
        assert_eq!(vertices_t0.len(), vertices_t1.len(), "snapshot row counts differ");

        let mut vertex_to_min_edge = vec![edges.len(); vertices_t0.len()];
        for endpoint in 0..2 {
            for (ei, edge) in edges.iter().enumerate() {
                let vi = edge[endpoint];
                vertex_to_min_edge[vi] = vertex_to_min_edge[vi].min(ei);
            }
        }

        let locals: Vec<Vec<HashItem<D>>> = (0..edges.len())
            .into_par_iter()
            .fold(Vec::new, |mut local, ei| {
                for &vi in &edges[ei] {
                    if vertex_to_min_edge[vi] == ei {
                        self.push_vertex(
                            &vertices_t0[vi],
                            &vertices_t1[vi],
                            vi,
                            inflation_radius,
                            &mut local,
                        );
                    }
                }
                local
            })
            .collect();

        merge_local_items(locals, &mut self.vertex_items);
    }

    /// Insert one edge as the box of its four endpoint positions.
    pub fn add_edge(
        &mut self,
        edge_vertex0_t0: &Point<f64, D>,
        edge_vertex1_t0: &Point<f64, D>,
        edge_vertex0_t1: &Point<f64, D>,
        edge_vertex1_t1: &Point<f64, D>,
        index: usize,
        inflation_radius: f64,
    ) {
        let mut items = std::mem::take(&mut self.edge_items);
        self.push_edge(
            edge_vertex0_t0,
            edge_vertex1_t0,
            edge_vertex0_t1,
            edge_vertex1_t1,
            index,
            inflation_radius,
            &mut items,
        );
        self.edge_items = items;
    }

    /// Insert every edge of `edges`.
    ///
    /// # Panics
    ///
    /// Panics if the snapshots have different row counts.
    pub fn add_edges(
        &mut self,
        vertices_t0: &[Point<f64, D>],
        vertices_t1: &[Point<f64, D>],
        edges: &[[usize; 2]],
        inflation_radius: f64,
    ) {
        assert_eq!(vertices_t0.len(), vertices_t1.len(), "snapshot row counts differ");

        let locals: Vec<Vec<HashItem<D>>> = (0..edges.len())
            .into_par_iter()
            .fold(Vec::new, |mut local, i| {
                let [a, b] = edges[i];
                self.push_edge(
                    &vertices_t0[a],
                    &vertices_t0[b],
                    &vertices_t1[a],
                    &vertices_t1[b],
                    i,
                    inflation_radius,
                    &mut local,
                );
                local
            })
            .collect();

        merge_local_items(locals, &mut self.edge_items);
    }

    /// Insert one triangle as the box of its six corner positions.
    #[allow(clippy::too_many_arguments)]
    pub fn add_face(
        &mut self,
        face_vertex0_t0: &Point<f64, D>,
        face_vertex1_t0: &Point<f64, D>,
        face_vertex2_t0: &Point<f64, D>,
        face_vertex0_t1: &Point<f64, D>,
        face_vertex1_t1: &Point<f64, D>,
        face_vertex2_t1: &Point<f64, D>,
        index: usize,
        inflation_radius: f64,
    ) {
        let mut items = std::mem::take(&mut self.face_items);
        self.push_face(
            face_vertex0_t0,
            face_vertex1_t0,
            face_vertex2_t0,
            face_vertex0_t1,
            face_vertex1_t1,
            face_vertex2_t1,
            index,
            inflation_radius,
            &mut items,
        );
        self.face_items = items;
    }

    /// Insert every triangle of `faces`.
    ///
    /// # Panics
    ///
    /// Panics if the snapshots have different row counts.
    pub fn add_faces(
        &mut self,
        vertices_t0: &[Point<f64, D>],
        vertices_t1: &[Point<f64, D>],
        faces: &[[usize; 3]],
        inflation_radius: f64,
    ) {
        assert_eq!(vertices_t0.len(), vertices_t1.len(), "snapshot row counts differ");

        let locals: Vec<Vec<HashItem<D>>> = (0..faces.len())
            .into_par_iter()
            .fold(Vec::new, |mut local, i| {
                let [a, b, c] = faces[i];
                self.push_face(
                    &vertices_t0[a],
                    &vertices_t0[b],
                    &vertices_t0[c],
                    &vertices_t1[a],
                    &vertices_t1[b],
                    &vertices_t1[c],
                    i,
                    inflation_radius,
                    &mut local,
                );
                local
            })
            .collect();

        merge_local_items(locals, &mut self.face_items);
    }

    /// Candidate (edge, vertex) pairs sharing a cell with overlapping boxes.
    ///
    /// Pairs where the vertex is an endpoint of the edge are dropped, as are
    /// same-group pairs when `group_ids` is non-empty. The result is appended
    /// to `candidates`, then the whole list is sorted and deduplicated.
    pub fn vertex_edge_pairs(
        &mut self,
        edges: &[[usize; 2]],
        group_ids: &[usize],
        candidates: &mut Vec<EdgeVertexCandidate>,
    ) {
        let is_endpoint = |ei: usize, vi: usize| edges[ei][0] == vi || edges[ei][1] == vi;

        let check_groups = !group_ids.is_empty();
        let is_same_group = |ei: usize, vi: usize| {
            check_groups
                && (group_ids[vi] == group_ids[edges[ei][0]]
                    || group_ids[vi] == group_ids[edges[ei][1]])
        };

        join_pairs(
            is_endpoint,
            is_same_group,
            &mut self.edge_items,
            &mut self.vertex_items,
            candidates,
        );
    }

    /// Candidate (edge, edge) pairs sharing a cell with overlapping boxes.
    ///
    /// Pairs of edges sharing an endpoint are dropped, as are same-group
    /// pairs when `group_ids` is non-empty. Each unordered pair appears once
    /// with the lower edge index first.
    pub fn edge_edge_pairs(
        &mut self,
        edges: &[[usize; 2]],
        group_ids: &[usize],
        candidates: &mut Vec<EdgeEdgeCandidate>,
    ) {
        let is_endpoint = |ei: usize, ej: usize| {
            edges[ei][0] == edges[ej][0]
                || edges[ei][0] == edges[ej][1]
                || edges[ei][1] == edges[ej][0]
                || edges[ei][1] == edges[ej][1]
        };

        let check_groups = !group_ids.is_empty();
        let is_same_group = |ei: usize, ej: usize| {
            check_groups
                && (group_ids[edges[ei][0]] == group_ids[edges[ej][0]]
                    || group_ids[edges[ei][0]] == group_ids[edges[ej][1]]
                    || group_ids[edges[ei][1]] == group_ids[edges[ej][0]]
                    || group_ids[edges[ei][1]] == group_ids[edges[ej][1]])
        };

        self_join_pairs(is_endpoint, is_same_group, &mut self.edge_items, candidates);
    }

    /// Candidate (edge, face) pairs sharing a cell with overlapping boxes.
    ///
    /// Pairs where the edge and face share a vertex are dropped, as are
    /// same-group pairs when `group_ids` is non-empty.
    pub fn edge_face_pairs(
        &mut self,
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
        group_ids: &[usize],
        candidates: &mut Vec<EdgeFaceCandidate>,
    ) {
        let is_endpoint = |ei: usize, fi: usize| {
            faces[fi].contains(&edges[ei][0]) || faces[fi].contains(&edges[ei][1])
        };

        let check_groups = !group_ids.is_empty();
        let is_same_group = |ei: usize, fi: usize| {
            check_groups
                && faces[fi].iter().any(|&fv| {
                    group_ids[fv] == group_ids[edges[ei][0]]
                        || group_ids[fv] == group_ids[edges[ei][1]]
                })
        };

        join_pairs(
            is_endpoint,
            is_same_group,
            &mut self.edge_items,
            &mut self.face_items,
            candidates,
        );
    }

    /// Candidate (face, vertex) pairs sharing a cell with overlapping boxes.
    ///
    /// Pairs where the vertex is a corner of the face are dropped, as are
    /// same-group pairs when `group_ids` is non-empty.
    pub fn face_vertex_pairs(
        &mut self,
        faces: &[[usize; 3]],
        group_ids: &[usize],
        candidates: &mut Vec<FaceVertexCandidate>,
    ) {
        let is_endpoint = |fi: usize, vi: usize| faces[fi].contains(&vi);

        let check_groups = !group_ids.is_empty();
        let is_same_group = |fi: usize, vi: usize| {
            check_groups && faces[fi].iter().any(|&fv| group_ids[fv] == group_ids[vi])
        };

        join_pairs(
            is_endpoint,
            is_same_group,
            &mut self.face_items,
            &mut self.vertex_items,
            candidates,
        );
    }

    fn push_vertex(
        &self,
        vertex_t0: &Point<f64, D>,
        vertex_t1: &Point<f64, D>,
        index: usize,
        inflation_radius: f64,
        items: &mut Vec<HashItem<D>>,
    ) {
        let lower = vertex_t0.coords.inf(&vertex_t1.coords);
        let upper = vertex_t0.coords.sup(&vertex_t1.coords);
        self.add_element(
            Aabb::new(
                lower.add_scalar(-inflation_radius),
                upper.add_scalar(inflation_radius),
            ),
            index,
            items,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn push_edge(
        &self,
        edge_vertex0_t0: &Point<f64, D>,
        edge_vertex1_t0: &Point<f64, D>,
        edge_vertex0_t1: &Point<f64, D>,
        edge_vertex1_t1: &Point<f64, D>,
        index: usize,
        inflation_radius: f64,
        items: &mut Vec<HashItem<D>>,
    ) {
        let lower = edge_vertex0_t0
            .coords
            .inf(&edge_vertex1_t0.coords)
            .inf(&edge_vertex0_t1.coords)
            .inf(&edge_vertex1_t1.coords);
        let upper = edge_vertex0_t0
            .coords
            .sup(&edge_vertex1_t0.coords)
            .sup(&edge_vertex0_t1.coords)
            .sup(&edge_vertex1_t1.coords);
        self.add_element(
            Aabb::new(
                lower.add_scalar(-inflation_radius),
                upper.add_scalar(inflation_radius),
            ),
            index,
            items,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn push_face(
        &self,
        face_vertex0_t0: &Point<f64, D>,
        face_vertex1_t0: &Point<f64, D>,
        face_vertex2_t0: &Point<f64, D>,
        face_vertex0_t1: &Point<f64, D>,
        face_vertex1_t1: &Point<f64, D>,
        face_vertex2_t1: &Point<f64, D>,
        index: usize,
        inflation_radius: f64,
        items: &mut Vec<HashItem<D>>,
    ) {
        let lower = face_vertex0_t0
            .coords
            .inf(&face_vertex1_t0.coords)
            .inf(&face_vertex2_t0.coords)
            .inf(&face_vertex0_t1.coords)
            .inf(&face_vertex1_t1.coords)
            .inf(&face_vertex2_t1.coords);
        let upper = face_vertex0_t0
            .coords
            .sup(&face_vertex1_t0.coords)
            .sup(&face_vertex2_t0.coords)
            .sup(&face_vertex0_t1.coords)
            .sup(&face_vertex1_t1.coords)
            .sup(&face_vertex2_t1.coords);
        self.add_element(
            Aabb::new(
                lower.add_scalar(-inflation_radius),
                upper.add_scalar(inflation_radius),
            ),
            index,
            items,
        );
    }

    /// Emit one item per cell covered by `aabb`.
    ///
    /// A box slightly outside the domain may round to cell -1; clamping to
    /// the domain over-reports near the boundary instead of missing pairs.
    /// Anything past one cell outside is a caller bug.
    fn add_element(&self, aabb: Aabb<D>, id: usize, items: &mut Vec<HashItem<D>>) {
        let mut cell_lo = [0i64; D];
        let mut cell_hi = [0i64; D];
        for k in 0..D {
            let lo = ((aabb.min()[k] - self.domain_min[k]) / self.cell_size).floor() as i64;
            let hi = ((aabb.max()[k] - self.domain_min[k]) / self.cell_size).floor() as i64;
            debug_assert!(
                (-1..=self.grid_size[k]).contains(&lo),
                "box extends past the grid domain on axis {}",
                k
            );
            debug_assert!(
                (-1..=self.grid_size[k]).contains(&hi),
                "box extends past the grid domain on axis {}",
                k
            );
            cell_lo[k] = lo.clamp(0, self.grid_size[k] - 1);
            cell_hi[k] = hi.clamp(0, self.grid_size[k] - 1);
        }

        // In 2D the z range collapses to a single step at 0.
        let z_lo = cell_lo.get(2).copied().unwrap_or(0);
        let z_hi = cell_hi.get(2).copied().unwrap_or(0);
        for x in cell_lo[0]..=cell_hi[0] {
            for y in cell_lo[1]..=cell_hi[1] {
                for z in z_lo..=z_hi {
                    items.push(HashItem::new(self.hash(x, y, z), id, aabb.clone()));
                }
            }
        }
    }

    /// Perfect encoding of a cell coordinate: colliding keys are exactly the
    /// items sharing a cell.
    fn hash(&self, x: i64, y: i64, z: i64) -> i64 {
        debug_assert!(x >= 0 && y >= 0 && z >= 0);
        debug_assert!(x < self.grid_size[0] && y < self.grid_size[1]);
        debug_assert!(z < self.grid_size.get(2).copied().unwrap_or(1));
        (z * self.grid_size[1] + y) * self.grid_size[0] + x
    }
}

/// Serially concatenate per-worker item buffers into a grid bucket.
///
/// The concatenation order is not observable: queries sort the bucket before
/// scanning it.
fn merge_local_items<const D: usize>(locals: Vec<Vec<HashItem<D>>>, items: &mut Vec<HashItem<D>>) {
    let total: usize = locals.iter().map(Vec::len).sum();
    items.reserve(total);
    for local in locals {
        items.extend(local);
    }
}

/// Join two item lists on the cell key.
///
/// Both lists are sorted by (key, id); a pair of indices sweeps them in key
/// order. Every entry of `items0` re-scans the matching key run in `items1`,
/// so `j_start` moves past a run only once the run of equal keys in `items0`
/// is exhausted.
fn join_pairs<const D: usize, C>(
    is_endpoint: impl Fn(usize, usize) -> bool,
    is_same_group: impl Fn(usize, usize) -> bool,
    items0: &mut [HashItem<D>],
    items1: &mut [HashItem<D>],
    candidates: &mut Vec<C>,
) where
    C: CollisionCandidate + Send,
{
    items0.par_sort_unstable();
    items1.par_sort_unstable();

    let mut i = 0;
    let mut j_start = 0;
    while i < items0.len() && j_start < items1.len() {
        let item0 = &items0[i];

        // Cells occupied only by items1 can never match again; skip them.
        while j_start < items1.len() && items1[j_start].key < item0.key {
            j_start += 1;
        }

        let mut j = j_start;
        while j < items1.len() && items1[j].key == item0.key {
            let item1 = &items1[j];
            if !is_endpoint(item0.id, item1.id)
                && !is_same_group(item0.id, item1.id)
                && Aabb::overlapping(&item0.aabb, &item1.aabb)
            {
                candidates.push(C::new(item0.id, item1.id));
            }
            j += 1;
        }

        if i + 1 == items0.len() || items0[i + 1].key != item0.key {
            j_start = j;
        }
        i += 1;
    }

    candidates.par_sort_unstable();
    candidates.dedup();
}

/// Join an item list with itself on the cell key.
///
/// Scanning forward within the sorted run makes every unordered pair appear
/// once, lower id first.
fn self_join_pairs<const D: usize, C>(
    is_endpoint: impl Fn(usize, usize) -> bool,
    is_same_group: impl Fn(usize, usize) -> bool,
    items: &mut [HashItem<D>],
    candidates: &mut Vec<C>,
) where
    C: CollisionCandidate + Send,
{
    items.par_sort_unstable();

    for i in 0..items.len() {
        let item0 = &items[i];
        for item1 in &items[i + 1..] {
            if item1.key != item0.key {
                break;
            }
            if !is_endpoint(item0.id, item1.id)
                && !is_same_group(item0.id, item1.id)
                && Aabb::overlapping(&item0.aabb, &item1.aabb)
            {
                candidates.push(C::new(item0.id, item1.id));
            }
        }
    }

    candidates.par_sort_unstable();
    candidates.dedup();
}
