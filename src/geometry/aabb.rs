//! Axis-aligned bounding boxes.

use nalgebra::SVector;

/// An axis-aligned bounding box with cached center and half-extent.
///
/// The box is stored as its lower and upper corners together with the derived
/// center and half-extent, so the overlap test reduces to one distance
/// comparison per axis.
///
/// # Example
///
/// ```
/// use colander::geometry::Aabb;
/// use nalgebra::Vector3;
///
/// let a = Aabb::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
/// let b = Aabb::new(Vector3::new(0.5, 0.5, 0.5), Vector3::new(2.0, 2.0, 2.0));
/// assert!(Aabb::overlapping(&a, &b));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb<const D: usize> {
    min: SVector<f64, D>,
    max: SVector<f64, D>,
    half_extent: SVector<f64, D>,
    center: SVector<f64, D>,
}

impl<const D: usize> Aabb<D> {
    /// Create a box from its lower and upper corners.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` on any axis.
    pub fn new(min: SVector<f64, D>, max: SVector<f64, D>) -> Self {
        assert!(
            (0..D).all(|k| min[k] <= max[k]),
            "box corners are inverted: min={:?} max={:?}",
            min,
            max
        );
        let half_extent = (max - min) / 2.0;
        let center = min + half_extent;
        Self {
            min,
            max,
            half_extent,
            center,
        }
    }

    /// The componentwise union of two boxes.
    pub fn union(a: &Self, b: &Self) -> Self {
        Self::new(a.min.inf(&b.min), a.max.sup(&b.max))
    }

    /// The componentwise union of three boxes.
    pub fn union3(a: &Self, b: &Self, c: &Self) -> Self {
        Self::new(
            a.min.inf(&b.min).inf(&c.min),
            a.max.sup(&b.max).sup(&c.max),
        )
    }

    /// Test whether two boxes overlap. Touching boxes count as overlapping.
    pub fn overlapping(a: &Self, b: &Self) -> bool {
        (0..D).all(|k| (a.center[k] - b.center[k]).abs() <= a.half_extent[k] + b.half_extent[k])
    }

    /// Lower corner.
    pub fn min(&self) -> &SVector<f64, D> {
        &self.min
    }

    /// Upper corner.
    pub fn max(&self) -> &SVector<f64, D> {
        &self.max
    }

    /// Half the box size on each axis.
    pub fn half_extent(&self) -> &SVector<f64, D> {
        &self.half_extent
    }

    /// Box center.
    pub fn center(&self) -> &SVector<f64, D> {
        &self.center
    }
}
