use alloc::vec::Vec;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Segment;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// An open polyline given by its ordered vertices.
pub struct LineString {
    points: Vec<Point<Real>>,
}

impl LineString {
    /// Creates a new line string from its vertices.
    ///
    /// No validation is performed here: degenerate line strings are reported
    /// by the operations that cannot handle them, e.g., [`LineString::split`].
    pub fn new(points: Vec<Point<Real>>) -> Self {
        Self { points }
    }

    /// The vertices of this line string.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// Consumes this line string and returns its vertices.
    #[inline]
    pub fn into_points(self) -> Vec<Point<Real>> {
        self.points
    }

    /// The number of segments forming this line string.
    pub fn num_segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// An iterator through all the segments of this line string.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// The total length of this line string.
    pub fn length(&self) -> Real {
        self.segments().map(|s| s.length()).sum()
    }

    /// The AABB of this line string.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points_ref(&self.points)
    }

    /// The number of vertices left once consecutive duplicates (closer than `epsilon`)
    /// are merged.
    pub fn num_distinct_points(&self, epsilon: Real) -> usize {
        let mut count = 0;
        let mut last: Option<&Point<Real>> = None;

        for pt in &self.points {
            if last.is_none_or(|l| na::distance(l, pt) > epsilon) {
                count += 1;
                last = Some(pt);
            }
        }

        count
    }
}

impl From<Vec<Point<Real>>> for LineString {
    fn from(points: Vec<Point<Real>>) -> Self {
        Self::new(points)
    }
}
