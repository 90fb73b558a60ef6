use alloc::vec::Vec;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Segment;
use crate::utils;

#[cfg(not(feature = "std"))]
use na::ComplexField; // for .abs()

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// A simple polygon given by its exterior ring.
///
/// The ring is implicitly closed: its last vertex is connected to the first one.
/// It may be oriented clockwise or counter-clockwise, and may be concave, but
/// must not self-intersect. Interior rings are not supported.
pub struct Polygon {
    vertices: Vec<Point<Real>>,
}

impl Polygon {
    /// Builds a polygon from the vertices of its exterior ring.
    ///
    /// If the ring is explicitly closed (last vertex equal to the first one) the
    /// duplicate closing vertex is removed.
    pub fn new(mut vertices: Vec<Point<Real>>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            let _ = vertices.pop();
        }

        Self { vertices }
    }

    /// The vertices of the exterior ring, without the closing vertex.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// Consumes this polygon and returns the vertices of its exterior ring.
    #[inline]
    pub fn into_vertices(self) -> Vec<Point<Real>> {
        self.vertices
    }

    /// The number of edges of the exterior ring.
    #[inline]
    pub fn num_edges(&self) -> usize {
        if self.vertices.len() < 2 {
            0
        } else {
            self.vertices.len()
        }
    }

    /// The `i`-th edge of the exterior ring, going from vertex `i` to vertex `i + 1`.
    #[inline]
    pub fn edge(&self, i: usize) -> Segment {
        let n = self.vertices.len();
        Segment::new(self.vertices[i], self.vertices[(i + 1) % n])
    }

    /// An iterator through all the edges of the exterior ring, including the closing edge.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Segment> + '_ {
        (0..self.num_edges()).map(move |i| self.edge(i))
    }

    /// The signed area of this polygon: positive if the ring is counter-clockwise.
    pub fn signed_area(&self) -> Real {
        signed_area(&self.vertices)
    }

    /// The (unsigned) area of this polygon.
    pub fn area(&self) -> Real {
        self.signed_area().abs()
    }

    /// The length of the exterior ring.
    pub fn perimeter(&self) -> Real {
        self.edges().map(|e| e.length()).sum()
    }

    /// The AABB of this polygon.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points_ref(&self.vertices)
    }

    /// Tests if `pt` is inside this polygon.
    ///
    /// Points exactly on the boundary may be reported either way.
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        utils::point_in_poly2d(pt, &self.vertices)
    }

    /// The distance from `pt` to the exterior ring.
    pub fn distance_to_boundary(&self, pt: &Point<Real>) -> Real {
        self.edges()
            .map(|e| e.project_local_point(pt).1)
            .fold(Real::MAX, Real::min)
    }
}

impl From<Vec<Point<Real>>> for Polygon {
    fn from(vertices: Vec<Point<Real>>) -> Self {
        Self::new(vertices)
    }
}

/// The signed area of the closed ring `ring` (shoelace formula).
pub(crate) fn signed_area(ring: &[Point<Real>]) -> Real {
    if ring.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;

    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        twice_area += a.coords.perp(&b.coords);
    }

    twice_area / 2.0
}
