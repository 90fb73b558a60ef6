//! Definition of the segment shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

#[cfg(not(feature = "std"))]
use na::ComplexField; // for .abs()

/// A segment shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The segment first point.
    pub a: Point<Real>,
    /// The segment second point.
    pub b: Point<Real>,
}

impl Segment {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// The direction of this segment scaled by its length.
    ///
    /// Points from `self.a` toward `self.b`.
    #[inline]
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The length of this segment.
    #[inline]
    pub fn length(&self) -> Real {
        self.scaled_direction().norm()
    }

    /// The point at parameter `t` of this segment, `t = 0` being `self.a`
    /// and `t = 1` being `self.b`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.a + self.scaled_direction() * t
    }

    /// The point halfway between both endpoints.
    #[inline]
    pub fn midpoint(&self) -> Point<Real> {
        na::center(&self.a, &self.b)
    }

    /// The AABB of this segment.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::new(self.a.inf(&self.b), self.a.sup(&self.b))
    }

    /// Projects `pt` on this segment.
    ///
    /// Returns the parameter of the projected point, clamped to `[0, 1]`,
    /// and its distance to `pt`.
    pub fn project_local_point(&self, pt: &Point<Real>) -> (Real, Real) {
        let dir = self.scaled_direction();
        let sqnorm = dir.norm_squared();

        let t = if sqnorm == 0.0 {
            0.0
        } else {
            ((pt - self.a).dot(&dir) / sqnorm).clamp(0.0, 1.0)
        };

        (t, na::distance(&self.point_at(t), pt))
    }

    /// Twice the signed area of the triangle `(self.a, self.b, pt)`.
    ///
    /// Positive if `pt` lies on the left of the segment.
    #[inline]
    pub fn side(&self, pt: &Point<Real>) -> Real {
        self.scaled_direction().perp(&(pt - self.a))
    }

    /// Is this segment degenerate, i.e., are both endpoints closer than `epsilon`?
    #[inline]
    pub fn is_degenerate(&self, epsilon: Real) -> bool {
        let dir = self.scaled_direction();
        dir.x.abs() <= epsilon && dir.y.abs() <= epsilon
    }
}
