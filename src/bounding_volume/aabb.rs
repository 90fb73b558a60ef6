//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};
use num::Bounded;

/// A 2D Axis-Aligned Bounding Box (AABB).
///
/// Used to pre-filter the features a splitter may touch before running the
/// exact intersection test.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use cleave2d::bounding_volume::Aabb;
/// use cleave2d::math::Point;
///
/// let aabb = Aabb::from_points([Point::new(1.0, 2.0), Point::new(-1.0, 4.0)]);
/// assert_eq!(aabb.mins, Point::new(-1.0, 2.0));
/// assert_eq!(aabb.maxs, Point::new(1.0, 4.0));
/// assert!(aabb.contains_local_point(&Point::new(0.0, 3.0)));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// `mins` must be component-wise smaller than `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::max_values` and `maxs`components set to `-Real::max_values`.
    ///
    /// This is often used as the initial values of some AABB merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Computes the AABB enclosing a set of points.
    ///
    /// Returns an invalid AABB (see [`Aabb::new_invalid`]) if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();
        for pt in pts {
            result.take_point(pt);
        }
        result
    }

    /// Computes the AABB enclosing a set of points given by reference.
    pub fn from_points_ref<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        Self::from_points(pts.into_iter().copied())
    }

    /// Is this AABB valid, i.e., are its `mins` smaller or equal to its `maxs`?
    #[inline]
    pub fn is_valid(&self) -> bool {
        na::partial_le(&self.mins, &self.maxs)
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The full extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// Does this AABB contain the given point?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        point.x >= self.mins.x
            && point.x <= self.maxs.x
            && point.y >= self.mins.y
            && point.y <= self.maxs.y
    }

    /// Do both AABBs overlap (touching counts as overlapping)?
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    /// Does this AABB fully contain `other`?
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    /// Merges `other` into this AABB.
    #[inline]
    pub fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Returns a copy of this AABB enlarged by `amount` on every side.
    ///
    /// A negative `amount` is clamped to zero.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        let amount = amount.max(0.0);
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }

    /// The four corners of this AABB, counter-clockwise starting at `mins`.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 4] {
        [
            Point::new(self.mins.x, self.mins.y),
            Point::new(self.maxs.x, self.mins.y),
            Point::new(self.maxs.x, self.maxs.y),
            Point::new(self.mins.x, self.maxs.y),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::Aabb;
    use crate::math::Point;

    #[test]
    fn empty_point_set_gives_invalid_aabb() {
        let aabb = Aabb::from_points(core::iter::empty());
        assert!(!aabb.is_valid());
        assert!(!aabb.intersects(&Aabb::new(Point::origin(), Point::new(1.0, 1.0))));
    }

    #[test]
    fn touching_aabbs_intersect() {
        let a = Aabb::new(Point::origin(), Point::new(1.0, 1.0));
        let b = Aabb::new(Point::new(1.0, 0.5), Point::new(2.0, 2.0));
        let c = Aabb::new(Point::new(1.5, 0.5), Point::new(2.0, 2.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.merged(&c), Aabb::new(Point::origin(), Point::new(2.0, 2.0)));
    }

    #[test]
    fn loosened_grows_every_side() {
        let a = Aabb::new(Point::origin(), Point::new(1.0, 1.0)).loosened(0.5);
        assert_eq!(a.mins, Point::new(-0.5, -0.5));
        assert_eq!(a.maxs, Point::new(1.5, 1.5));
        assert!(a.contains(&Aabb::new(Point::origin(), Point::new(1.0, 1.0))));
    }
}
