use alloc::vec::Vec;

use crate::query::{self, SplitTolerances, Splitter};
use crate::shape::Geometry;

/// The operations the partitioner needs from a geometry.
///
/// Apart from these, the geometry is opaque: the actual cut is performed by a
/// [`SplitPrimitive`](crate::query::SplitPrimitive).
pub trait Splittable: Sized {
    /// Is this a multipart geometry?
    fn is_multipart(&self) -> bool;

    /// The number of sub-parts of this geometry.
    fn num_parts(&self) -> usize;

    /// Does this geometry have no sub-part at all?
    fn is_empty(&self) -> bool {
        self.num_parts() == 0
    }

    /// The sub-parts of this geometry, each as a single-part geometry, in order.
    fn parts(&self) -> Vec<Self>;

    /// Combines two geometries into one multipart geometry, `self` first.
    fn combine(self, other: Self) -> Self;

    /// Does this geometry intersect the splitter?
    fn intersects_splitter(&self, splitter: &Splitter) -> bool;
}

impl Splittable for Geometry {
    #[inline]
    fn is_multipart(&self) -> bool {
        Geometry::is_multipart(self)
    }

    #[inline]
    fn num_parts(&self) -> usize {
        Geometry::num_parts(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Geometry::is_empty(self)
    }

    fn parts(&self) -> Vec<Self> {
        self.to_single_parts()
    }

    #[inline]
    fn combine(self, other: Self) -> Self {
        Geometry::combine(self, other)
    }

    fn intersects_splitter(&self, splitter: &Splitter) -> bool {
        query::intersection_test_geometry_splitter(
            self,
            splitter,
            SplitTolerances::default().epsilon,
        )
    }
}
