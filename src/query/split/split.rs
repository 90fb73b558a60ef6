use alloc::string::String;
use alloc::vec::Vec;

use crate::math::{Point, Real};
use crate::query::Splitter;

/// Tolerances used by the split operations.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "f32")] {
/// # use cleave2d::query::SplitTolerances;
/// // Use default tolerances (recommended for most cases)
/// let default_tol = SplitTolerances::default();
///
/// // Or use a larger one for data digitized with a coarse precision.
/// let custom_tol = SplitTolerances { epsilon: 1.0e-3 };
/// # }
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SplitTolerances {
    /// Distance under which two points are considered equal, and two segments
    /// are considered parallel.
    pub epsilon: Real,
}

impl Default for SplitTolerances {
    fn default() -> Self {
        Self {
            epsilon: Real::EPSILON * 100.0,
        }
    }
}

/// The result of a successful split of one geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitOutput<G> {
    /// What is left of the input geometry once the new geometries have been cut off.
    ///
    /// When nothing was cut, this is the input geometry itself.
    pub remainder: G,
    /// The geometries cut off the input, in the order they were produced.
    pub new_geometries: Vec<G>,
    /// Points the feature store must register so that topologically-connected
    /// neighbors get a vertex on the new boundaries.
    ///
    /// Only filled when the split was requested with topological editing enabled.
    pub topology_test_points: Vec<Point<Real>>,
}

impl<G> SplitOutput<G> {
    /// A successful split that cut nothing off `geometry`.
    pub fn unchanged(geometry: G) -> Self {
        Self {
            remainder: geometry,
            new_geometries: Vec::new(),
            topology_test_points: Vec::new(),
        }
    }

    /// Did the split produce at least one new geometry?
    pub fn is_split(&self) -> bool {
        !self.new_geometries.is_empty()
    }
}

/// Errors reported by a [`SplitPrimitive`].
///
/// A split that simply does not cut anything is not an error: it is a successful
/// [`SplitOutput`] without new geometries.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SplitPrimitiveError {
    /// The geometry to split has no part.
    #[error("the geometry to split is empty")]
    EmptyGeometry,
    /// A line string has fewer than two distinct vertices.
    #[error("line string with fewer than two distinct vertices")]
    DegenerateLineString,
    /// A polygon ring has fewer than three distinct vertices, or a zero area.
    #[error("polygon ring with fewer than three distinct vertices or a zero area")]
    DegeneratePolygon,
    /// A polygon piece produced by the split has a hole, e.g., when the splitter
    /// draws a closed loop inside the polygon. Interior rings are not supported.
    #[error("the split produced a polygon with an interior ring")]
    InteriorRing,
    /// A failure reported by an external geometry engine.
    #[error("geometry engine error: {0}")]
    Engine(String),
}

/// A single-geometry splitting operation.
///
/// This is the primitive the [`SplitPartitioner`](crate::partition::SplitPartitioner)
/// delegates the actual geometric cut to. [`PlanarSplit`](crate::query::PlanarSplit)
/// is the implementation provided by this crate for [`Geometry`](crate::shape::Geometry);
/// a host application may plug its own geometry engine instead.
pub trait SplitPrimitive<G> {
    /// Cuts `geometry` along `splitter`.
    ///
    /// If `topological` is `true`, the output must contain the topology test points
    /// of the cut.
    fn split(
        &self,
        geometry: &G,
        splitter: &Splitter,
        topological: bool,
    ) -> Result<SplitOutput<G>, SplitPrimitiveError>;
}

impl<G, P: SplitPrimitive<G> + ?Sized> SplitPrimitive<G> for &P {
    fn split(
        &self,
        geometry: &G,
        splitter: &Splitter,
        topological: bool,
    ) -> Result<SplitOutput<G>, SplitPrimitiveError> {
        (**self).split(geometry, splitter, topological)
    }
}
