use alloc::vec::Vec;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::{Geometry, Part, Segment};

/// Error returned when building a [`Splitter`] from too few points.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidSplitter {
    /// A splitter needs at least two distinct points.
    #[error("a splitter needs at least two distinct points, got {0}")]
    TooFewPoints(usize),
}

/// The line drawn by the user to cut features.
///
/// A splitter is an open polyline with at least two distinct points. It is built
/// once per split operation and shared, read-only, by every feature being split.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Point<Real>>", into = "Vec<Point<Real>>")
)]
pub struct Splitter {
    points: Vec<Point<Real>>,
    aabb: Aabb,
}

impl Splitter {
    /// Creates a splitter from its ordered points.
    ///
    /// Consecutive duplicate points are removed.
    pub fn new(mut points: Vec<Point<Real>>) -> Result<Self, InvalidSplitter> {
        points.dedup();

        if points.len() < 2 {
            return Err(InvalidSplitter::TooFewPoints(points.len()));
        }

        let aabb = Aabb::from_points_ref(&points);
        Ok(Self { points, aabb })
    }

    /// Extracts the splitter from a digitized geometry.
    ///
    /// The vertices of every part are chained in order. A polygon part contributes
    /// its closed ring, i.e., its first vertex is repeated at the end.
    pub fn from_geometry(geometry: &Geometry) -> Result<Self, InvalidSplitter> {
        let mut points = Vec::new();

        for part in geometry.parts() {
            match part {
                Part::LineString(line) => points.extend_from_slice(line.points()),
                Part::Polygon(poly) => {
                    points.extend_from_slice(poly.vertices());
                    points.extend(poly.vertices().first().copied());
                }
            }
        }

        Self::new(points)
    }

    /// Returns a copy of this splitter with `f` applied to each point.
    ///
    /// This is typically used to bring a splitter digitized in the project's
    /// coordinate reference system into the edited layer's one.
    pub fn transformed(
        &self,
        f: impl FnMut(&Point<Real>) -> Point<Real>,
    ) -> Result<Self, InvalidSplitter> {
        Self::new(self.points.iter().map(f).collect())
    }

    /// The points of this splitter.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The number of segments of this splitter.
    #[inline]
    pub fn num_segments(&self) -> usize {
        self.points.len() - 1
    }

    /// An iterator through the segments of this splitter.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// The AABB of this splitter.
    #[inline]
    pub fn local_aabb(&self) -> &Aabb {
        &self.aabb
    }
}

impl TryFrom<Vec<Point<Real>>> for Splitter {
    type Error = InvalidSplitter;

    fn try_from(points: Vec<Point<Real>>) -> Result<Self, InvalidSplitter> {
        Self::new(points)
    }
}

impl From<Splitter> for Vec<Point<Real>> {
    fn from(splitter: Splitter) -> Self {
        splitter.points
    }
}
