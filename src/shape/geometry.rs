use alloc::vec::Vec;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::{LineString, Polygon};

/// Enum representing the type of a [`Geometry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum GeometryType {
    /// The geometry has no part.
    Empty,
    /// Every part is a line string.
    Line,
    /// Every part is a polygon.
    Polygon,
    /// The geometry mixes line strings and polygons.
    Mixed,
}

/// A single-part element of a [`Geometry`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Part {
    /// An open polyline.
    LineString(LineString),
    /// A simple polygon.
    Polygon(Polygon),
}

impl Part {
    /// The AABB of this part.
    pub fn local_aabb(&self) -> Aabb {
        match self {
            Part::LineString(line) => line.local_aabb(),
            Part::Polygon(poly) => poly.local_aabb(),
        }
    }

    /// The area of this part (zero for line strings).
    pub fn area(&self) -> Real {
        match self {
            Part::LineString(_) => 0.0,
            Part::Polygon(poly) => poly.area(),
        }
    }

    /// The length of this part: the line length, or the polygon perimeter.
    pub fn length(&self) -> Real {
        match self {
            Part::LineString(line) => line.length(),
            Part::Polygon(poly) => poly.perimeter(),
        }
    }

    /// The vertices of this part.
    pub fn points(&self) -> &[Point<Real>] {
        match self {
            Part::LineString(line) => line.points(),
            Part::Polygon(poly) => poly.vertices(),
        }
    }

    fn geometry_type(&self) -> GeometryType {
        match self {
            Part::LineString(_) => GeometryType::Line,
            Part::Polygon(_) => GeometryType::Polygon,
        }
    }
}

impl From<LineString> for Part {
    fn from(line: LineString) -> Self {
        Part::LineString(line)
    }
}

impl From<Polygon> for Part {
    fn from(poly: Polygon) -> Self {
        Part::Polygon(poly)
    }
}

/// A possibly multipart vector geometry.
///
/// A single-part geometry holds exactly one [`Part`]. A multipart geometry holds
/// any number of parts; it may hold a single part, in which case it is still
/// reported as multipart by [`Geometry::is_multipart`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Geometry {
    parts: Vec<Part>,
    multipart: bool,
}

impl Geometry {
    /// Creates a geometry from its parts.
    pub fn from_parts(parts: Vec<Part>, multipart: bool) -> Self {
        Self { parts, multipart }
    }

    /// A single-part geometry.
    pub fn single(part: impl Into<Part>) -> Self {
        Self {
            parts: alloc::vec![part.into()],
            multipart: false,
        }
    }

    /// A single-part line geometry.
    pub fn line_string(points: Vec<Point<Real>>) -> Self {
        Self::single(LineString::new(points))
    }

    /// A single-part polygon geometry.
    pub fn polygon(vertices: Vec<Point<Real>>) -> Self {
        Self::single(Polygon::new(vertices))
    }

    /// A multipart line geometry.
    pub fn multi_line_string(lines: Vec<LineString>) -> Self {
        Self::from_parts(lines.into_iter().map(Part::LineString).collect(), true)
    }

    /// A multipart polygon geometry.
    pub fn multi_polygon(polygons: Vec<Polygon>) -> Self {
        Self::from_parts(polygons.into_iter().map(Part::Polygon).collect(), true)
    }

    /// The parts of this geometry.
    #[inline]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Consumes this geometry and returns its parts.
    #[inline]
    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// The number of parts of this geometry.
    #[inline]
    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    /// Is this a multipart geometry?
    #[inline]
    pub fn is_multipart(&self) -> bool {
        self.multipart
    }

    /// Does this geometry have no part?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The type of the parts of this geometry.
    pub fn geometry_type(&self) -> GeometryType {
        let mut parts = self.parts.iter().map(Part::geometry_type);
        match parts.next() {
            None => GeometryType::Empty,
            Some(first) => {
                if parts.all(|ty| ty == first) {
                    first
                } else {
                    GeometryType::Mixed
                }
            }
        }
    }

    /// Splits this geometry into single-part geometries, one per part.
    pub fn to_single_parts(&self) -> Vec<Geometry> {
        self.parts.iter().cloned().map(Geometry::single).collect()
    }

    /// Combines two geometries into one multipart geometry.
    ///
    /// Parts are concatenated, `self` first. Overlapping parts are not dissolved.
    pub fn combine(mut self, other: Geometry) -> Geometry {
        self.parts.extend(other.parts);
        self.multipart = true;
        self
    }

    /// The AABB of this geometry, or `None` if it is empty.
    pub fn local_aabb(&self) -> Option<Aabb> {
        self.parts
            .iter()
            .map(Part::local_aabb)
            .reduce(|a, b| a.merged(&b))
    }

    /// The summed area of every polygonal part.
    pub fn area(&self) -> Real {
        self.parts.iter().map(Part::area).sum()
    }

    /// The summed length of every part.
    pub fn length(&self) -> Real {
        self.parts.iter().map(Part::length).sum()
    }

    /// Calls `f` on every vertex of this geometry, part by part.
    pub fn map_points(&mut self, mut f: impl FnMut(&Point<Real>) -> Point<Real>) {
        for part in &mut self.parts {
            let new_part = match part {
                Part::LineString(line) => {
                    Part::LineString(LineString::new(line.points().iter().map(&mut f).collect()))
                }
                Part::Polygon(poly) => {
                    Part::Polygon(Polygon::new(poly.vertices().iter().map(&mut f).collect()))
                }
            };
            *part = new_part;
        }
    }
}
