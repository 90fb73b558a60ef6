//! Geometries supported by cleave.

pub use self::geometry::{Geometry, GeometryType, Part};
pub use self::line_string::LineString;
pub use self::polygon::Polygon;
pub use self::segment::Segment;

pub(crate) use self::polygon::signed_area;

mod geometry;
mod line_string;
mod polygon;
mod segment;
