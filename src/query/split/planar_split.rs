use alloc::vec::Vec;

use crate::query::{SplitOutput, SplitPrimitive, SplitPrimitiveError, SplitTolerances, Splitter};
use crate::shape::{Geometry, Part};

/// The split primitive provided by this crate for [`Geometry`].
///
/// Every part of the geometry is cut independently:
/// - line strings are cut at each crossing with the splitter, see [`LineString::split`];
/// - polygons are sliced into the regions enclosed by their ring and the splitter,
///   see [`Polygon::split`].
///
/// The remainder keeps the first piece of each line string and the largest piece
/// of each polygon; all other pieces become new geometries, with the same
/// multipart flag as the input.
///
/// [`LineString::split`]: crate::shape::LineString::split
/// [`Polygon::split`]: crate::shape::Polygon::split
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PlanarSplit {
    /// Tolerances of the underlying geometric computations.
    pub tolerances: SplitTolerances,
}

impl PlanarSplit {
    /// Creates a split primitive with the given tolerances.
    pub fn new(tolerances: SplitTolerances) -> Self {
        Self { tolerances }
    }
}

impl SplitPrimitive<Geometry> for PlanarSplit {
    fn split(
        &self,
        geometry: &Geometry,
        splitter: &Splitter,
        topological: bool,
    ) -> Result<SplitOutput<Geometry>, SplitPrimitiveError> {
        if geometry.is_empty() {
            return Err(SplitPrimitiveError::EmptyGeometry);
        }

        let multipart = geometry.is_multipart();
        let mut remainder = Vec::with_capacity(geometry.num_parts());
        let mut new_geometries = Vec::new();
        let mut topology_test_points = Vec::new();

        for part in geometry.parts() {
            let (pieces, cut_points): (Vec<Part>, _) = match part {
                Part::LineString(line) => {
                    let (pieces, cuts) = line.split(splitter, &self.tolerances)?;
                    (pieces.into_iter().map(Part::LineString).collect(), cuts)
                }
                Part::Polygon(poly) => {
                    let (pieces, cuts) = poly.split(splitter, &self.tolerances)?;
                    (pieces.into_iter().map(Part::Polygon).collect(), cuts)
                }
            };

            let mut pieces = pieces.into_iter();
            remainder.extend(pieces.next());
            new_geometries
                .extend(pieces.map(|piece| Geometry::from_parts(alloc::vec![piece], multipart)));

            if topological {
                topology_test_points.extend(cut_points);
            }
        }

        Ok(SplitOutput {
            remainder: Geometry::from_parts(remainder, multipart),
            new_geometries,
            topology_test_points,
        })
    }
}

#[cfg(test)]
mod test {
    use super::PlanarSplit;
    use crate::math::Point;
    use crate::query::{SplitPrimitive, SplitPrimitiveError, Splitter};
    use crate::shape::{Geometry, LineString};
    use alloc::vec;

    fn splitter() -> Splitter {
        Splitter::new(vec![Point::new(1.0, -5.0), Point::new(1.0, 5.0)]).unwrap()
    }

    #[test]
    fn topology_points_only_on_request() {
        let line = Geometry::line_string(vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);

        let out = PlanarSplit::default().split(&line, &splitter(), false).unwrap();
        assert_eq!(out.new_geometries.len(), 1);
        assert!(out.topology_test_points.is_empty());

        let out = PlanarSplit::default().split(&line, &splitter(), true).unwrap();
        assert_eq!(out.topology_test_points, vec![Point::new(1.0, 0.0)]);
    }

    #[test]
    fn multipart_input_keeps_one_remainder_per_part() {
        let geom = Geometry::multi_line_string(vec![
            LineString::new(vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]),
            LineString::new(vec![Point::new(0.0, 1.0), Point::new(2.0, 1.0)]),
        ]);
        let out = PlanarSplit::default().split(&geom, &splitter(), false).unwrap();

        assert_eq!(out.remainder.num_parts(), 2);
        assert!(out.remainder.is_multipart());
        assert_eq!(out.new_geometries.len(), 2);
        assert!(out.new_geometries.iter().all(|g| g.is_multipart()));
    }

    #[test]
    fn untouched_geometry_is_returned_as_is() {
        let poly = Geometry::polygon(vec![
            Point::new(3.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 1.0),
        ]);
        let out = PlanarSplit::default().split(&poly, &splitter(), true).unwrap();
        assert!(!out.is_split());
        assert_eq!(out.remainder, poly);
    }

    #[test]
    fn empty_geometry_fails() {
        let empty = Geometry::from_parts(vec![], true);
        assert_eq!(
            PlanarSplit::default().split(&empty, &splitter(), false),
            Err(SplitPrimitiveError::EmptyGeometry)
        );
    }

    #[test]
    fn polygon_pieces_become_new_geometries() {
        let square = Geometry::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        let out = PlanarSplit::default().split(&square, &splitter(), true).unwrap();

        assert_eq!(out.new_geometries.len(), 1);
        assert!(!out.remainder.is_multipart());
        assert_relative_eq!(out.remainder.area(), 2.0, epsilon = 1.0e-5);
        assert_relative_eq!(out.new_geometries[0].area(), 2.0, epsilon = 1.0e-5);
        assert_eq!(out.topology_test_points.len(), 2);
    }
}
