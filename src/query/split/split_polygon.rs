use alloc::vec::Vec;

use i_overlay::core::fill_rule::FillRule;
use i_overlay::float::slice::FloatSlice;
use ordered_float::OrderedFloat;

use crate::math::{Point, Real};
use crate::query::{SplitPrimitiveError, SplitTolerances, Splitter};
use crate::shape::{self, Polygon, Segment};
use crate::utils::{self, SegmentsIntersection};

#[cfg(not(feature = "std"))]
use na::ComplexField; // for .abs()

/// A point where the splitter crosses the polygon boundary.
#[derive(Copy, Clone, Debug)]
struct Crossing {
    /// Curvilinear location along the splitter: segment index plus the location on that segment.
    splitter_loc: Real,
    point: Point<Real>,
}

impl Polygon {
    /// Cuts this polygon along `splitter`.
    ///
    /// The slicing is done by `i_overlay`: every region enclosed by the polygon
    /// boundary and the splitter becomes one piece. Portions of the splitter that
    /// don't separate two regions, e.g., a splitter ending inside the polygon, cut
    /// nothing. A self-crossing splitter cuts along each of its branches.
    ///
    /// Returns the pieces, the largest one first, followed by the points where the
    /// splitter crosses the polygon boundary between two pieces. Pieces have the
    /// orientation of `self`. If nothing is cut, the only piece is `self`.
    pub fn split(
        &self,
        splitter: &Splitter,
        tolerances: &SplitTolerances,
    ) -> Result<(Vec<Polygon>, Vec<Point<Real>>), SplitPrimitiveError> {
        let eps = tolerances.epsilon;
        let ring = clean_ring(self.vertices(), eps).ok_or(SplitPrimitiveError::DegeneratePolygon)?;
        let unchanged = || -> Result<(Vec<Polygon>, Vec<Point<Real>>), SplitPrimitiveError> {
            Ok((alloc::vec![self.clone()], Vec::new()))
        };

        let aabb = self.local_aabb();

        if !aabb.loosened(eps).intersects(splitter.local_aabb()) {
            return unchanged();
        }

        let subject: Vec<[f64; 2]> = ring.iter().map(to_overlay_point).collect();
        let cutters: Vec<Vec<[f64; 2]>> =
            alloc::vec![splitter.points().iter().map(to_overlay_point).collect()];
        let shapes = subject.slice_by(&cutters, FillRule::NonZero);

        if shapes.len() < 2 {
            return unchanged();
        }

        let ccw = shape::signed_area(&ring) > 0.0;
        let mut pieces = Vec::with_capacity(shapes.len());

        for contours in shapes {
            let mut contours = contours.into_iter();
            let Some(exterior) = contours.next() else {
                continue;
            };

            if contours.next().is_some() {
                return Err(SplitPrimitiveError::InteriorRing);
            }

            let exterior: Vec<_> = exterior.iter().map(from_overlay_point).collect();
            let Some(mut piece) = clean_ring(&exterior, eps) else {
                log::debug!("Dropping a degenerate piece produced by the polygon slicing.");
                continue;
            };

            if (shape::signed_area(&piece) > 0.0) != ccw {
                piece.reverse();
            }

            pieces.push(piece);
        }

        if pieces.len() < 2 {
            return unchanged();
        }

        let largest = pieces
            .iter()
            .enumerate()
            .max_by_key(|(_, piece)| OrderedFloat(shape::signed_area(piece).abs()))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let largest = pieces.remove(largest);
        pieces.insert(0, largest);

        // Slicing snaps coordinates to an integer grid scaled on the input extents.
        let snap = (eps * 10.0).max(aabb.extents().norm() * 1.0e-6);
        let cut_points = boundary_crossings(&ring, splitter, eps)
            .into_iter()
            .filter(|pt| {
                pieces
                    .iter()
                    .filter(|piece| distance_to_ring(piece, pt) <= snap)
                    .count()
                    >= 2
            })
            .collect();

        Ok((pieces.into_iter().map(Polygon::new).collect(), cut_points))
    }
}

fn to_overlay_point(pt: &Point<Real>) -> [f64; 2] {
    [f64::from(pt.x), f64::from(pt.y)]
}

fn from_overlay_point(pt: &[f64; 2]) -> Point<Real> {
    Point::new(pt[0] as Real, pt[1] as Real)
}

/// Merges consecutive duplicate vertices and rejects degenerate rings.
fn clean_ring(vertices: &[Point<Real>], eps: Real) -> Option<Vec<Point<Real>>> {
    let mut ring: Vec<Point<Real>> = Vec::with_capacity(vertices.len());

    for pt in vertices {
        if ring.last().is_none_or(|last| na::distance(last, pt) > eps) {
            ring.push(*pt);
        }
    }

    while ring.len() > 1 && na::distance(&ring[0], &ring[ring.len() - 1]) <= eps {
        let _ = ring.pop();
    }

    if ring.len() < 3 || shape::signed_area(&ring).abs() <= eps {
        None
    } else {
        Some(ring)
    }
}

/// The points where the splitter meets the boundary of `ring`, in splitter order.
///
/// Portions of the splitter running along an edge are ignored.
fn boundary_crossings(ring: &[Point<Real>], splitter: &Splitter, eps: Real) -> Vec<Point<Real>> {
    let n = ring.len();
    let mut crossings = Vec::new();

    for i in 0..n {
        let edge = Segment::new(ring[i], ring[(i + 1) % n]);

        for (j, cutter) in splitter.segments().enumerate() {
            if let Some(SegmentsIntersection::Point { loc1, loc2 }) =
                utils::segments_intersection2d(&edge.a, &edge.b, &cutter.a, &cutter.b, eps)
            {
                crossings.push(Crossing {
                    splitter_loc: j as Real + loc2,
                    point: edge.point_at(loc1),
                });
            }
        }
    }

    crossings.sort_by_key(|c| OrderedFloat(c.splitter_loc));

    let mut points: Vec<Point<Real>> = Vec::with_capacity(crossings.len());
    for crossing in crossings {
        if !points.iter().any(|p| na::distance(p, &crossing.point) <= eps) {
            points.push(crossing.point);
        }
    }

    points
}

fn distance_to_ring(ring: &[Point<Real>], pt: &Point<Real>) -> Real {
    let n = ring.len();
    (0..n)
        .map(|i| Segment::new(ring[i], ring[(i + 1) % n]).project_local_point(pt).1)
        .fold(Real::MAX, Real::min)
}
