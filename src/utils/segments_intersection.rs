use crate::math::{Point, Real};

#[cfg(not(feature = "std"))]
use na::ComplexField;

/// Intersection between two segments.
///
/// Locations are given as parameters along each segment: `0` is its first
/// point, `1` its second point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SegmentsIntersection {
    /// Single point of intersection.
    Point {
        /// Location of the intersection point on the first segment.
        loc1: Real,
        /// Location of the intersection point on the second segment.
        loc2: Real,
    },
    /// Intersection along a segment (when both segments are collinear).
    Segment {
        /// Location of the first intersection point on the first segment.
        first_loc1: Real,
        /// Location of the first intersection point on the second segment.
        first_loc2: Real,
        /// Location of the second intersection point on the first segment.
        second_loc1: Real,
        /// Location of the second intersection point on the second segment.
        second_loc2: Real,
    },
}

/// Computes the intersection between the segments `[a, b]` and `[c, d]`.
///
/// Degenerate segments (with both endpoints equal) never intersect anything.
pub fn segments_intersection2d(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
    epsilon: Real,
) -> Option<SegmentsIntersection> {
    let r = b - a;
    let s = d - c;
    let r_len = r.norm();
    let s_len = s.norm();

    if r_len <= epsilon || s_len <= epsilon {
        return None;
    }

    let denom = r.perp(&s);
    let ac = c - a;

    // If denom is zero, then segments are parallel: handle separately.
    if denom.abs() <= epsilon * r_len * s_len || ulps_eq!(denom, 0.0) {
        return parallel_intersection(a, c, &r, &s, r_len, epsilon);
    }

    let loc1 = ac.perp(&s) / denom;
    let loc2 = ac.perp(&r) / denom;
    let tol1 = epsilon / r_len;
    let tol2 = epsilon / s_len;

    if loc1 < -tol1 || loc1 > 1.0 + tol1 || loc2 < -tol2 || loc2 > 1.0 + tol2 {
        None
    } else {
        Some(SegmentsIntersection::Point {
            loc1: loc1.clamp(0.0, 1.0),
            loc2: loc2.clamp(0.0, 1.0),
        })
    }
}

fn parallel_intersection(
    a: &Point<Real>,
    c: &Point<Real>,
    r: &crate::math::Vector<Real>,
    s: &crate::math::Vector<Real>,
    r_len: Real,
    epsilon: Real,
) -> Option<SegmentsIntersection> {
    let ac = c - a;

    // Not on the same line.
    if ac.perp(r).abs() > epsilon * r_len {
        return None;
    }

    let r_sq = r.norm_squared();
    let s_sq = s.norm_squared();
    let tc = ac.dot(r) / r_sq;
    let td = (ac + s).dot(r) / r_sq;
    let tol = epsilon / r_len;

    let lo = tc.min(td).max(0.0);
    let hi = tc.max(td).min(1.0);

    if lo > hi + tol {
        return None;
    }

    let loc_on_second = |t: Real| ((a + r * t) - c).dot(s) / s_sq;

    if hi - lo <= tol {
        let loc1 = lo.min(1.0);
        return Some(SegmentsIntersection::Point {
            loc1,
            loc2: loc_on_second(loc1).clamp(0.0, 1.0),
        });
    }

    Some(SegmentsIntersection::Segment {
        first_loc1: lo,
        first_loc2: loc_on_second(lo).clamp(0.0, 1.0),
        second_loc1: hi,
        second_loc2: loc_on_second(hi).clamp(0.0, 1.0),
    })
}
