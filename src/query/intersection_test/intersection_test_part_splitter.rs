use crate::math::Real;
use crate::query::Splitter;
use crate::shape::{Geometry, LineString, Part, Polygon, Segment};
use crate::utils;

/// Tests if a segment intersects the splitter.
#[inline]
pub fn intersection_test_segment_splitter(
    segment1: &Segment,
    splitter2: &Splitter,
    epsilon: Real,
) -> bool {
    splitter2.segments().any(|cutter| {
        utils::segments_intersection2d(&segment1.a, &segment1.b, &cutter.a, &cutter.b, epsilon)
            .is_some()
    })
}

/// Tests if a line string intersects the splitter.
pub fn intersection_test_line_string_splitter(
    line1: &LineString,
    splitter2: &Splitter,
    epsilon: Real,
) -> bool {
    if !line1
        .local_aabb()
        .loosened(epsilon)
        .intersects(splitter2.local_aabb())
    {
        return false;
    }

    line1
        .segments()
        .any(|seg| intersection_test_segment_splitter(&seg, splitter2, epsilon))
}

/// Tests if a polygon intersects the splitter.
///
/// The polygon is seen as a solid: a splitter lying entirely inside it
/// intersects it.
pub fn intersection_test_polygon_splitter(
    poly1: &Polygon,
    splitter2: &Splitter,
    epsilon: Real,
) -> bool {
    if !poly1
        .local_aabb()
        .loosened(epsilon)
        .intersects(splitter2.local_aabb())
    {
        return false;
    }

    poly1
        .edges()
        .any(|edge| intersection_test_segment_splitter(&edge, splitter2, epsilon))
        || poly1.contains_local_point(&splitter2.points()[0])
}

/// Tests if a single part intersects the splitter.
pub fn intersection_test_part_splitter(part1: &Part, splitter2: &Splitter, epsilon: Real) -> bool {
    match part1 {
        Part::LineString(line) => intersection_test_line_string_splitter(line, splitter2, epsilon),
        Part::Polygon(poly) => intersection_test_polygon_splitter(poly, splitter2, epsilon),
    }
}

/// Tests if any part of a geometry intersects the splitter.
pub fn intersection_test_geometry_splitter(
    geometry1: &Geometry,
    splitter2: &Splitter,
    epsilon: Real,
) -> bool {
    geometry1
        .parts()
        .iter()
        .any(|part| intersection_test_part_splitter(part, splitter2, epsilon))
}
