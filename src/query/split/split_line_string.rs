use alloc::vec::Vec;
use core::mem;

use ordered_float::OrderedFloat;

use crate::math::{Point, Real};
use crate::query::{SplitPrimitiveError, SplitTolerances, Splitter};
use crate::shape::LineString;
use crate::utils::{self, SegmentsIntersection};

struct Cut {
    segment: usize,
    loc: Real,
    point: Point<Real>,
}

impl LineString {
    /// Cuts this line string at every point where it crosses `splitter`.
    ///
    /// Returns the pieces in line order, followed by the cut points. A splitter that
    /// does not cross the line (or only touches one of its endpoints, or runs along
    /// it) yields a single piece equal to `self`.
    pub fn split(
        &self,
        splitter: &Splitter,
        tolerances: &SplitTolerances,
    ) -> Result<(Vec<LineString>, Vec<Point<Real>>), SplitPrimitiveError> {
        let eps = tolerances.epsilon;

        if self.num_distinct_points(eps) < 2 {
            return Err(SplitPrimitiveError::DegenerateLineString);
        }

        if !self
            .local_aabb()
            .loosened(eps)
            .intersects(splitter.local_aabb())
        {
            return Ok((alloc::vec![self.clone()], Vec::new()));
        }

        let mut cuts = Vec::new();

        for (i, seg) in self.segments().enumerate() {
            for cutter in splitter.segments() {
                // Collinear overlaps don't cut the line.
                if let Some(SegmentsIntersection::Point { loc1, .. }) =
                    utils::segments_intersection2d(&seg.a, &seg.b, &cutter.a, &cutter.b, eps)
                {
                    cuts.push(Cut {
                        segment: i,
                        loc: loc1,
                        point: seg.point_at(loc1),
                    });
                }
            }
        }

        let points = self.points();
        let first = points[0];
        let last = points[points.len() - 1];

        cuts.sort_by_key(|cut| (cut.segment, OrderedFloat(cut.loc)));
        cuts.retain(|cut| {
            na::distance(&cut.point, &first) > eps && na::distance(&cut.point, &last) > eps
        });
        cuts.dedup_by(|b, a| na::distance(&a.point, &b.point) <= eps);

        if cuts.is_empty() {
            return Ok((alloc::vec![self.clone()], Vec::new()));
        }

        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut current = alloc::vec![first];
        let mut pending = cuts.iter().peekable();

        for (i, seg) in self.segments().enumerate() {
            while let Some(cut) = pending.next_if(|cut| cut.segment == i) {
                push_distinct(&mut current, cut.point, eps);
                pieces.push(LineString::new(mem::take(&mut current)));
                current.push(cut.point);
            }

            push_distinct(&mut current, seg.b, eps);
        }

        pieces.push(LineString::new(current));
        pieces.retain(|piece| piece.num_distinct_points(eps) >= 2);

        let cut_points = cuts.iter().map(|cut| cut.point).collect();
        Ok((pieces, cut_points))
    }
}

fn push_distinct(points: &mut Vec<Point<Real>>, pt: Point<Real>, eps: Real) {
    if points
        .last()
        .is_none_or(|last| na::distance(last, &pt) > eps)
    {
        points.push(pt);
    }
}
