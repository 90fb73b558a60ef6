use cleave2d::editing::{FeatureStore, SessionError, SessionFlags, SplitSession};
use cleave2d::math::Point;
use cleave2d::partition::{PartDecision, RejectAllScope, ScriptedDecisions, SplitError};
use cleave2d::query::{
    PlanarSplit, SplitOutput, SplitPrimitive, SplitPrimitiveError, Splitter,
};
use cleave2d::shape::Geometry;

use crate::common::*;

fn two_squares() -> Geometry {
    Geometry::multi_polygon(vec![square(0.0, 0.0, 2.0), square(4.0, 0.0, 2.0)])
}

fn horizontal_cut() -> Splitter {
    Splitter::new(vec![Point::new(-1.0, 0.5), Point::new(7.0, 0.5)]).unwrap()
}

/// Sends every part to a new geometry and leaves an empty remainder.
struct Explode;

impl SplitPrimitive<Geometry> for Explode {
    fn split(
        &self,
        geometry: &Geometry,
        _: &Splitter,
        _: bool,
    ) -> Result<SplitOutput<Geometry>, SplitPrimitiveError> {
        Ok(SplitOutput {
            remainder: Geometry::from_parts(vec![], geometry.is_multipart()),
            new_geometries: geometry.to_single_parts(),
            topology_test_points: vec![],
        })
    }
}

#[test]
fn accepted_parts_become_features() {
    let mut layer = parcels();
    let id = layer.insert(Some(two_squares()), attributes("farm")).unwrap();

    // First sub-part: take the strip cut off. Second sub-part: skip the strip, take the rest.
    let mut decide = ScriptedDecisions::new([
        PartDecision::Accept,
        PartDecision::Skip,
        PartDecision::Accept,
    ]);
    let report = SplitSession::new(PlanarSplit::default(), date())
        .run(&mut layer, &horizontal_cut(), &mut decide)
        .unwrap();

    assert_eq!(decide.presented().len(), 3);
    assert_eq!(report.created.len(), 2);

    let kept = layer.feature(id).unwrap().geometry.clone().unwrap();
    assert!(kept.is_multipart());
    assert_eq!(kept.num_parts(), 2);
    approx::assert_relative_eq!(kept.area(), 3.0 + 1.0, epsilon = 1.0e-3);

    let created_area: f32 = report
        .created
        .iter()
        .map(|id| layer.feature(*id).unwrap().geometry.as_ref().unwrap().area())
        .sum();
    approx::assert_relative_eq!(created_area, 1.0 + 3.0, epsilon = 1.0e-3);
}

#[test]
fn reject_all_leaves_the_feature_untouched() {
    let mut layer = parcels();
    let id = layer.insert(Some(two_squares()), attributes("farm")).unwrap();
    let before = layer.feature(id).cloned();

    let mut decide = ScriptedDecisions::new([PartDecision::RejectAll]);
    let report = SplitSession::new(PlanarSplit::default(), date())
        .run(&mut layer, &horizontal_cut(), &mut decide)
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(decide.presented().len(), 1);
    assert_eq!(layer.feature(id).cloned(), before);
    assert!(layer.history().is_empty());
}

#[test]
fn reject_all_on_one_sub_part_only() {
    let mut layer = parcels();
    let _ = layer.insert(Some(two_squares()), attributes("farm")).unwrap();

    let mut decide = ScriptedDecisions::new([PartDecision::RejectAll, PartDecision::Accept]);
    let report = SplitSession::new(PlanarSplit::default(), date())
        .with_reject_all(RejectAllScope::SubPart)
        .run(&mut layer, &horizontal_cut(), &mut decide)
        .unwrap();

    assert_eq!(decide.presented().len(), 2);
    assert_eq!(report.created.len(), 1);
}

#[test]
fn cancel_aborts_everything() {
    let mut layer = parcels();
    let first = layer.insert(Some(two_squares()), attributes("a")).unwrap();
    let before: Vec<_> = layer.features().cloned().collect();
    layer.select_by_ids(&[first]);

    let mut decide = ScriptedDecisions::new([PartDecision::Skip, PartDecision::Cancel]);
    let result = SplitSession::new(PlanarSplit::default(), date()).run(
        &mut layer,
        &horizontal_cut(),
        &mut decide,
    );

    assert_eq!(result, Err(SessionError::Split(SplitError::Cancelled)));
    assert_eq!(layer.features().cloned().collect::<Vec<_>>(), before);
    assert_eq!(layer.selected_ids(), vec![first]);
    assert!(!layer.is_editing());
}

#[test]
fn emptied_original_is_deleted() {
    let mut layer = parcels();
    let id = layer.insert(Some(two_squares()), attributes("farm")).unwrap();

    let report = SplitSession::new(Explode, date())
        .run(&mut layer, &horizontal_cut(), &mut ScriptedDecisions::new([]))
        .unwrap();

    assert_eq!(report.deleted, vec![id]);
    assert_eq!(report.created.len(), 2);
    assert!(layer.feature(id).is_none());
    assert_eq!(layer.len(), 2);
}

#[test]
fn emptied_original_can_be_kept() {
    let mut layer = parcels();
    let id = layer.insert(Some(two_squares()), attributes("farm")).unwrap();

    let report = SplitSession::new(Explode, date())
        .with_flags(SessionFlags::empty())
        .run(&mut layer, &horizontal_cut(), &mut ScriptedDecisions::new([]))
        .unwrap();

    assert!(report.deleted.is_empty());
    assert_eq!(layer.feature(id).unwrap().geometry, None);
    assert_eq!(layer.len(), 3);
}
