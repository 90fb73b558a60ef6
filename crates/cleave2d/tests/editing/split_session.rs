use cleave2d::editing::{FeatureStore, SessionError, SessionFlags, SplitSession, SPLIT_EDIT_COMMAND};
use cleave2d::feature::{AttributeValue, FeatureId};
use cleave2d::math::Point;
use cleave2d::partition::{PartDecision, ScriptedDecisions, SplitError};
use cleave2d::query::{PlanarSplit, Splitter};
use cleave2d::shape::Geometry;

use crate::common::*;

fn no_prompt() -> ScriptedDecisions {
    ScriptedDecisions::new([]).with_fallback(PartDecision::Cancel)
}

#[test]
fn split_square_with_provenance() {
    let mut layer = parcels();
    let id = layer
        .insert(Some(square_geometry(0.0, 0.0, 4.0)), attributes("lot 1"))
        .unwrap();
    let splitter = Splitter::new(vec![Point::new(1.0, -1.0), Point::new(1.0, 5.0)]).unwrap();

    let report = SplitSession::new(PlanarSplit::default(), date())
        .run(&mut layer, &splitter, &mut no_prompt())
        .unwrap();

    assert_eq!(report.split, vec![id]);
    assert_eq!(report.created, vec![FeatureId(2)]);
    assert!(report.deleted.is_empty());
    assert_eq!(layer.history(), &[SPLIT_EDIT_COMMAND.to_string()]);

    let original = layer.feature(id).unwrap();
    approx::assert_relative_eq!(original.geometry.as_ref().unwrap().area(), 12.0, epsilon = 1.0e-3);
    let refreshed = vec![
        AttributeValue::Text("lot 1".into()),
        AttributeValue::Text(id.to_string()),
        AttributeValue::DateTime(date()),
    ];
    assert_eq!(original.attributes, refreshed);

    let created = layer.feature(FeatureId(2)).unwrap();
    approx::assert_relative_eq!(created.geometry.as_ref().unwrap().area(), 4.0, epsilon = 1.0e-3);
    assert_eq!(created.attributes, refreshed);
}

#[test]
fn original_attributes_can_be_kept() {
    let mut layer = parcels();
    let id = layer
        .insert(Some(square_geometry(0.0, 0.0, 4.0)), attributes("lot 1"))
        .unwrap();
    let splitter = Splitter::new(vec![Point::new(1.0, -1.0), Point::new(1.0, 5.0)]).unwrap();

    let report = SplitSession::new(PlanarSplit::default(), date())
        .with_flags(SessionFlags::DELETE_EMPTY_ORIGINALS | SessionFlags::KEEP_ORIGINAL_ATTRIBUTES)
        .run(&mut layer, &splitter, &mut no_prompt())
        .unwrap();

    assert_eq!(layer.feature(id).unwrap().attributes, attributes("lot 1"));
    let created = layer.feature(report.created[0]).unwrap();
    assert_eq!(created.attributes[1], AttributeValue::Text(id.to_string()));
}

#[test]
fn only_selected_features_are_split() {
    let mut layer = parcels();
    let left = layer
        .insert(Some(square_geometry(0.0, 0.0, 2.0)), attributes("left"))
        .unwrap();
    let right = layer
        .insert(Some(square_geometry(2.0, 0.0, 2.0)), attributes("right"))
        .unwrap();
    layer.select_by_ids(&[left]);

    let splitter = Splitter::new(vec![Point::new(-1.0, 1.0), Point::new(5.0, 1.0)]).unwrap();
    let report = SplitSession::new(PlanarSplit::default(), date())
        .with_flags(SessionFlags::TOPOLOGICAL_EDITING | SessionFlags::DELETE_EMPTY_ORIGINALS)
        .run(&mut layer, &splitter, &mut no_prompt())
        .unwrap();

    assert_eq!(report.split, vec![left]);
    assert_eq!(report.created.len(), 1);
    // Only the neighbor lacked a vertex at one of the two cut points.
    assert_eq!(report.num_topological_vertices, 1);
    assert_eq!(layer.topological_points().len(), 2);
    assert_eq!(layer.selected_ids(), vec![left]);

    // The neighbor got a vertex where the cut meets the shared edge.
    let neighbor = layer.feature(right).unwrap().geometry.clone().unwrap();
    assert_eq!(neighbor.parts()[0].points().len(), 5);
    assert!(neighbor.parts()[0]
        .points()
        .contains(&Point::new(2.0, 1.0)));
    approx::assert_relative_eq!(neighbor.area(), 4.0, epsilon = 1.0e-3);
}

#[test]
fn topological_points_need_the_flag() {
    let mut layer = parcels();
    let _ = layer
        .insert(Some(square_geometry(0.0, 0.0, 2.0)), attributes("a"))
        .unwrap();
    let splitter = Splitter::new(vec![Point::new(-1.0, 1.0), Point::new(3.0, 1.0)]).unwrap();

    let report = SplitSession::new(PlanarSplit::default(), date())
        .run(&mut layer, &splitter, &mut no_prompt())
        .unwrap();

    assert_eq!(report.num_topological_vertices, 0);
    assert!(layer.topological_points().is_empty());
}

#[test]
fn failure_rolls_back_the_whole_batch() {
    let mut layer = parcels();
    let good = layer
        .insert(Some(square_geometry(0.0, 0.0, 2.0)), attributes("good"))
        .unwrap();
    // A flat ring: crossed by the splitter but impossible to split.
    let flat = layer
        .insert(
            Some(Geometry::polygon(vec![
                Point::new(3.0, 1.0),
                Point::new(5.0, 1.0),
                Point::new(4.0, 1.0),
            ])),
            attributes("flat"),
        )
        .unwrap();
    layer.select_by_ids(&[good, flat]);
    let before: Vec<_> = layer.features().cloned().collect();

    let splitter = Splitter::new(vec![
        Point::new(1.0, -1.0),
        Point::new(1.0, 3.0),
        Point::new(3.5, 3.0),
        Point::new(3.5, 0.0),
    ])
    .unwrap();
    let result = SplitSession::new(PlanarSplit::default(), date()).run(
        &mut layer,
        &splitter,
        &mut no_prompt(),
    );

    assert_eq!(result, Err(SessionError::Split(SplitError::SplitFailed(flat))));
    assert_eq!(layer.features().cloned().collect::<Vec<_>>(), before);
    assert!(!layer.is_editing());
    assert!(layer.history().is_empty());
    assert_eq!(layer.selected_ids(), vec![good, flat]);
}

#[test]
fn store_failure_rolls_back() {
    let mut layer = parcels();
    let _ = layer
        .insert(Some(square_geometry(0.0, 0.0, 2.0)), attributes("a"))
        .unwrap();
    layer.set_read_only(true);

    let splitter = Splitter::new(vec![Point::new(1.0, -1.0), Point::new(1.0, 3.0)]).unwrap();
    let result = SplitSession::new(PlanarSplit::default(), date()).run(
        &mut layer,
        &splitter,
        &mut no_prompt(),
    );

    assert!(matches!(result, Err(SessionError::Store(_))));
    assert!(!layer.is_editing());
    assert_eq!(layer.len(), 1);
}
