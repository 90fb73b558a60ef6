use cleave2d::math::{Point, Vector};
use cleave2d::query::{InvalidSplitter, PlanarSplit, SplitPrimitive, Splitter};
use cleave2d::shape::Geometry;

#[test]
fn splitter_digitized_in_another_frame() {
    let drawn = Geometry::line_string(vec![Point::new(-9.0, -1.0), Point::new(-9.0, 3.0)]);
    // Bring the drawing from the project frame to the layer frame.
    let splitter = Splitter::from_geometry(&drawn)
        .unwrap()
        .transformed(|pt| pt + Vector::new(10.0, 0.0))
        .unwrap();

    let square = Geometry::polygon(vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
    ]);
    let out = PlanarSplit::default().split(&square, &splitter, false).unwrap();
    assert_eq!(out.new_geometries.len(), 1);
}

#[test]
fn collapsed_drawing_is_rejected() {
    let drawn = Geometry::line_string(vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0)]);
    assert_eq!(
        Splitter::from_geometry(&drawn),
        Err(InvalidSplitter::TooFewPoints(1))
    );
}
