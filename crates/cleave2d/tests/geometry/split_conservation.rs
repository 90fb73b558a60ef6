use cleave2d::math::{Point, Real};
use cleave2d::query::{PlanarSplit, SplitPrimitive, SplitTolerances, Splitter};
use cleave2d::shape::{Geometry, LineString, Polygon};
use oorandom::Rand32;

fn random_convex_polygon(rng: &mut Rand32) -> Polygon {
    let n = rng.rand_range(3..12) as usize;
    let radius = 1.0 + rng.rand_float() as Real * 10.0;
    let rotation = rng.rand_float() as Real * core::f32::consts::TAU as Real;
    let center = Point::new(rng.rand_float() as Real * 5.0, rng.rand_float() as Real * 5.0);

    Polygon::new(
        (0..n)
            .map(|i| {
                let angle = rotation + i as Real * core::f32::consts::TAU as Real / n as Real;
                center + na_vector(angle.cos() * radius, angle.sin() * radius)
            })
            .collect(),
    )
}

fn na_vector(x: Real, y: Real) -> cleave2d::math::Vector<Real> {
    cleave2d::math::Vector::new(x, y)
}

fn random_line_through(rng: &mut Rand32, pt: Point<Real>) -> Splitter {
    let angle = rng.rand_float() as Real * core::f32::consts::PI as Real;
    let dir = na_vector(angle.cos(), angle.sin()) * 100.0;
    Splitter::new(vec![pt - dir, pt + dir]).unwrap()
}

#[test]
fn polygon_split_conserves_area() {
    let mut rng = Rand32::new(42);

    for _ in 0..200 {
        let poly = random_convex_polygon(&mut rng);
        let aabb = poly.local_aabb();
        let through = aabb.mins
            + aabb.extents().component_mul(&na_vector(
                0.25 + rng.rand_float() as Real * 0.5,
                0.25 + rng.rand_float() as Real * 0.5,
            ));
        let splitter = random_line_through(&mut rng, through);

        let (pieces, _) = poly.split(&splitter, &SplitTolerances::default()).unwrap();
        let total: Real = pieces.iter().map(|p| p.area()).sum();

        assert!(!pieces.is_empty());
        approx::assert_relative_eq!(total, poly.area(), max_relative = 1.0e-3);
        assert!(pieces.iter().all(|p| p.area() <= pieces[0].area() + 1.0e-3));
    }
}

#[test]
fn line_split_conserves_length() {
    let mut rng = Rand32::new(7);

    for _ in 0..200 {
        let n = rng.rand_range(2..10) as usize;
        let points: Vec<_> = (0..n)
            .map(|_| {
                Point::new(
                    rng.rand_float() as Real * 10.0,
                    rng.rand_float() as Real * 10.0,
                )
            })
            .collect();
        let line = LineString::new(points);
        let splitter = random_line_through(&mut rng, Point::new(5.0, 5.0));

        let (pieces, cuts) = line.split(&splitter, &SplitTolerances::default()).unwrap();
        let total: Real = pieces.iter().map(|p| p.length()).sum();

        approx::assert_relative_eq!(total, line.length(), max_relative = 1.0e-3);
        assert!(pieces.len() <= cuts.len() + 1);
    }
}

#[test]
fn multipart_split_conserves_area() {
    let squares: Vec<_> = (0..3)
        .map(|i| {
            let x = i as Real * 3.0;
            Polygon::new(vec![
                Point::new(x, 0.0),
                Point::new(x + 2.0, 0.0),
                Point::new(x + 2.0, 2.0),
                Point::new(x, 2.0),
            ])
        })
        .collect();
    let geometry = Geometry::multi_polygon(squares);
    let splitter = Splitter::new(vec![Point::new(-1.0, 0.5), Point::new(10.0, 0.5)]).unwrap();

    let out = PlanarSplit::default().split(&geometry, &splitter, false).unwrap();
    let total = out.remainder.area() + out.new_geometries.iter().map(Geometry::area).sum::<Real>();

    assert_eq!(out.new_geometries.len(), 3);
    approx::assert_relative_eq!(total, 12.0, epsilon = 1.0e-3);
    approx::assert_relative_eq!(out.remainder.area(), 9.0, epsilon = 1.0e-3);
}
