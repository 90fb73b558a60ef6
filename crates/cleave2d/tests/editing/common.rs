use cleave2d::editing::{Field, MemoryLayer, SplitProvenance};
use cleave2d::feature::AttributeValue;
use cleave2d::math::{Point, Real};
use cleave2d::shape::{Geometry, Polygon};
use chrono::{NaiveDate, NaiveDateTime};

pub fn date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(17, 5, 0)
        .unwrap()
}

pub fn square(x: Real, y: Real, size: Real) -> Polygon {
    Polygon::new(vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ])
}

pub fn square_geometry(x: Real, y: Real, size: Real) -> Geometry {
    Geometry::single(square(x, y, size))
}

/// A layer with a plain `name` field and a `predecessor` and `split_date` fields
/// filled from the split provenance.
pub fn parcels() -> MemoryLayer {
    MemoryLayer::new(vec![
        Field::new("name"),
        Field::with_default("predecessor", |_, provenance| {
            provenance
                .variable(SplitProvenance::PREDECESSORS)
                .unwrap_or_default()
        }),
        Field::with_default("split_date", |_, provenance| {
            provenance
                .variable(SplitProvenance::OPERATION_DATE)
                .unwrap_or_default()
        }),
    ])
}

pub fn attributes(name: &str) -> Vec<AttributeValue> {
    vec![name.into(), AttributeValue::Null, AttributeValue::Null]
}
