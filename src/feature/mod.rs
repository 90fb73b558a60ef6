//! Feature records: an identifier, an optional geometry, and attribute values.

pub use self::attribute_value::AttributeValue;
pub use self::feature::{Feature, FeatureId};

mod attribute_value;
mod feature;
