use alloc::vec::Vec;
use core::fmt;

use crate::feature::AttributeValue;
use crate::shape::Geometry;

/// The identifier of a feature within its store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FeatureId(pub i64);

impl FeatureId {
    /// The identifier of a feature not added to any store yet.
    pub const NULL: FeatureId = FeatureId(i64::MIN);

    /// Is this the [`FeatureId::NULL`] identifier?
    #[inline]
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for FeatureId {
    fn from(id: i64) -> Self {
        FeatureId(id)
    }
}

/// A feature: an identifier, an optional geometry, and one value per field of its store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Feature {
    /// The identifier of this feature.
    pub id: FeatureId,
    /// The geometry of this feature.
    pub geometry: Option<Geometry>,
    /// The attribute values, in field order.
    pub attributes: Vec<AttributeValue>,
}

impl Feature {
    /// Creates a feature.
    pub fn new(id: FeatureId, geometry: Option<Geometry>, attributes: Vec<AttributeValue>) -> Self {
        Self {
            id,
            geometry,
            attributes,
        }
    }

    /// The value of the `i`-th attribute, if there is one.
    #[inline]
    pub fn attribute(&self, i: usize) -> Option<&AttributeValue> {
        self.attributes.get(i)
    }

    /// Does this feature have a non-empty geometry?
    #[inline]
    pub fn has_geometry(&self) -> bool {
        self.geometry.as_ref().is_some_and(|g| !g.is_empty())
    }
}
