use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::NaiveDateTime;

use crate::bounding_volume::Aabb;
use crate::feature::{AttributeValue, Feature, FeatureId};
use crate::math::{Point, Real};

/// Errors reported by a [`FeatureStore`].
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No feature with this identifier exists.
    #[error("no feature with id {0}")]
    UnknownFeature(FeatureId),
    /// A feature does not have one attribute per field.
    #[error("the feature has {found} attributes but the store has {expected} fields")]
    AttributeCountMismatch {
        /// The number of fields of the store.
        expected: usize,
        /// The number of attributes of the feature.
        found: usize,
    },
    /// Ending or destroying an edit command while none is in progress.
    #[error("no edit command in progress")]
    NoEditCommand,
    /// Beginning an edit command while another one is in progress.
    #[error("an edit command is already in progress")]
    EditCommandInProgress,
    /// The store refused the modification.
    #[error("the store rejected the modification: {0}")]
    Rejected(String),
}

/// The variables describing a split, available to default-value rules while the
/// new features of a split are built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SplitProvenance {
    /// The kind of editing operation. Always [`SplitProvenance::SPLIT_OPERATION`].
    pub operation: i64,
    /// The feature the new features are split from.
    pub predecessor: FeatureId,
    /// The time of the split operation, shared by every feature of a batch.
    pub operation_date: NaiveDateTime,
}

impl SplitProvenance {
    /// The operation code of a split.
    pub const SPLIT_OPERATION: i64 = 1;
    /// Name of the variable holding [`SplitProvenance::operation`].
    pub const OPERATION: &'static str = "sm_operation";
    /// Name of the variable holding [`SplitProvenance::predecessor`], as text.
    pub const PREDECESSORS: &'static str = "sm_predecessors";
    /// Name of the variable holding [`SplitProvenance::operation_date`].
    pub const OPERATION_DATE: &'static str = "sm_operation_date";

    /// The provenance of features split from `predecessor` at `operation_date`.
    pub fn new(predecessor: FeatureId, operation_date: NaiveDateTime) -> Self {
        Self {
            operation: Self::SPLIT_OPERATION,
            predecessor,
            operation_date,
        }
    }

    /// The value of the variable named `name`, if it is one of the provenance variables.
    pub fn variable(&self, name: &str) -> Option<AttributeValue> {
        match name {
            Self::OPERATION => Some(AttributeValue::Int(self.operation)),
            Self::PREDECESSORS => Some(AttributeValue::Text(self.predecessor.to_string())),
            Self::OPERATION_DATE => Some(AttributeValue::DateTime(self.operation_date)),
            _ => None,
        }
    }
}

/// A layer of features editable through undoable edit commands.
///
/// Features added with [`FeatureStore::add_features`] get their identifier from
/// the store; the identifier they are given is ignored.
pub trait FeatureStore {
    /// The identifiers of the selected features.
    fn selected_ids(&self) -> Vec<FeatureId>;
    /// Replaces the selection.
    fn select_by_ids(&mut self, ids: &[FeatureId]);
    /// Clears the selection.
    fn remove_selection(&mut self);
    /// The features with a geometry whose AABB intersects `aabb`.
    fn features_in_aabb(&self, aabb: &Aabb) -> Vec<Feature>;

    /// Starts recording modifications in one undoable command.
    fn begin_edit_command(&mut self, text: &str) -> Result<(), StoreError>;
    /// Commits the current edit command.
    fn end_edit_command(&mut self) -> Result<(), StoreError>;
    /// Reverts every modification of the current edit command.
    fn destroy_edit_command(&mut self) -> Result<(), StoreError>;

    /// Replaces the geometry and attributes of an existing feature.
    fn update_feature(&mut self, feature: Feature) -> Result<(), StoreError>;
    /// Deletes a feature.
    fn delete_feature(&mut self, id: FeatureId) -> Result<(), StoreError>;
    /// Adds features, all or none. Returns their new identifiers, in order.
    fn add_features(&mut self, features: Vec<Feature>) -> Result<Vec<FeatureId>, StoreError>;
    /// Inserts `point` as a vertex of every feature boundary passing through it.
    ///
    /// Returns the number of vertices inserted.
    fn add_topological_point(&mut self, point: &Point<Real>) -> usize;

    /// The number of fields, i.e., of attributes of each feature.
    fn num_fields(&self) -> usize;
    /// Does the `field`-th field have a default-value rule?
    fn has_default_value(&self, field: usize) -> bool;
    /// Evaluates the default-value rule of the `field`-th field.
    fn default_value(
        &self,
        field: usize,
        feature: &Feature,
        provenance: &SplitProvenance,
    ) -> AttributeValue;
}
