//! Partition of a feature's geometry between the geometry kept by the feature and
//! the geometries of new features, along a splitter.
//!
//! The entry points are [`partition`] and [`SplitPartitioner::partition`]. Both only
//! need the geometry to implement [`Splittable`]; the geometric cut itself is
//! delegated to a [`SplitPrimitive`](crate::query::SplitPrimitive).

pub use self::decision::{PartCandidate, PartDecision, PartDecisionSource, ScriptedDecisions};
pub use self::partitioner::{
    partition, FeatureSplitRequest, PartitionOptions, RejectAllScope, SplitError, SplitOutcome,
    SplitPartitioner,
};
pub use self::splittable::Splittable;

mod decision;
mod partitioner;
mod splittable;
