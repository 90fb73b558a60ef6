//! Splitting of a whole batch of features stored in a [`FeatureStore`].
//!
//! A [`SplitSession`] looks up the features crossed by a splitter, partitions each
//! of them, and writes the result back to the store within a single edit command:
//! kept geometries are written to the original features, new features are created
//! with their attribute defaults evaluated against a [`SplitProvenance`], and the
//! topology test points are registered.

pub use self::feature_store::{FeatureStore, SplitProvenance, StoreError};
pub use self::memory_layer::{DefaultValueFn, Field, MemoryLayer};
pub use self::split_session::{
    SessionError, SessionFlags, SplitReport, SplitSession, SPLIT_EDIT_COMMAND,
};

mod feature_store;
mod memory_layer;
mod split_session;
