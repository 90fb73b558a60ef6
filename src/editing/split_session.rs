use alloc::vec::Vec;

use chrono::NaiveDateTime;

use crate::editing::{FeatureStore, SplitProvenance, StoreError};
use crate::feature::{Feature, FeatureId};
use crate::math::{Point, Real};
use crate::partition::{
    FeatureSplitRequest, PartDecisionSource, PartitionOptions, RejectAllScope, SplitError,
    SplitPartitioner, Splittable,
};
use crate::query::{SplitPrimitive, Splitter};
use crate::shape::Geometry;

/// The text of the edit command wrapping a split.
pub const SPLIT_EDIT_COMMAND: &str = "Features split";

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
/// Controls how a [`SplitSession`] writes its results.
pub struct SessionFlags(u8);

bitflags::bitflags! {
    impl SessionFlags: u8 {
        /// If set, the split primitive computes topology test points and they are
        /// registered in the store as topological points.
        const TOPOLOGICAL_EDITING = 1;
        /// If set, a feature left without geometry by the split is deleted. Otherwise
        /// it is kept with an empty geometry.
        const DELETE_EMPTY_ORIGINALS = 1 << 1;
        /// If set, a split feature keeps its stored attributes. Otherwise its
        /// default-value rules are evaluated again, like those of the new features.
        const KEEP_ORIGINAL_ATTRIBUTES = 1 << 2;
    }
}

impl Default for SessionFlags {
    fn default() -> Self {
        SessionFlags::DELETE_EMPTY_ORIGINALS
    }
}

/// Errors reported by a [`SplitSession`].
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The partition of one of the features failed or was cancelled.
    #[error(transparent)]
    Split(#[from] SplitError),
    /// The store refused to apply the result.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a [`SplitSession`] changed in the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// The features that were split, in processing order.
    pub split: Vec<FeatureId>,
    /// The features deleted because they were left without geometry.
    pub deleted: Vec<FeatureId>,
    /// The features created.
    pub created: Vec<FeatureId>,
    /// The number of vertices the store inserted while registering topological points.
    pub num_topological_vertices: usize,
}

impl SplitReport {
    /// Did the session leave the store unchanged?
    pub fn is_empty(&self) -> bool {
        self.split.is_empty() && self.created.is_empty()
    }
}

struct PendingEdits {
    updated: Vec<(Feature, Option<Geometry>)>,
    new_features: Vec<Feature>,
    topology_test_points: Vec<Point<Real>>,
}

/// Splits every feature of a store crossed by a splitter, within one edit command.
///
/// The candidates are the selected features crossed by the splitter or, if nothing
/// is selected, every feature crossed by it. If the partition of any candidate
/// fails or is cancelled, the edit command is destroyed and the store is left
/// unchanged. The selection is restored in every case.
#[derive(Clone, Debug)]
pub struct SplitSession<P> {
    primitive: P,
    options: PartitionOptions,
    flags: SessionFlags,
    operation_date: NaiveDateTime,
}

impl<P> SplitSession<P> {
    /// A session whose new features are dated `operation_date`.
    pub fn new(primitive: P, operation_date: NaiveDateTime) -> Self {
        Self {
            primitive,
            options: PartitionOptions::default(),
            flags: SessionFlags::default(),
            operation_date,
        }
    }

    /// A session dated with the current local time.
    #[cfg(feature = "std")]
    pub fn now(primitive: P) -> Self {
        Self::new(primitive, chrono::Local::now().naive_local())
    }

    /// Sets the flags of this session.
    pub fn with_flags(mut self, flags: SessionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets what a `RejectAll` decision leaves unsplit.
    pub fn with_reject_all(mut self, scope: RejectAllScope) -> Self {
        self.options.reject_all = scope;
        self
    }

    /// Bounds the number of passes over the candidates of one sub-part.
    pub fn with_max_prompt_cycles(mut self, max_prompt_cycles: Option<usize>) -> Self {
        self.options.max_prompt_cycles = max_prompt_cycles;
        self
    }

    /// The flags of this session.
    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// The date given to the provenance of every new feature.
    pub fn operation_date(&self) -> NaiveDateTime {
        self.operation_date
    }

    /// Splits the features of `store` crossed by `splitter`.
    pub fn run<S, D>(
        &self,
        store: &mut S,
        splitter: &Splitter,
        decide: &mut D,
    ) -> Result<SplitReport, SessionError>
    where
        P: SplitPrimitive<Geometry>,
        S: FeatureStore + ?Sized,
        D: PartDecisionSource<Geometry> + ?Sized,
    {
        let selection = store.selected_ids();
        store.remove_selection();

        let result = self.split_candidates(store, splitter, &selection, decide);

        store.select_by_ids(&selection);
        result
    }

    fn split_candidates<S, D>(
        &self,
        store: &mut S,
        splitter: &Splitter,
        selection: &[FeatureId],
        decide: &mut D,
    ) -> Result<SplitReport, SessionError>
    where
        P: SplitPrimitive<Geometry>,
        S: FeatureStore + ?Sized,
        D: PartDecisionSource<Geometry> + ?Sized,
    {
        let candidates: Vec<Feature> = store
            .features_in_aabb(splitter.local_aabb())
            .into_iter()
            .filter(|f| selection.is_empty() || selection.contains(&f.id))
            .filter(|f| {
                f.geometry
                    .as_ref()
                    .is_some_and(|g| g.intersects_splitter(splitter))
            })
            .collect();

        if candidates.is_empty() {
            log::debug!("No feature crossed by the splitter.");
            return Ok(SplitReport::default());
        }

        store.begin_edit_command(SPLIT_EDIT_COMMAND)?;

        let pending = match self.partition_all(&*store, splitter, candidates, decide) {
            Ok(pending) => pending,
            Err(err) => {
                rollback(store);
                return Err(err.into());
            }
        };

        if pending.new_features.is_empty() {
            store.destroy_edit_command()?;
            return Ok(SplitReport::default());
        }

        match self.write(store, pending) {
            Ok(report) => {
                store.end_edit_command()?;
                Ok(report)
            }
            Err(err) => {
                rollback(store);
                Err(err.into())
            }
        }
    }

    fn partition_all<S, D>(
        &self,
        store: &S,
        splitter: &Splitter,
        candidates: Vec<Feature>,
        decide: &mut D,
    ) -> Result<PendingEdits, SplitError>
    where
        P: SplitPrimitive<Geometry>,
        S: FeatureStore + ?Sized,
        D: PartDecisionSource<Geometry> + ?Sized,
    {
        let options = PartitionOptions {
            topological_editing: self.flags.contains(SessionFlags::TOPOLOGICAL_EDITING),
            ..self.options
        };
        let partitioner = SplitPartitioner::with_options(&self.primitive, options);

        let mut pending = PendingEdits {
            updated: Vec::new(),
            new_features: Vec::new(),
            topology_test_points: Vec::new(),
        };

        for feature in candidates {
            let Some(geometry) = feature.geometry.clone() else {
                continue;
            };

            let outcome =
                partitioner.partition(FeatureSplitRequest::new(feature.id, geometry), splitter, decide)?;

            if !outcome.is_split() {
                continue;
            }

            let provenance = SplitProvenance::new(feature.id, self.operation_date);
            let refreshed = refresh_attributes(store, &feature, &provenance);

            for geometry in outcome.new_geometries {
                pending.new_features.push(Feature::new(
                    FeatureId::NULL,
                    Some(geometry),
                    refreshed.attributes.clone(),
                ));
            }

            pending
                .topology_test_points
                .extend(outcome.topology_test_points);

            if self.flags.contains(SessionFlags::KEEP_ORIGINAL_ATTRIBUTES) {
                pending.updated.push((feature, outcome.kept));
            } else {
                pending.updated.push((refreshed, outcome.kept));
            }
        }

        Ok(pending)
    }

    fn write<S>(&self, store: &mut S, pending: PendingEdits) -> Result<SplitReport, StoreError>
    where
        S: FeatureStore + ?Sized,
    {
        let mut report = SplitReport::default();

        for (mut feature, kept) in pending.updated {
            report.split.push(feature.id);

            if kept.is_none() && self.flags.contains(SessionFlags::DELETE_EMPTY_ORIGINALS) {
                store.delete_feature(feature.id)?;
                report.deleted.push(feature.id);
            } else {
                feature.geometry = kept;
                store.update_feature(feature)?;
            }
        }

        report.created = store.add_features(pending.new_features)?;

        if self.flags.contains(SessionFlags::TOPOLOGICAL_EDITING) {
            report.num_topological_vertices = pending
                .topology_test_points
                .iter()
                .map(|pt| store.add_topological_point(pt))
                .sum();
        }

        log::debug!(
            "Split {} features into {} new features.",
            report.split.len(),
            report.created.len()
        );

        Ok(report)
    }
}

/// A copy of `original` where every attribute with a default-value rule is
/// recomputed. Fields are evaluated in order, each rule seeing the values already
/// recomputed for the previous fields.
fn refresh_attributes<S: FeatureStore + ?Sized>(
    store: &S,
    original: &Feature,
    provenance: &SplitProvenance,
) -> Feature {
    let mut refreshed = original.clone();

    for field in 0..refreshed.attributes.len() {
        if store.has_default_value(field) {
            refreshed.attributes[field] = store.default_value(field, &refreshed, provenance);
        }
    }

    refreshed
}

fn rollback<S: FeatureStore + ?Sized>(store: &mut S) {
    if let Err(err) = store.destroy_edit_command() {
        log::warn!("Failed to destroy the split edit command: {err}");
    }
}
