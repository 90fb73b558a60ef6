use alloc::vec::Vec;

use crate::feature::FeatureId;
use crate::math::{Point, Real};
use crate::partition::{PartCandidate, PartDecision, PartDecisionSource, Splittable};
use crate::query::{SplitPrimitive, Splitter};

/// A feature to split: its identifier and its geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FeatureSplitRequest<G> {
    /// The identifier of the feature.
    pub id: FeatureId,
    /// The geometry of the feature.
    pub geometry: G,
}

impl<G> FeatureSplitRequest<G> {
    /// Creates a split request.
    pub fn new(id: FeatureId, geometry: G) -> Self {
        Self { id, geometry }
    }
}

/// How the geometry of one feature is redistributed by a split.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SplitOutcome<G> {
    /// The identifier of the split feature.
    pub id: FeatureId,
    /// The geometry left to the original feature.
    ///
    /// `None` if every piece went to new geometries.
    pub kept: Option<G>,
    /// The geometries of the features to create, in decision order.
    pub new_geometries: Vec<G>,
    /// The topology test points of the applied splits.
    pub topology_test_points: Vec<Point<Real>>,
}

impl<G> SplitOutcome<G> {
    /// Was anything cut off the feature?
    pub fn is_split(&self) -> bool {
        !self.new_geometries.is_empty()
    }
}

/// What a [`PartDecision::RejectAll`] leaves unsplit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum RejectAllScope {
    /// The current sub-part and every sub-part not processed yet.
    #[default]
    Feature,
    /// Only the current sub-part. Later sub-parts are still split.
    SubPart,
}

/// Options of a [`SplitPartitioner`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PartitionOptions {
    /// Requests topology test points from the split primitive.
    pub topological_editing: bool,
    /// What a `RejectAll` decision leaves unsplit.
    pub reject_all: RejectAllScope,
    /// Number of complete passes over the candidates of a sub-part after which
    /// a decision source answering only `Skip` is treated as `RejectAll`.
    ///
    /// With `None`, candidates are presented until a decision other than `Skip`
    /// is made. A value of zero behaves like `Some(1)`.
    pub max_prompt_cycles: Option<usize>,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            topological_editing: false,
            reject_all: RejectAllScope::Feature,
            max_prompt_cycles: None,
        }
    }
}

/// Errors reported by the [`SplitPartitioner`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SplitError {
    /// The split primitive failed on one sub-part of the feature.
    #[error("an error occurred while splitting feature {0}")]
    SplitFailed(FeatureId),
    /// The decision source cancelled the operation.
    #[error("the split operation was cancelled")]
    Cancelled,
}

enum Choice {
    Take(usize),
    RejectAll,
}

/// Splits features one at a time and redistributes their pieces.
///
/// Single-part features are split without any decision: the remainder computed by
/// the primitive is kept and every other piece becomes a new geometry.
///
/// For multipart features, each sub-part crossed by the splitter is split on its
/// own. When this yields several candidates (the new pieces followed by the
/// remainder), they are presented in turn to a [`PartDecisionSource`] until one is
/// accepted: it becomes the single new geometry of that sub-part and the other
/// candidates go back to the kept geometry.
#[derive(Clone, Debug, Default)]
pub struct SplitPartitioner<P> {
    primitive: P,
    options: PartitionOptions,
}

impl<P> SplitPartitioner<P> {
    /// A partitioner with default options.
    pub fn new(primitive: P) -> Self {
        Self::with_options(primitive, PartitionOptions::default())
    }

    /// A partitioner with the given options.
    pub fn with_options(primitive: P, options: PartitionOptions) -> Self {
        Self { primitive, options }
    }

    /// The split primitive of this partitioner.
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    /// The options of this partitioner.
    pub fn options(&self) -> &PartitionOptions {
        &self.options
    }

    /// Mutable reference to the options of this partitioner.
    pub fn options_mut(&mut self) -> &mut PartitionOptions {
        &mut self.options
    }

    /// Splits the feature of `request` along `splitter`.
    ///
    /// Nothing is returned for the feature on error: the caller must discard any
    /// work done for it.
    pub fn partition<G, D>(
        &self,
        request: FeatureSplitRequest<G>,
        splitter: &Splitter,
        decide: &mut D,
    ) -> Result<SplitOutcome<G>, SplitError>
    where
        G: Splittable,
        P: SplitPrimitive<G>,
        D: PartDecisionSource<G> + ?Sized,
    {
        let FeatureSplitRequest { id, geometry } = request;
        let was_multipart = geometry.is_multipart() && geometry.num_parts() > 1;

        let mut kept = None;
        let mut to_split = Vec::new();

        if was_multipart {
            for part in geometry.parts() {
                if part.intersects_splitter(splitter) {
                    to_split.push(part);
                } else {
                    fold(&mut kept, part);
                }
            }
        } else {
            to_split.push(geometry);
        }

        let mut new_geometries = Vec::new();
        let mut topology_test_points = Vec::new();
        let mut sub_parts = to_split.into_iter().enumerate();

        while let Some((sub_part, g)) = sub_parts.next() {
            let output = self
                .primitive
                .split(&g, splitter, self.options.topological_editing)
                .map_err(|err| {
                    log::warn!("Failed to split feature {id}: {err}");
                    SplitError::SplitFailed(id)
                })?;

            if !output.is_split() {
                fold(&mut kept, g);
                continue;
            }

            if !was_multipart {
                if !output.remainder.is_empty() {
                    fold(&mut kept, output.remainder);
                }
                new_geometries.extend(output.new_geometries);
                topology_test_points.extend(output.topology_test_points);
                continue;
            }

            let mut candidates = output.new_geometries;
            if !output.remainder.is_empty() {
                candidates.push(output.remainder);
            }

            match self.choose(id, sub_part, &candidates, decide)? {
                Choice::Take(i) => {
                    let chosen = candidates.remove(i);
                    for other in candidates {
                        fold(&mut kept, other);
                    }
                    new_geometries.push(chosen);
                    topology_test_points.extend(output.topology_test_points);
                }
                Choice::RejectAll => {
                    fold(&mut kept, g);

                    if self.options.reject_all == RejectAllScope::Feature {
                        for (_, rest) in sub_parts.by_ref() {
                            fold(&mut kept, rest);
                        }
                    }
                }
            }
        }

        Ok(SplitOutcome {
            id,
            kept,
            new_geometries,
            topology_test_points,
        })
    }

    fn choose<G, D>(
        &self,
        feature: FeatureId,
        sub_part: usize,
        candidates: &[G],
        decide: &mut D,
    ) -> Result<Choice, SplitError>
    where
        D: PartDecisionSource<G> + ?Sized,
    {
        let count = candidates.len();

        if count == 1 {
            return Ok(Choice::Take(0));
        }

        let mut cycles = 0;

        loop {
            for (index, geometry) in candidates.iter().enumerate() {
                let candidate = PartCandidate {
                    feature,
                    sub_part,
                    index,
                    count,
                    geometry,
                };

                match decide.present(&candidate) {
                    PartDecision::Accept => return Ok(Choice::Take(index)),
                    PartDecision::Skip => {}
                    PartDecision::RejectAll => return Ok(Choice::RejectAll),
                    PartDecision::Cancel => return Err(SplitError::Cancelled),
                }
            }

            cycles += 1;

            if self
                .options
                .max_prompt_cycles
                .is_some_and(|max| cycles >= max)
            {
                log::debug!(
                    "No candidate accepted for sub-part {sub_part} of feature {feature} after {cycles} cycles."
                );
                return Ok(Choice::RejectAll);
            }
        }
    }
}

/// Splits the feature of `request` along `splitter` with default options.
///
/// See [`SplitPartitioner`] for details.
pub fn partition<G, P, D>(
    request: FeatureSplitRequest<G>,
    splitter: &Splitter,
    primitive: &P,
    decide: &mut D,
) -> Result<SplitOutcome<G>, SplitError>
where
    G: Splittable,
    P: SplitPrimitive<G> + ?Sized,
    D: PartDecisionSource<G> + ?Sized,
{
    SplitPartitioner::new(primitive).partition(request, splitter, decide)
}

fn fold<G: Splittable>(kept: &mut Option<G>, g: G) {
    *kept = Some(match kept.take() {
        Some(kept) => kept.combine(g),
        None => g,
    });
}
