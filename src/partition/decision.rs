use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::feature::FeatureId;

/// The answer to the presentation of one candidate part.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PartDecision {
    /// The presented candidate becomes the new part.
    Accept,
    /// Not this candidate: present the next one.
    Skip,
    /// Do not split this sub-part.
    RejectAll,
    /// Abort the whole split operation.
    Cancel,
}

/// A candidate new part presented to a [`PartDecisionSource`].
#[derive(Copy, Clone, Debug)]
pub struct PartCandidate<'a, G> {
    /// The feature being split.
    pub feature: FeatureId,
    /// The index of the sub-part being split, among the sub-parts crossed by the splitter.
    pub sub_part: usize,
    /// The index of this candidate, in presentation order.
    pub index: usize,
    /// The number of candidates for this sub-part.
    pub count: usize,
    /// The candidate geometry.
    pub geometry: &'a G,
}

/// Chooses which piece of an ambiguous multipart split becomes the new part.
///
/// This is typically backed by an interactive dialog. It is only consulted for
/// multipart features, when the split of one sub-part yields more than one
/// candidate.
pub trait PartDecisionSource<G> {
    /// Decides what to do with the presented candidate.
    fn present(&mut self, candidate: &PartCandidate<G>) -> PartDecision;
}

impl<G, F> PartDecisionSource<G> for F
where
    F: FnMut(&PartCandidate<G>) -> PartDecision,
{
    fn present(&mut self, candidate: &PartCandidate<G>) -> PartDecision {
        self(candidate)
    }
}

/// A decision source replaying a fixed sequence of decisions.
///
/// Once the script is exhausted, every presentation is answered with the
/// fallback decision. Every presentation is recorded as
/// `(feature, sub_part, index)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDecisions {
    script: VecDeque<PartDecision>,
    fallback: PartDecision,
    presented: Vec<(FeatureId, usize, usize)>,
}

impl ScriptedDecisions {
    /// A source answering with `script`, then with [`PartDecision::RejectAll`].
    pub fn new(script: impl IntoIterator<Item = PartDecision>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: PartDecision::RejectAll,
            presented: Vec::new(),
        }
    }

    /// Sets the decision used once the script is exhausted.
    pub fn with_fallback(mut self, fallback: PartDecision) -> Self {
        self.fallback = fallback;
        self
    }

    /// The presentations received so far.
    pub fn presented(&self) -> &[(FeatureId, usize, usize)] {
        &self.presented
    }

    /// The number of decisions of the script not consumed yet.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl<G> PartDecisionSource<G> for ScriptedDecisions {
    fn present(&mut self, candidate: &PartCandidate<G>) -> PartDecision {
        self.presented
            .push((candidate.feature, candidate.sub_part, candidate.index));
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
