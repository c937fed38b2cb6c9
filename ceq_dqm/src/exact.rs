//! Deterministic sampler that scores every candidate assignment.
//!
//! Stands in for a hosted optimization service on models small enough to
//! enumerate, which is what tests and the bundled fixtures need.

use itertools::Itertools;
use tracing::debug;

use crate::model::{CaseId, DiscreteQuadraticModel};
use crate::sample::{Sample, SampleSet};
use crate::sampler::{Sampler, SamplerError};

/// How [`ExactSampler`] enumerates candidate assignments.
///
/// - `Exhaustive`:
///     Every combination of cases, i.e. the full assignment space. Complete
///     for any model, but its size is the product of all case counts, so it
///     is guarded by [`ExactSampler::SEARCH_BOUND`].
/// - `Bijections`:
///     Only assignments in which all variables take pairwise-distinct cases.
///     Requires every variable to range over exactly as many cases as there
///     are variables. Sound whenever every ground state of the model is a
///     bijection, as in assignment-style encodings where non-injective
///     choices always pay a positive penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchSpace {
    /// Enumerate the full case product.
    Exhaustive,
    /// Enumerate permutations of case indices only.
    Bijections,
}

/// Sampler that evaluates every candidate assignment of a model.
#[derive(Clone, Debug)]
pub struct ExactSampler {
    space: SearchSpace,
    max_samples: usize,
}

impl ExactSampler {
    /// Largest assignment space `Exhaustive` mode will sweep.
    pub const SEARCH_BOUND: u128 = 1 << 24;

    /// Samples retained beyond the minimum-energy ties.
    pub const DEFAULT_MAX_SAMPLES: usize = 32;

    /// Create a sampler with the given search space and retention cap.
    #[contracts::debug_requires(max_samples > 0)]
    pub fn new(space: SearchSpace, max_samples: usize) -> Self {
        ExactSampler { space, max_samples }
    }

    /// Convenience: full-product enumeration with the default cap.
    pub fn exhaustive() -> Self {
        Self::new(SearchSpace::Exhaustive, Self::DEFAULT_MAX_SAMPLES)
    }

    /// Convenience: permutation enumeration with the default cap.
    pub fn bijections() -> Self {
        Self::new(SearchSpace::Bijections, Self::DEFAULT_MAX_SAMPLES)
    }

    fn sample_exhaustive(
        &self,
        model: &DiscreteQuadraticModel,
    ) -> Result<SampleSet, SamplerError> {
        let counts: Vec<usize> = model.case_counts().collect();
        let assignments = counts
            .iter()
            .try_fold(1u128, |acc, &c| acc.checked_mul(c as u128))
            .filter(|&total| total <= Self::SEARCH_BOUND)
            .ok_or_else(|| SamplerError::SearchSpaceTooLarge {
                assignments: counts
                    .iter()
                    .fold(1u128, |acc, &c| acc.saturating_mul(c as u128)),
                bound: Self::SEARCH_BOUND,
            })?;
        debug!(assignments = %assignments, "exhaustive sweep");

        if counts.is_empty() {
            let energy = model.energy(&[]);
            return Ok(SampleSet::new(vec![Sample::new(Vec::new(), energy)]));
        }

        let mut best = TopSamples::new(self.max_samples);
        for assignment in counts
            .iter()
            .map(|&c| 0..(c as CaseId))
            .multi_cartesian_product()
        {
            let energy = model.energy(&assignment);
            best.offer(assignment, energy);
        }
        Ok(best.into_sample_set())
    }

    fn sample_bijections(
        &self,
        model: &DiscreteQuadraticModel,
    ) -> Result<SampleSet, SamplerError> {
        let n = model.num_variables();
        if model.case_counts().any(|c| c != n) {
            return Err(SamplerError::unsupported(
                "bijection enumeration needs every variable to range over one case per variable",
            ));
        }
        debug!(variables = n, "bijection sweep");

        let mut best = TopSamples::new(self.max_samples);
        for assignment in (0..(n as CaseId)).permutations(n) {
            let energy = model.energy(&assignment);
            best.offer(assignment, energy);
        }
        Ok(best.into_sample_set())
    }
}

impl Default for ExactSampler {
    fn default() -> Self {
        Self::bijections()
    }
}

impl Sampler for ExactSampler {
    fn sample(&self, model: &DiscreteQuadraticModel) -> Result<SampleSet, SamplerError> {
        match self.space {
            SearchSpace::Exhaustive => self.sample_exhaustive(model),
            SearchSpace::Bijections => self.sample_bijections(model),
        }
    }
}

/// Ascending-energy buffer capped at `cap` samples, except that samples tied
/// at the current minimum are always retained. Above the minimum, first-seen
/// samples win ties for the remaining slots.
struct TopSamples {
    cap: usize,
    samples: Vec<Sample>,
}

impl TopSamples {
    fn new(cap: usize) -> Self {
        TopSamples {
            cap,
            samples: Vec::new(),
        }
    }

    fn offer(&mut self, assignment: Vec<CaseId>, energy: i64) {
        if self.samples.len() >= self.cap {
            let min = self.samples[0].energy();
            let worst = self.samples[self.samples.len() - 1].energy();
            if energy >= worst && energy > min {
                return;
            }
        }
        let pos = self.samples.partition_point(|s| s.energy() <= energy);
        self.samples.insert(pos, Sample::new(assignment, energy));

        while self.samples.len() > self.cap {
            let min = self.samples[0].energy();
            let last = self.samples[self.samples.len() - 1].energy();
            if last == min {
                break;
            }
            self.samples.pop();
        }
    }

    fn into_sample_set(self) -> SampleSet {
        SampleSet::new(self.samples)
    }
}
