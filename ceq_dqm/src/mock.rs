//! Canned sampler for tests and downstream stubs.

use crate::model::DiscreteQuadraticModel;
use crate::sample::SampleSet;
use crate::sampler::{Sampler, SamplerError};

/// Sampler that replays a pre-scripted outcome, ignoring the model.
///
/// Lets callers exercise everything downstream of the solving boundary
/// without a real backend: script a sample set to test verdict logic, or a
/// failure to test error propagation.
#[derive(Clone, Debug)]
pub struct MockSampler {
    outcome: Result<SampleSet, SamplerError>,
}

impl MockSampler {
    /// A sampler that always returns `samples`.
    pub fn returning(samples: SampleSet) -> Self {
        MockSampler {
            outcome: Ok(samples),
        }
    }

    /// A sampler that always fails with `error`.
    pub fn failing(error: SamplerError) -> Self {
        MockSampler {
            outcome: Err(error),
        }
    }
}

impl Sampler for MockSampler {
    fn sample(&self, _model: &DiscreteQuadraticModel) -> Result<SampleSet, SamplerError> {
        self.outcome.clone()
    }
}
