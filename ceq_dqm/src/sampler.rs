//! The pluggable solving boundary.

use thiserror::Error;

use crate::model::DiscreteQuadraticModel;
use crate::sample::SampleSet;

/// A capability that minimizes discrete quadratic models.
///
/// This is the seam where a remote optimization service plugs in; callers
/// treat it as opaque, potentially slow, and potentially failing. Any number
/// of returned samples (including a single one) is valid output. The calling
/// side never retries; retry policy belongs to the implementation.
pub trait Sampler {
    /// Produce samples for `model`, lowest energy first.
    fn sample(&self, model: &DiscreteQuadraticModel) -> Result<SampleSet, SamplerError>;
}

/// Failures raised by a [`Sampler`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SamplerError {
    /// The model shape is outside what this sampler supports.
    #[error("model not supported by this sampler: {0}")]
    UnsupportedModel(String),
    /// Exhaustive enumeration would exceed the sampler's bound.
    #[error("search space of {assignments} assignments exceeds the bound of {bound}")]
    SearchSpaceTooLarge {
        /// Number of full assignments the model admits.
        assignments: u128,
        /// The sampler's enumeration bound.
        bound: u128,
    },
    /// An external solving backend failed.
    #[error("solver backend error: {0}")]
    Backend(String),
}

impl SamplerError {
    /// Build an [`SamplerError::UnsupportedModel`].
    pub fn unsupported(message: impl Into<String>) -> Self {
        SamplerError::UnsupportedModel(message.into())
    }

    /// Build a [`SamplerError::Backend`].
    pub fn backend(message: impl Into<String>) -> Self {
        SamplerError::Backend(message.into())
    }
}
