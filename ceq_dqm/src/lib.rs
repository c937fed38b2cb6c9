//! Discrete quadratic models and pluggable samplers.
//!
//! A discrete quadratic model (DQM) is an objective over variables that each
//! take one of several discrete cases, with per-case linear biases, per
//! case-pair quadratic biases, and a constant offset. This crate holds the
//! model itself plus the [`Sampler`] boundary through which models are
//! minimized: production deployments would hand the model to a hosted
//! optimization service behind that trait, while [`ExactSampler`] scores every
//! candidate assignment of a small model and [`MockSampler`] replays scripted
//! results.
//!
//! Biases are integers so that callers comparing sample energies against a
//! known ground state can use exact equality.

pub mod exact;
pub mod mock;
pub mod model;
pub mod sample;
pub mod sampler;

pub use exact::{ExactSampler, SearchSpace};
pub use mock::MockSampler;
pub use model::{CaseId, DiscreteQuadraticModel, VarId};
pub use sample::{Sample, SampleSet};
pub use sampler::{Sampler, SamplerError};
