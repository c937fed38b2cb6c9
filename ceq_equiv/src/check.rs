//! Equivalence and isomorphism checks over sampler output.

use ceq_dqm::{Sampler, SamplerError};
use ceq_netlist::{Circuit, CircuitGraph};
use thiserror::Error;
use tracing::debug;

use crate::encode::{EncodeError, PenaltyWeights, encode_isomorphism};
use crate::verdict::{Correspondence, Inequivalence, Verdict};

/// Failures of the checking pipeline itself. Negative verdicts (no
/// isomorphism, incompatible components) are not errors.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Model construction failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The sampler failed; propagated as-is, no retry.
    #[error(transparent)]
    Sampler(#[from] SamplerError),
}

/// Search for a graph isomorphism between `left` and `right` using `sampler`.
///
/// Returns `Ok(None)` when the node counts differ (without building a model)
/// or when the best sample misses the ground energy; otherwise the node
/// correspondence encoded by the best sample.
pub fn find_isomorphism(
    left: &CircuitGraph,
    right: &CircuitGraph,
    sampler: &dyn Sampler,
) -> Result<Option<Correspondence>, CheckError> {
    if left.node_count() != right.node_count() {
        debug!(
            left = left.node_count(),
            right = right.node_count(),
            "node counts differ, skipping the encoder"
        );
        return Ok(None);
    }

    let encoded = encode_isomorphism(left, right, PenaltyWeights::default())?;
    let samples = sampler.sample(encoded.model())?;
    Ok(samples
        .first()
        .filter(|sample| encoded.is_ground(sample))
        .map(|sample| encoded.correspondence(sample)))
}

/// Decide whether two circuits are equivalent, using the default penalty
/// weights.
///
/// Equivalence needs an isomorphism between the component graphs whose
/// correspondence also preserves component kinds (transistor polarity,
/// supply vs ground, and so on).
pub fn check_equivalence(
    left: &Circuit,
    right: &Circuit,
    sampler: &dyn Sampler,
) -> Result<Verdict, CheckError> {
    check_equivalence_with(left, right, sampler, PenaltyWeights::default())
}

/// [`check_equivalence`] with explicit penalty weights.
pub fn check_equivalence_with(
    left: &Circuit,
    right: &Circuit,
    sampler: &dyn Sampler,
    weights: PenaltyWeights,
) -> Result<Verdict, CheckError> {
    let left_count = left.graph().node_count();
    let right_count = right.graph().node_count();
    if left_count != right_count {
        return Ok(Verdict::NotEquivalent(Inequivalence::NodeCountMismatch {
            left: left_count,
            right: right_count,
        }));
    }

    let encoded = encode_isomorphism(left.graph(), right.graph(), weights)?;
    let samples = sampler.sample(encoded.model())?;

    let mut saw_isomorphism = false;
    for sample in &samples {
        if !encoded.is_ground(sample) {
            // Samples arrive in ascending energy order; nothing at the
            // ground energy follows.
            break;
        }
        saw_isomorphism = true;
        let mapping = encoded.correspondence(sample);
        if kinds_compatible(left, right, &mapping) {
            debug!(pairs = mapping.len(), "accepted correspondence");
            return Ok(Verdict::Equivalent(mapping));
        }
        debug!("ground-energy candidate rejected: component kinds differ");
    }

    let reason = if saw_isomorphism {
        Inequivalence::IncompatibleComponents
    } else {
        Inequivalence::NoIsomorphism
    };
    Ok(Verdict::NotEquivalent(reason))
}

/// Every mapped pair must have compatible component kinds.
fn kinds_compatible(left: &Circuit, right: &Circuit, mapping: &Correspondence) -> bool {
    mapping.iter().all(|(l, r)| {
        match (left.netlist().get(l), right.netlist().get(r)) {
            (Some(cl), Some(cr)) => cl.kind().compatible_with(cr.kind()),
            _ => false,
        }
    })
}
