//! Graph isomorphism as a discrete quadratic model.
//!
//! One discrete variable per node of the left graph; its cases are the node
//! indices of the right graph, so a full assignment is a candidate mapping.
//! Two penalty families shape the objective:
//!
//! - H_A: each right node chosen at most once. The one-variable-per-left-node
//!   domain already guarantees each left node maps exactly once, so only the
//!   collision direction needs quadratic terms.
//! - H_B: adjacency agreement. A left edge landing on a right non-edge pays,
//!   and so does a right edge whose preimage pair is a left non-edge.
//!
//! The offset cancels H_A's linear terms, putting the ground energy at
//! exactly zero: an assignment scores zero iff it is an edge-preserving
//! bijection in both directions.

use ceq_netlist::{CircuitGraph, NodeId};
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use ceq_dqm::{CaseId, DiscreteQuadraticModel, Sample, VarId};

use crate::verdict::Correspondence;

/// Penalty coefficients of the two constraint families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenaltyWeights {
    /// Weight of the each-right-node-chosen-once terms (H_A).
    pub bijection: i64,
    /// Weight of the adjacency-agreement terms (H_B). The default of 2 was
    /// tuned on small problems to outweigh bijection violations.
    pub adjacency: i64,
}

impl PenaltyWeights {
    /// Create explicit weights. Both must be positive for the ground-energy
    /// equality to signal an isomorphism.
    #[contracts::debug_requires(bijection > 0 && adjacency > 0)]
    pub fn new(bijection: i64, adjacency: i64) -> Self {
        PenaltyWeights {
            bijection,
            adjacency,
        }
    }
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self::new(1, 2)
    }
}

/// The encoder's only failure: unequal node counts admit no bijection, so no
/// model is built. Callers deciding equivalence treat this as a definitive
/// "not equivalent" rather than an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Node counts differ.
    #[error("graphs have different node counts ({left} vs {right}); no isomorphism is possible")]
    NodeCountMismatch {
        /// Node count of the left graph.
        left: usize,
        /// Node count of the right graph.
        right: usize,
    },
}

/// An encoded isomorphism search: the model plus the node orders needed to
/// translate assignments back into node correspondences.
#[derive(Clone, Debug)]
pub struct IsomorphismModel {
    model: DiscreteQuadraticModel,
    left_nodes: Vec<String>,
    right_nodes: Vec<String>,
}

impl IsomorphismModel {
    /// The underlying quadratic model.
    pub fn model(&self) -> &DiscreteQuadraticModel {
        &self.model
    }

    /// Objective value reached exactly by encoded isomorphisms.
    pub const fn ground_energy(&self) -> i64 {
        0
    }

    /// Whether `sample` sits at the ground energy. Weights are integral, so
    /// this is exact equality, not a tolerance check.
    pub fn is_ground(&self, sample: &Sample) -> bool {
        sample.energy() == self.ground_energy()
    }

    /// Translate a sample into a left-node to right-node correspondence.
    #[contracts::debug_requires(sample.assignment().len() == self.left_nodes.len())]
    pub fn correspondence(&self, sample: &Sample) -> Correspondence {
        self.left_nodes
            .iter()
            .enumerate()
            .map(|(var, left)| {
                let case = sample.case(var as VarId);
                (left.clone(), self.right_nodes[case as usize].clone())
            })
            .collect()
    }
}

/// Encode the search for an isomorphism between `left` and `right`.
pub fn encode_isomorphism(
    left: &CircuitGraph,
    right: &CircuitGraph,
    weights: PenaltyWeights,
) -> Result<IsomorphismModel, EncodeError> {
    let n = left.node_count();
    if n != right.node_count() {
        return Err(EncodeError::NodeCountMismatch {
            left: n,
            right: right.node_count(),
        });
    }

    let mut model = DiscreteQuadraticModel::new();
    for node in left.nodes() {
        model.add_variable(left.node_name(node), n);
    }

    let a = weights.bijection;
    let b = weights.adjacency;

    // H_A. The offset cancels the per-variable -a terms, so any assignment
    // choosing each right node exactly once scores zero before edge terms.
    model.set_offset(a * n as i64);
    for var in 0..(n as VarId) {
        for case in 0..(n as CaseId) {
            model.set_linear_case(var, case, -a);
        }
    }
    for (u, v) in (0..(n as VarId)).tuple_combinations::<(_, _)>() {
        for case in 0..(n as CaseId) {
            model.set_quadratic_case(u, case, v, case, 2 * a);
        }
    }

    // H_B: a left edge mapped onto a right non-edge pays in both
    // orientations of the pair.
    for (u, v) in left.edges() {
        for (i, j) in (0..(n as NodeId)).tuple_combinations::<(_, _)>() {
            if right.has_edge(i, j) {
                continue;
            }
            model.set_quadratic_case(u, i, v, j, b);
            model.set_quadratic_case(u, j, v, i, b);
        }
    }
    // ...and symmetrically, a right edge whose preimage pair is a left
    // non-edge.
    for (i, j) in right.edges() {
        for (u, v) in (0..(n as NodeId)).tuple_combinations::<(_, _)>() {
            if left.has_edge(u, v) {
                continue;
            }
            model.set_quadratic_case(u, i, v, j, b);
            model.set_quadratic_case(u, j, v, i, b);
        }
    }

    debug!(
        nodes = n,
        quadratic_biases = model.num_quadratic_biases(),
        "encoded isomorphism model"
    );

    Ok(IsomorphismModel {
        model,
        left_nodes: left.node_names().map(str::to_owned).collect(),
        right_nodes: right.node_names().map(str::to_owned).collect(),
    })
}
