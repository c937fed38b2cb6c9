//! Circuit equivalence checking via discrete-quadratic-model isomorphism
//! search.
//!
//! Two circuits are equivalent when their component graphs are isomorphic
//! through a correspondence that maps every component onto one of a
//! compatible kind (a pMOS must map to a pMOS, a supply to a supply, and so
//! on). The search for the isomorphism itself is encoded as a discrete
//! quadratic model (one variable per node of the first graph, whose cases
//! are the nodes of the second) and handed to whatever
//! [`Sampler`](ceq_dqm::Sampler) the caller provides; candidate assignments
//! coming back at the ground energy are then validated for kind
//! compatibility.
//!
//! The pipeline, end to end:
//!
//! ```text
//! netlist text -> Netlist -> CircuitGraph -+
//!                                          +-> DQM -> sampler -> Verdict
//! netlist text -> Netlist -> CircuitGraph -+
//! ```

pub mod check;
pub mod encode;
pub mod verdict;

pub use check::{CheckError, check_equivalence, check_equivalence_with, find_isomorphism};
pub use encode::{EncodeError, IsomorphismModel, PenaltyWeights, encode_isomorphism};
pub use verdict::{Correspondence, Inequivalence, Verdict};
