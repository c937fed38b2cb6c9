//! Netlist parsing and circuit-graph construction.
//!
//! A netlist is a line-oriented text description of a circuit: one component
//! per line, giving its kind, its identifier, and the electrical nets its
//! terminals are bound to. This crate parses that format into an immutable
//! [`Netlist`] and derives a [`CircuitGraph`] from it: one node per component,
//! an undirected edge between any two components that share a net.
//!
//! [`Circuit`] bundles the two, which is the shape the equivalence checker
//! consumes. Everything here is a pure transform; values are built once and
//! read-only afterwards.

pub mod circuit;
pub mod component;
pub mod graph;
pub mod parse;

pub use circuit::Circuit;
pub use component::{Component, ComponentKind, PinRole, Terminal, TerminalArity};
pub use graph::{CircuitGraph, NodeId};
pub use parse::{Netlist, NetlistError, ParseError};
