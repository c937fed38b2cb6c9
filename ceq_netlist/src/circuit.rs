//! A parsed netlist together with its component graph.

use std::path::Path;

use crate::graph::CircuitGraph;
use crate::parse::{Netlist, NetlistError, ParseError};

/// A circuit: the parsed netlist and the graph derived from it.
///
/// Built once per run and read-only thereafter.
#[derive(Clone, Debug)]
pub struct Circuit {
    netlist: Netlist,
    graph: CircuitGraph,
}

impl Circuit {
    /// Parse netlist text and build its component graph.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let netlist = Netlist::parse(text)?;
        let graph = CircuitGraph::from_netlist(&netlist);
        Ok(Circuit { netlist, graph })
    }

    /// Load a circuit from a netlist file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetlistError> {
        let netlist = Netlist::from_path(path)?;
        let graph = CircuitGraph::from_netlist(&netlist);
        Ok(Circuit { netlist, graph })
    }

    /// The parsed component list.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// The component graph.
    pub fn graph(&self) -> &CircuitGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_builds_netlist_and_graph_together() {
        let circuit = Circuit::parse("wire A x\nwire B x\n").unwrap();
        assert_eq!(circuit.netlist().len(), 2);
        assert_eq!(circuit.graph().node_count(), 2);
        assert_eq!(circuit.graph().edge_count(), 1);
    }

    #[test]
    fn from_path_loads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inv.txt");
        std::fs::write(
            &path,
            "pmos P1 out in vdd\nnmos N1 out in gnd\nvsource V1 vdd\nground G1 gnd\n",
        )
        .unwrap();

        let circuit = Circuit::from_path(&path).unwrap();
        assert_eq!(circuit.graph().node_count(), 4);

        let p1 = circuit.graph().node_id("P1").unwrap();
        let n1 = circuit.graph().node_id("N1").unwrap();
        assert!(circuit.graph().has_edge(p1, n1));
    }
}
