//! Simple undirected graphs over circuit components.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use tracing::debug;

use crate::parse::Netlist;

/// Node index within a [`CircuitGraph`].
pub type NodeId = u32;

/// Simple undirected graph whose nodes carry component identifiers.
///
/// Nodes keep their insertion order, edges are deduplicated, and self-loops
/// are never stored, so two components sharing several nets still contribute
/// a single edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CircuitGraph {
    names: Vec<String>,
    ids: HashMap<String, NodeId>,
    adjacency: Vec<BTreeSet<NodeId>>,
    edges: BTreeSet<(NodeId, NodeId)>,
}

impl CircuitGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the component graph of a netlist: one node per component, an
    /// edge wherever two components bind the same net.
    pub fn from_netlist(netlist: &Netlist) -> Self {
        let mut graph = Self::new();
        for component in netlist {
            graph.add_node(component.name());
        }

        // Group node ids by net; every pair within a group is connected.
        let mut members: IndexMap<&str, Vec<NodeId>> = IndexMap::new();
        for (idx, component) in netlist.iter().enumerate() {
            let id = idx as NodeId;
            for net in component.nets() {
                let entry = members.entry(net).or_default();
                // A component may bind the same net on two pins.
                if entry.last() != Some(&id) {
                    entry.push(id);
                }
            }
        }
        for nodes in members.values() {
            for (i, &u) in nodes.iter().enumerate() {
                for &v in &nodes[i + 1..] {
                    graph.insert_edge(u, v);
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built circuit graph"
        );
        graph
    }

    /// Add a node, returning its id. Re-adding a known name returns the
    /// existing id.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as NodeId;
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        self.adjacency.push(BTreeSet::new());
        id
    }

    /// Add an undirected edge by node name, adding unknown names first.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        let u = self.add_node(a);
        let v = self.add_node(b);
        self.insert_edge(u, v);
    }

    /// Add an undirected edge between existing nodes. Self-loops are ignored.
    #[contracts::debug_requires((u as usize) < self.node_count())]
    #[contracts::debug_requires((v as usize) < self.node_count())]
    pub fn insert_edge(&mut self, u: NodeId, v: NodeId) {
        if u == v {
            return;
        }
        let (lo, hi) = if u < v { (u, v) } else { (v, u) };
        if self.edges.insert((lo, hi)) {
            self.adjacency[lo as usize].insert(hi);
            self.adjacency[hi as usize].insert(lo);
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether `u` and `v` are adjacent. Order does not matter.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        let (lo, hi) = if u < v { (u, v) } else { (v, u) };
        self.edges.contains(&(lo, hi))
    }

    /// All node ids, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.names.len() as NodeId
    }

    /// All edges as `(lower, higher)` id pairs, in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges.iter().copied()
    }

    /// Component identifier of a node.
    #[contracts::debug_requires((id as usize) < self.node_count())]
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.names[id as usize]
    }

    /// Node identifiers in insertion order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Node id of a component identifier, if present.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    /// Neighbors of `u` in ascending id order.
    #[contracts::debug_requires((u as usize) < self.node_count())]
    pub fn neighbors(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency[u as usize].iter().copied()
    }

    /// Degree of `u`.
    #[contracts::debug_requires((u as usize) < self.node_count())]
    pub fn degree(&self, u: NodeId) -> usize {
        self.adjacency[u as usize].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAND: &str = "\
pmos P1 out a vdd
pmos P2 out b vdd
nmos N1 out a mid
nmos N2 mid b gnd
vsource V1 vdd
ground G1 gnd
wire INA a
wire INB b
wire OUT out
";

    fn nand_graph() -> CircuitGraph {
        CircuitGraph::from_netlist(&Netlist::parse(NAND).unwrap())
    }

    #[test]
    fn nodes_follow_declaration_order() {
        let graph = nand_graph();
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.node_name(0), "P1");
        assert_eq!(graph.node_id("OUT"), Some(8));
        assert_eq!(graph.node_id("vdd"), None, "nets are not nodes");
    }

    #[test]
    fn shared_nets_become_edges() {
        let graph = nand_graph();
        assert_eq!(graph.edge_count(), 15);

        let p1 = graph.node_id("P1").unwrap();
        let p2 = graph.node_id("P2").unwrap();
        let n2 = graph.node_id("N2").unwrap();
        let g1 = graph.node_id("G1").unwrap();

        // P1 and P2 share both `out` and `vdd`, still one edge.
        assert!(graph.has_edge(p1, p2));
        assert!(graph.has_edge(p2, p1));
        // P1 and N2 share nothing.
        assert!(!graph.has_edge(p1, n2));
        // The ground reference touches only the pull-down tail.
        assert_eq!(graph.degree(g1), 1);
        assert_eq!(graph.neighbors(g1).collect::<Vec<_>>(), [n2]);
    }

    #[test]
    fn degrees_match_the_nand_structure() {
        let graph = nand_graph();
        let degree_of = |name: &str| graph.degree(graph.node_id(name).unwrap());
        assert_eq!(degree_of("P1"), 5);
        assert_eq!(degree_of("P2"), 6);
        assert_eq!(degree_of("N1"), 5);
        assert_eq!(degree_of("N2"), 4);
        assert_eq!(degree_of("V1"), 2);
        assert_eq!(degree_of("OUT"), 3);
    }

    #[test]
    fn reordered_netlist_builds_the_same_edge_relation() {
        let reordered: String = NAND.lines().rev().collect::<Vec<_>>().join("\n");
        let a = nand_graph();
        let b = CircuitGraph::from_netlist(&Netlist::parse(&reordered).unwrap());

        assert_eq!(a.node_count(), b.node_count());
        assert_eq!(a.edge_count(), b.edge_count());
        for (u, v) in a.edges() {
            let bu = b.node_id(a.node_name(u)).unwrap();
            let bv = b.node_id(a.node_name(v)).unwrap();
            assert!(b.has_edge(bu, bv));
        }
    }

    #[test]
    fn builder_api_deduplicates_and_ignores_self_loops() {
        let mut graph = CircuitGraph::new();
        graph.add_edge("x", "y");
        graph.add_edge("y", "x");
        graph.add_edge("x", "x");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn repeated_net_on_one_component_is_no_self_loop() {
        let netlist = Netlist::parse("wire W1 a a\nwire W2 a\n").unwrap();
        let graph = CircuitGraph::from_netlist(&netlist);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
