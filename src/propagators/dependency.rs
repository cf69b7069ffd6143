/*!
The positive dependency graph of a logic program.

Edges run from head atoms to the positive atoms of their rule bodies.
Strongly connected components are computed with
[tarjan_scc](petgraph::algo::tarjan_scc), and components with a cycle (more
than one atom, or a self-loop) become [cyclic
components](crate::propagators::component::Component) subject to unfounded-set
checks.

The graph is consumed when components are computed: afterwards edges are of
no further use, and the space is released.
*/

use std::collections::HashMap;

use petgraph::{algo::tarjan_scc, graph::DiGraph, graph::NodeIndex};

use crate::structures::atom::Atom;

/// The positive dependency graph.
#[derive(Default)]
pub struct DependencyGraph {
    graph: DiGraph<Atom, ()>,
    nodes: HashMap<Atom, NodeIndex>,
}

impl DependencyGraph {
    fn node_of(&mut self, atom: Atom) -> NodeIndex {
        match self.nodes.get(&atom) {
            Some(node) => *node,
            None => {
                let node = self.graph.add_node(atom);
                self.nodes.insert(atom, node);
                node
            }
        }
    }

    /// Adds an edge from a head atom to a positive atom of its body.
    pub fn add_edge(&mut self, head: Atom, positive_body_atom: Atom) {
        let head_node = self.node_of(head);
        let body_node = self.node_of(positive_body_atom);
        self.graph.add_edge(head_node, body_node, ());
    }

    /// True if no edge has been added.
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// The strongly connected components of the graph which contain a cycle,
    /// as sets of atoms, consuming the graph.
    pub fn cyclic_components(&mut self) -> Vec<Vec<Atom>> {
        let graph = std::mem::take(&mut self.graph);
        self.nodes.clear();

        let mut components = Vec::default();

        for scc in tarjan_scc(&graph) {
            let cyclic = match scc.len() {
                1 => graph.contains_edge(scc[0], scc[0]),
                _ => true,
            };

            if cyclic {
                components.push(scc.iter().map(|node| graph[*node]).collect());
            }
        }

        components
    }
}
