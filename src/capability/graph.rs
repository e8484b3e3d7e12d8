//! Prerequisite graph algorithms.
//!
//! Nodes are indices into a caller-owned slice; `prerequisites[i]` lists the
//! nodes that node `i` requires. Both functions are deterministic in node
//! index order so callers get declaration-ordered output.

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Edge `a -> b` means `a` requires `b`. Repeated prerequisites collapse into
/// one edge.
fn build(prerequisites: &[Vec<usize>]) -> DiGraph<(), ()> {
    let mut graph = DiGraph::with_capacity(prerequisites.len(), prerequisites.len());
    for _ in prerequisites {
        graph.add_node(());
    }
    for (node, prereqs) in prerequisites.iter().enumerate() {
        for &prereq in prereqs {
            graph.update_edge(NodeIndex::new(node), NodeIndex::new(prereq), ());
        }
    }
    graph
}

/// Prerequisite cycles: strongly connected components with more than one
/// member, or a single member that requires itself. Members of each cycle are
/// sorted ascending; cycles are ordered by their smallest member.
///
/// Kosaraju's walks are iterative; chain length is not bounded by the call
/// stack.
pub fn prerequisite_cycles(prerequisites: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let graph = build(prerequisites);
    let mut cycles: Vec<Vec<usize>> = kosaraju_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || graph.contains_edge(component[0], component[0])
        })
        .map(|component| {
            let mut members: Vec<usize> = component.into_iter().map(NodeIndex::index).collect();
            members.sort_unstable();
            members
        })
        .collect();
    cycles.sort_by_key(|component| component[0]);
    cycles
}

/// Order in which nodes can be loaded: every node after all of its
/// prerequisites, ties broken by lowest index. None when a cycle exists.
pub fn load_order(prerequisites: &[Vec<usize>]) -> Option<Vec<usize>> {
    let graph = build(prerequisites);
    let mut pending: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.neighbors_directed(node, Direction::Outgoing).count())
        .collect();

    let mut ready: BinaryHeap<Reverse<usize>> = graph
        .node_indices()
        .filter(|node| pending[node.index()] == 0)
        .map(|node| Reverse(node.index()))
        .collect();
    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for dependent in graph.neighbors_directed(NodeIndex::new(node), Direction::Incoming) {
            let dependent = dependent.index();
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    (order.len() == graph.node_count()).then_some(order)
}
