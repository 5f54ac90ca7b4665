//! Dependency cycle detection over the task graph (G001).
//!
//! Depth-first traversal restarted from every unvisited node, with a
//! recursion stack: revisiting an on-stack node closes a cycle whose chain
//! is the current path suffix. Visited nodes are never re-expanded, so the
//! whole pass is O(nodes + edges) and terminates on self-loops and
//! multi-node cycles alike. Distinct cycles are deduplicated by canonical
//! rotation; every task on a cycle gets one finding carrying the full
//! chain.

use std::collections::HashSet;

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use crate::finding::{EntityKind, Finding};
use crate::parse::graph::TaskGraph;
use crate::parse::types::Task;

pub fn detect_cycles(tasks: &[Task]) -> Vec<Finding> {
    let graph = TaskGraph::build(tasks);

    let mut walk = Walk {
        graph: &graph,
        visited: HashSet::new(),
        on_stack: HashSet::new(),
        path: Vec::new(),
        seen: HashSet::new(),
        cycles: Vec::new(),
    };

    for node in graph.graph.node_indices() {
        if !walk.visited.contains(&node) {
            walk.visit(node);
        }
    }

    let mut findings = Vec::new();
    for cycle in walk.cycles {
        let chain = render_chain(&cycle);
        for task_id in &cycle {
            findings.push(Finding::error(
                "G001",
                EntityKind::Task,
                task_id,
                "Dependencies",
                format!("circular dependency: {}", chain),
            ));
        }
    }
    findings
}

struct Walk<'a> {
    graph: &'a TaskGraph,
    visited: HashSet<NodeIndex>,
    on_stack: HashSet<NodeIndex>,
    path: Vec<NodeIndex>,
    /// Canonical rotations of cycles already recorded.
    seen: HashSet<Vec<String>>,
    cycles: Vec<Vec<String>>,
}

impl Walk<'_> {
    fn visit(&mut self, node: NodeIndex) {
        self.visited.insert(node);
        self.on_stack.insert(node);
        self.path.push(node);

        let successors: Vec<NodeIndex> = self
            .graph
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        for next in successors {
            if self.on_stack.contains(&next) {
                self.record_cycle(next);
            } else if !self.visited.contains(&next) {
                self.visit(next);
            }
        }

        self.path.pop();
        self.on_stack.remove(&node);
    }

    /// The cyclic suffix of the current path, starting at `entry`.
    fn record_cycle(&mut self, entry: NodeIndex) {
        let start = self
            .path
            .iter()
            .position(|n| *n == entry)
            .expect("on-stack node must be on the path");
        let cycle: Vec<String> = self.path[start..]
            .iter()
            .map(|n| self.graph.graph[*n].clone())
            .collect();
        if self.seen.insert(canonical_rotation(&cycle)) {
            self.cycles.push(cycle);
        }
    }
}

/// Rotate so the lexicographically smallest member leads; the same cycle
/// discovered from different entry points maps to one key.
fn canonical_rotation(cycle: &[String]) -> Vec<String> {
    let Some(min_pos) = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| id.as_str())
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[min_pos..]);
    rotated.extend_from_slice(&cycle[..min_pos]);
    rotated
}

fn render_chain(cycle: &[String]) -> String {
    let mut chain = cycle.join(" → ");
    if let Some(first) = cycle.first() {
        chain.push_str(" → ");
        chain.push_str(first);
    }
    chain
}
