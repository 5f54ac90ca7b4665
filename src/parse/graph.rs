//! petgraph-based directed graph over the Task collection's dependencies.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::fields::parse_tag_list;
use super::types::Task;

pub struct TaskGraph {
    pub graph: DiGraph<String, ()>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    /// Build the dependency graph. A node per declared TaskID (first row
    /// wins on duplicates), an edge per resolved `Dependencies` entry.
    /// References to unknown task ids are dead ends and are skipped here;
    /// the referential checks report them, not the graph.
    pub fn build(tasks: &[Task]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for task in tasks {
            if task.id.is_empty() || node_indices.contains_key(&task.id) {
                continue;
            }
            let idx = graph.add_node(task.id.clone());
            node_indices.insert(task.id.clone(), idx);
        }

        for task in tasks {
            let Some(&source) = node_indices.get(&task.id) else {
                continue;
            };
            let Some(raw) = &task.dependencies else {
                continue;
            };
            for dep in parse_tag_list(raw) {
                if let Some(&target) = node_indices.get(&dep) {
                    graph.add_edge(source, target, ());
                }
            }
        }

        TaskGraph { graph, node_indices }
    }

    pub fn successors(&self, task_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(task_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    pub fn dependency_count(&self, task_id: &str) -> usize {
        self.successors(task_id).len()
    }
}
