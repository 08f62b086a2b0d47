use std::collections::HashSet;

use super::Algorithm;
use crate::core::graph::GraphModel;
use crate::domain::model::{AlgorithmType, Traversal, TraversalStep};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy)]
struct CandidateEdge {
    start: char,
    end: char,
    weight: i32,
}

/// Prim's algorithm: grows a minimum spanning tree over the component of the start vertex.
#[derive(Debug, Default)]
pub struct PrimAlgorithm {
    current_edges: Vec<CandidateEdge>,
    connected: HashSet<char>,
    spanning_tree: Vec<TraversalStep>,
}

impl PrimAlgorithm {
    fn reset_collections(&mut self) {
        self.current_edges.clear();
        self.connected.clear();
        self.spanning_tree.clear();
    }

    /// connect the vertex to the tree, drop candidates that lead to it and add its edges to
    /// vertices that are not connected yet
    fn connect(&mut self, graph: &GraphModel, vertex: char) {
        self.connected.insert(vertex);
        self.current_edges.retain(|edge| edge.end != vertex);
        for (neighbor, weight) in graph.neighbors(vertex) {
            if !self.connected.contains(&neighbor) {
                self.current_edges.push(CandidateEdge {
                    start: vertex,
                    end: neighbor,
                    weight,
                });
            }
        }
    }

    /// first candidate of minimal weight, `None` once the candidate set is drained
    fn find_minimal_weight_edge(&self) -> Option<CandidateEdge> {
        self.current_edges
            .iter()
            .min_by_key(|edge| edge.weight)
            .copied()
    }
}

impl Algorithm for PrimAlgorithm {
    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Prim
    }

    fn perform(&mut self, graph: &mut GraphModel, start: char) -> Result<Traversal> {
        graph.require_vertex(start)?;
        self.reset_collections();
        graph.select_vertex(start);

        self.connect(graph, start);
        while let Some(next) = self.find_minimal_weight_edge() {
            self.spanning_tree.push(TraversalStep::new(next.start, next.end));
            self.connect(graph, next.end);
        }

        let mut pairs: Vec<String> = self
            .spanning_tree
            .iter()
            .map(|step| format!("{}={}", step.to, step.from))
            .collect();
        pairs.sort();

        Ok(Traversal {
            steps: self.spanning_tree.clone(),
            result: pairs.join(", "),
        })
    }
}
