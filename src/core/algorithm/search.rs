use std::collections::{HashSet, VecDeque};

use super::Algorithm;
use crate::core::graph::GraphModel;
use crate::domain::model::{AlgorithmType, Traversal, TraversalStep};
use crate::utils::error::Result;

/// "DFS : A -> B -> C"
fn route_text(prefix: &str, start: char, steps: &[TraversalStep]) -> String {
    let mut text = format!("{} : {}", prefix, start);
    for step in steps {
        text.push_str(" -> ");
        text.push(step.to);
    }
    text
}

#[derive(Debug, Default)]
pub struct DepthFirstSearch {
    visited: HashSet<char>,
    steps: Vec<TraversalStep>,
}

impl DepthFirstSearch {
    fn visit(&mut self, graph: &GraphModel, current: char) {
        self.visited.insert(current);
        for (neighbor, _) in graph.neighbors_by_weight(current) {
            if !self.visited.contains(&neighbor) {
                self.steps.push(TraversalStep::new(current, neighbor));
                self.visit(graph, neighbor);
            }
        }
    }
}

impl Algorithm for DepthFirstSearch {
    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::DepthFirst
    }

    fn perform(&mut self, graph: &mut GraphModel, start: char) -> Result<Traversal> {
        graph.require_vertex(start)?;
        self.visited.clear();
        self.steps.clear();
        self.visit(graph, start);
        Ok(Traversal {
            result: route_text("DFS", start, &self.steps),
            steps: std::mem::take(&mut self.steps),
        })
    }
}

#[derive(Debug, Default)]
pub struct BreadthFirstSearch {
    discovered: HashSet<char>,
    queue: VecDeque<char>,
}

impl Algorithm for BreadthFirstSearch {
    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::BreadthFirst
    }

    fn perform(&mut self, graph: &mut GraphModel, start: char) -> Result<Traversal> {
        graph.require_vertex(start)?;
        self.discovered.clear();
        self.queue.clear();

        let mut steps = Vec::new();
        self.discovered.insert(start);
        self.queue.push_back(start);
        while let Some(current) = self.queue.pop_front() {
            for (neighbor, _) in graph.neighbors_by_weight(current) {
                if self.discovered.insert(neighbor) {
                    steps.push(TraversalStep::new(current, neighbor));
                    self.queue.push_back(neighbor);
                }
            }
        }
        Ok(Traversal {
            result: route_text("BFS", start, &steps),
            steps,
        })
    }
}
