use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::Algorithm;
use crate::core::graph::GraphModel;
use crate::domain::model::{AlgorithmType, Traversal};
use crate::utils::error::Result;

/// Shortest route lengths from the start vertex, using a priority queue.
///
/// The result is a comma separated list of `vertex=routeLength` pairs, sorted, without the
/// start vertex. Nothing is played on the canvas.
#[derive(Debug, Default)]
pub struct DijkstraAlgorithm {
    // (route length, insertion sequence, vertex)
    vertex_queue: BinaryHeap<Reverse<(i64, u64, char)>>,
    processed: HashSet<char>,
    route_lengths: HashMap<char, i64>,
    sequence: u64,
}

impl DijkstraAlgorithm {
    fn reset_collections(&mut self) {
        self.vertex_queue.clear();
        self.processed.clear();
        self.route_lengths.clear();
        self.sequence = 0;
    }

    fn offer(&mut self, vertex: char, route_length: i64) {
        self.vertex_queue
            .push(Reverse((route_length, self.sequence, vertex)));
        self.sequence += 1;
    }

    fn process_unprocessed_neighbors(&mut self, graph: &GraphModel, vertex: char) {
        let Some(&length_to_vertex) = self.route_lengths.get(&vertex) else {
            return;
        };
        for (neighbor, weight) in graph.neighbors(vertex) {
            if self.processed.contains(&neighbor) {
                continue;
            }
            let length_on_this_route = length_to_vertex + weight as i64;
            let length_so_far = self.route_lengths.get(&neighbor).copied().unwrap_or(i64::MAX);
            if length_on_this_route < length_so_far {
                self.route_lengths.insert(neighbor, length_on_this_route);
                self.offer(neighbor, length_on_this_route);
            }
        }
    }
}

impl Algorithm for DijkstraAlgorithm {
    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Dijkstra
    }

    fn perform(&mut self, graph: &mut GraphModel, start: char) -> Result<Traversal> {
        graph.require_vertex(start)?;
        self.reset_collections();

        self.route_lengths.insert(start, 0);
        self.offer(start, 0);
        while let Some(Reverse((_, _, current))) = self.vertex_queue.pop() {
            // stale queue entry
            if !self.processed.insert(current) {
                continue;
            }
            self.process_unprocessed_neighbors(graph, current);
        }

        let mut pairs: Vec<String> = self
            .route_lengths
            .iter()
            .filter(|&(&vertex, _)| vertex != start)
            .map(|(vertex, length)| format!("{}={}", vertex, length))
            .collect();
        pairs.sort();
        tracing::debug!("dijkstra from {} reached {} vertices", start, pairs.len());

        Ok(Traversal {
            steps: Vec::new(),
            result: pairs.join(", "),
        })
    }
}
