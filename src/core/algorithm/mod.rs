pub mod dijkstra;
pub mod prim;
pub mod search;

use crate::core::graph::GraphModel;
use crate::domain::model::{AlgorithmType, Traversal};
use crate::utils::error::Result;

pub use dijkstra::DijkstraAlgorithm;
pub use prim::PrimAlgorithm;
pub use search::{BreadthFirstSearch, DepthFirstSearch};

/// A graph algorithm that can be attached to the model and started from a clicked vertex.
///
/// Implementations reset their working collections on every `perform`, so one instance can
/// be run again from another start vertex.
pub trait Algorithm: Send {
    fn algorithm_type(&self) -> AlgorithmType;

    fn perform(&mut self, graph: &mut GraphModel, start: char) -> Result<Traversal>;
}

pub fn algorithm_for(algorithm_type: AlgorithmType) -> Box<dyn Algorithm> {
    match algorithm_type {
        AlgorithmType::DepthFirst => Box::new(DepthFirstSearch::default()),
        AlgorithmType::BreadthFirst => Box::new(BreadthFirstSearch::default()),
        AlgorithmType::Dijkstra => Box::new(DijkstraAlgorithm::default()),
        AlgorithmType::Prim => Box::new(PrimAlgorithm::default()),
    }
}
