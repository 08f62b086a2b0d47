pub mod algorithm;
pub mod algorithm_model;
pub mod application;
pub mod graph;
pub mod player;

pub use crate::domain::model::{AlgorithmState, AlgorithmType, Mode, Point, Traversal};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
