use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::VisualizerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Point) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }

    /// 點到線段 (a, b) 的距離
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f64 {
        let (px, py) = (self.x as f64, self.y as f64);
        let (ax, ay) = (a.x as f64, a.y as f64);
        let (bx, by) = (b.x as f64, b.y as f64);
        let (dx, dy) = (bx - ax, by - ay);
        let length_squared = dx * dx + dy * dy;
        if length_squared == 0.0 {
            return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
        }
        let t = (((px - ax) * dx + (py - ay) * dy) / length_squared).clamp(0.0, 1.0);
        let (cx, cy) = (ax + t * dx, ay + t * dy);
        ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Editing modes selectable from the mode menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    None,
    ResetMode,
    AddVertex,
    AddEdge,
    RemoveVertex,
    RemoveEdge,
}

impl Mode {
    pub const START: Mode = Mode::AddVertex;

    pub fn mode_name(&self) -> &'static str {
        match self {
            Mode::None => "None",
            Mode::ResetMode | Mode::AddVertex => "Add a Vertex",
            Mode::AddEdge => "Add an Edge",
            Mode::RemoveVertex => "Remove a Vertex",
            Mode::RemoveEdge => "Remove an Edge",
        }
    }
}

impl FromStr for Mode {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Mode::None),
            "add-vertex" => Ok(Mode::AddVertex),
            "add-edge" => Ok(Mode::AddEdge),
            "remove-vertex" => Ok(Mode::RemoveVertex),
            "remove-edge" => Ok(Mode::RemoveEdge),
            other => Err(VisualizerError::invalid_input(
                "mode",
                other,
                "expected none, add-vertex, add-edge, remove-vertex or remove-edge",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    DepthFirst,
    BreadthFirst,
    Dijkstra,
    Prim,
}

impl AlgorithmType {
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            AlgorithmType::DepthFirst => "Depth-First Search",
            AlgorithmType::BreadthFirst => "Breadth-First Search",
            AlgorithmType::Dijkstra => "Dijkstra's Algorithm",
            AlgorithmType::Prim => "Prim's Algorithm",
        }
    }
}

impl FromStr for AlgorithmType {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(AlgorithmType::DepthFirst),
            "bfs" | "breadth-first" => Ok(AlgorithmType::BreadthFirst),
            "dijkstra" => Ok(AlgorithmType::Dijkstra),
            "prim" => Ok(AlgorithmType::Prim),
            other => Err(VisualizerError::invalid_input(
                "algorithm",
                other,
                "expected dfs, bfs, dijkstra or prim",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmState {
    SelectVertex,
    Running,
    Stopped,
    Terminated,
}

/// One played step: highlight the edge `from -> to` and the vertex `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalStep {
    pub from: char,
    pub to: char,
}

impl TraversalStep {
    pub fn new(from: char, to: char) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    pub steps: Vec<TraversalStep>,
    pub result: String,
}

/// Canvas geometry shared by the model, the click handling and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSettings {
    pub width: i32,
    pub height: i32,
    pub height_offset: i32,
    pub vertex_diameter: i32,
    pub corner_vertices: bool,
}

impl CanvasSettings {
    pub fn vertex_radius(&self) -> i32 {
        self.vertex_diameter / 2
    }

    /// 可放置頂點的區域高度 (扣除狀態列與結果列)
    pub fn graph_height(&self) -> i32 {
        self.height - self.height_offset
    }

    pub fn contains(&self, point: &Point) -> bool {
        (0..self.width).contains(&point.x) && (0..self.graph_height()).contains(&point.y)
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            height_offset: 105,
            vertex_diameter: 50,
            corner_vertices: true,
        }
    }
}

/// JSON 存檔格式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub version: u32,
    pub saved_at: chrono::DateTime<chrono::Utc>,
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VertexRecord {
    pub label: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub weight: i32,
}
