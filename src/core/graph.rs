use crate::domain::model::{
    CanvasSettings, EdgeRecord, GraphSnapshot, Point, TraversalStep, VertexRecord,
};
use crate::utils::error::{Result, VisualizerError};
use crate::utils::validation::{validate_edge_weight, validate_vertex_label};

/// 點擊與邊線段之間允許的最大距離 (px)
pub const EDGE_HIT_TOLERANCE: f64 = 10.0;
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub label: char,
    pub center: Point,
    pub selected: bool,
    pub visited: bool,
}

impl Vertex {
    fn new(label: char, center: Point) -> Self {
        Self {
            label,
            center,
            selected: false,
            visited: false,
        }
    }

    pub fn name(&self) -> String {
        format!("Vertex {}", self.label)
    }
}

/// Undirected weighted edge. Both directions share the weight and the selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: char,
    pub to: char,
    pub weight: i32,
    pub selected: bool,
}

impl Edge {
    pub fn connects(&self, a: char, b: char) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    pub fn touches(&self, label: char) -> bool {
        self.from == label || self.to == label
    }

    /// the vertex on the other side of `label`, if the edge touches it at all
    pub fn other(&self, label: char) -> Option<char> {
        if self.from == label {
            Some(self.to)
        } else if self.to == label {
            Some(self.from)
        } else {
            None
        }
    }

    pub fn name(&self) -> String {
        format!("Edge <{} -> {}>", self.from, self.to)
    }

    pub fn label_name(&self) -> String {
        format!("EdgeLabel <{} -> {}>", self.from, self.to)
    }
}

#[derive(Debug, Clone)]
pub struct GraphModel {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    vertex_diameter: i32,
}

impl GraphModel {
    pub fn new(vertex_diameter: i32) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            vertex_diameter,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_diameter(&self) -> i32 {
        self.vertex_diameter
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, label: char) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.label == label)
    }

    pub fn require_vertex(&self, label: char) -> Result<&Vertex> {
        self.vertex(label)
            .ok_or(VisualizerError::VertexNotFound { label })
    }

    fn vertex_mut(&mut self, label: char) -> Option<&mut Vertex> {
        self.vertices.iter_mut().find(|v| v.label == label)
    }

    pub fn edge(&self, a: char, b: char) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    pub fn add_vertex(&mut self, label: char, center: Point) -> Result<()> {
        if self.vertex(label).is_some() {
            return Err(VisualizerError::DuplicateVertex { label });
        }
        tracing::debug!("adding vertex {} at {}", label, center);
        self.vertices.push(Vertex::new(label, center));
        Ok(())
    }

    /// 新增無向邊；自環直接忽略並回傳 false
    pub fn add_edge(&mut self, a: char, b: char, weight: i32) -> Result<bool> {
        self.require_vertex(a)?;
        self.require_vertex(b)?;
        if a == b {
            return Ok(false);
        }
        if self.edge(a, b).is_some() {
            return Err(VisualizerError::DuplicateEdge { from: a, to: b });
        }
        tracing::debug!("adding an edge from vertex {} to vertex {} with weight {}", a, b, weight);
        self.edges.push(Edge {
            from: a,
            to: b,
            weight,
            selected: false,
        });
        Ok(true)
    }

    /// remove a vertex and return it together with all edges that were connected to it
    pub fn remove_vertex_with_edges(&mut self, label: char) -> Result<(Vertex, Vec<Edge>)> {
        let index = self
            .vertices
            .iter()
            .position(|v| v.label == label)
            .ok_or(VisualizerError::VertexNotFound { label })?;
        let vertex = self.vertices.remove(index);
        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            self.edges.drain(..).partition(|e| e.touches(label));
        self.edges = kept;
        tracing::debug!("removed vertex {} with {} edges", label, removed.len());
        Ok((vertex, removed))
    }

    pub fn remove_edge(&mut self, a: char, b: char) -> Result<Edge> {
        let index = self
            .edges
            .iter()
            .position(|e| e.connects(a, b))
            .ok_or(VisualizerError::EdgeNotFound { from: a, to: b })?;
        let edge = self.edges.remove(index);
        tracing::debug!("removed {}", edge.name());
        Ok(edge)
    }

    /// find the vertex whose circle contains the point; later vertices are drawn on top
    pub fn vertex_at(&self, point: &Point) -> Option<char> {
        let radius = (self.vertex_diameter / 2) as i64;
        self.vertices
            .iter()
            .rev()
            .find(|v| v.center.distance_squared(point) <= radius * radius)
            .map(|v| v.label)
    }

    pub fn edge_at(&self, point: &Point) -> Option<(char, char)> {
        if self.vertex_at(point).is_some() {
            return None;
        }
        self.edges
            .iter()
            .rev()
            .find(|e| match (self.vertex(e.from), self.vertex(e.to)) {
                (Some(a), Some(b)) => {
                    point.distance_to_segment(&a.center, &b.center) <= EDGE_HIT_TOLERANCE
                }
                _ => false,
            })
            .map(|e| (e.from, e.to))
    }

    /// 點擊位置是否為空白畫布 (不在任何頂點方框或邊上)
    pub fn is_free(&self, point: &Point) -> bool {
        let radius = (self.vertex_diameter / 2) as i64;
        let on_vertex = self.vertices.iter().any(|v| {
            (v.center.x as i64 - point.x as i64).abs() <= radius
                && (v.center.y as i64 - point.y as i64).abs() <= radius
        });
        !on_vertex && self.edge_at(point).is_none()
    }

    /// neighbors of a vertex in edge insertion order
    pub fn neighbors(&self, label: char) -> Vec<(char, i32)> {
        self.edges
            .iter()
            .filter_map(|e| e.other(label).map(|n| (n, e.weight)))
            .collect()
    }

    /// neighbors ordered by ascending weight, ties keep insertion order
    pub fn neighbors_by_weight(&self, label: char) -> Vec<(char, i32)> {
        let mut neighbors = self.neighbors(label);
        neighbors.sort_by_key(|&(_, weight)| weight);
        neighbors
    }

    pub fn select_vertex(&mut self, label: char) {
        if let Some(vertex) = self.vertex_mut(label) {
            vertex.selected = true;
        }
    }

    pub fn select_edge_and_neighbor(&mut self, step: &TraversalStep) {
        if let Some(edge) = self.edges.iter_mut().find(|e| e.connects(step.from, step.to)) {
            edge.selected = true;
        }
        if let Some(vertex) = self.vertex_mut(step.to) {
            vertex.selected = true;
            vertex.visited = true;
        }
    }

    pub fn unselect(&mut self) {
        self.vertices.iter_mut().for_each(|v| {
            v.selected = false;
            v.visited = false;
        });
        self.edges.iter_mut().for_each(|e| e.selected = false);
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    /// 權重標籤位置：放在邊的中點附近，避免被線條穿過
    pub fn weight_label_position(&self, edge: &Edge) -> Option<Point> {
        let first = self.vertex(edge.from)?.center;
        let second = self.vertex(edge.to)?.center;
        let dx = second.x as i64 - first.x as i64;
        let dy = second.y as i64 - first.y as i64;
        // 中點一定落在兩個 i32 之間
        let mid = Point::new((first.x as i64 + dx / 2) as i32, (first.y as i64 + dy / 2) as i32);
        let del = self.vertex_diameter / 10;
        if dx.signum() * dy.signum() < 0 {
            Some(Point::new(mid.x.saturating_add(del), mid.y.saturating_add(del)))
        } else {
            Some(Point::new(mid.x.saturating_sub(3 * del), mid.y.saturating_add(del)))
        }
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now(),
            vertices: self
                .vertices
                .iter()
                .map(|v| VertexRecord {
                    label: v.label.to_string(),
                    x: v.center.x,
                    y: v.center.y,
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeRecord {
                    from: e.from.to_string(),
                    to: e.to.to_string(),
                    weight: e.weight,
                })
                .collect(),
        }
    }

    /// rebuild a graph from a snapshot, validating every label, position, weight and reference
    pub fn from_snapshot(snapshot: &GraphSnapshot, canvas: &CanvasSettings) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(VisualizerError::SnapshotError {
                message: format!(
                    "unsupported snapshot version {} (expected {})",
                    snapshot.version, SNAPSHOT_VERSION
                ),
            });
        }
        let mut graph = Self::new(canvas.vertex_diameter);
        for record in &snapshot.vertices {
            let label = validate_vertex_label(&record.label)?;
            let center = Point::new(record.x, record.y);
            if !canvas.contains(&center) {
                return Err(VisualizerError::SnapshotError {
                    message: format!("Vertex {} at {} is outside of the canvas", label, center),
                });
            }
            graph.add_vertex(label, center)?;
        }
        for record in &snapshot.edges {
            let from = validate_vertex_label(&record.from)?;
            let to = validate_vertex_label(&record.to)?;
            validate_edge_weight(&record.weight.to_string())?;
            if !graph.add_edge(from, to, record.weight)? {
                return Err(VisualizerError::SnapshotError {
                    message: format!("Edge <{} -> {}> is a self-loop", from, to),
                });
            }
        }
        Ok(graph)
    }
}
