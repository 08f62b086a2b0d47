use std::time::Duration;

use crate::core::algorithm::{algorithm_for, Algorithm};
use crate::core::algorithm_model::AlgorithmModel;
use crate::core::graph::GraphModel;
use crate::core::player::{Player, PlayerTick};
use crate::domain::model::{
    AlgorithmState, AlgorithmType, CanvasSettings, GraphSnapshot, Mode, Point,
};
use crate::utils::error::{Result, VisualizerError};
use crate::utils::validation::{validate_edge_weight, validate_vertex_label};

/// Callback interface for listeners to changes in the ApplicationModel. Listeners only
/// override the updates they are interested in.
pub trait ApplicationModelListener: Send {
    fn update_mode(&mut self, _mode: Mode) {}
    fn update_algorithm(&mut self, _algorithm: AlgorithmType) {}
    fn update_algorithm_state(&mut self, _algorithm_model: &AlgorithmModel) {}
    fn update_graph(&mut self, _graph: &GraphModel) {}
}

/// What a click on the canvas ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    /// the input dialog was cancelled
    Cancelled,
    VertexAdded(char),
    VertexSelected(char),
    EdgeAdded(char, char),
    VertexRemoved(char),
    EdgeRemoved(char, char),
    AlgorithmStarted(char),
}

/// Application state: the graph, the selected mode and the attached algorithm.
///
/// Registered listeners are notified on every change. Click handling follows the current
/// mode, or goes to the attached algorithm while one is waiting for (or playing from) a
/// start vertex.
pub struct ApplicationModel {
    canvas: CanvasSettings,
    graph: GraphModel,
    mode: Mode,
    selected: Option<char>,
    algorithm: Option<Box<dyn Algorithm>>,
    algorithm_model: Option<AlgorithmModel>,
    player: Player,
    listeners: Vec<Box<dyn ApplicationModelListener>>,
}

impl ApplicationModel {
    pub fn new(canvas: CanvasSettings) -> Self {
        Self {
            canvas,
            graph: GraphModel::new(canvas.vertex_diameter),
            mode: Mode::START,
            selected: None,
            algorithm: None,
            algorithm_model: None,
            player: Player::default(),
            listeners: Vec::new(),
        }
    }

    pub fn register_listener(&mut self, listener: Box<dyn ApplicationModelListener>) {
        self.listeners.push(listener);
    }

    pub fn canvas(&self) -> &CanvasSettings {
        &self.canvas
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> Option<char> {
        self.selected
    }

    pub fn algorithm_type(&self) -> Option<AlgorithmType> {
        self.algorithm.as_ref().map(|a| a.algorithm_type())
    }

    pub fn algorithm_model(&self) -> Option<&AlgorithmModel> {
        self.algorithm_model.as_ref()
    }

    pub fn algorithm_state(&self) -> Option<AlgorithmState> {
        self.algorithm_model.as_ref().map(AlgorithmModel::state)
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// place the four corner vertices 0 (NW), 1 (NE), 2 (SW) and 3 (SE)
    pub fn add_corner_vertices(&mut self) -> Result<()> {
        let d = self.canvas.vertex_diameter;
        let r = self.canvas.vertex_radius();
        let right = self.canvas.width - d;
        let bottom = self.canvas.graph_height() - d;
        let corners = [(0, 0), (right, 0), (0, bottom), (right, bottom)];
        for (index, (x, y)) in corners.into_iter().enumerate() {
            let label = char::from_digit(index as u32, 10).unwrap_or('0');
            self.graph.add_vertex(label, Point::new(x + r, y + r))?;
        }
        self.notify_graph_update();
        Ok(())
    }

    fn notify_mode_update(&mut self, mode: Mode) {
        for listener in self.listeners.iter_mut() {
            listener.update_mode(mode);
        }
    }

    fn notify_algorithm_update(&mut self, algorithm: AlgorithmType) {
        for listener in self.listeners.iter_mut() {
            listener.update_algorithm(algorithm);
        }
    }

    fn notify_algorithm_state_update(&mut self) {
        if let Some(model) = &self.algorithm_model {
            for listener in self.listeners.iter_mut() {
                listener.update_algorithm_state(model);
            }
        }
    }

    fn notify_graph_update(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener.update_graph(&self.graph);
        }
    }

    fn algorithm_is_running(&self) -> bool {
        self.algorithm_state()
            .is_some_and(|state| state != AlgorithmState::Stopped)
    }

    /// 切換模式；執行中的演算法會先被停止
    pub fn set_mode(&mut self, mode: Mode) {
        if self.algorithm_is_running() {
            self.switch_algorithm_state(AlgorithmState::Stopped);
        }
        tracing::debug!("setting mode to {}.", mode.mode_name());

        self.mode = mode;
        self.selected = None;
        self.graph.unselect();
        if mode == Mode::ResetMode {
            self.mode = Mode::START;
            self.graph.clear();
        }
        self.notify_mode_update(mode);
        self.notify_graph_update();
    }

    /// request a full graph reset (File -> New)
    pub fn request_reset_graph(&mut self) {
        self.set_mode(Mode::ResetMode);
    }

    pub fn switch_algorithm_state(&mut self, new_state: AlgorithmState) {
        let Some(model) = self.algorithm_model.as_mut() else {
            return;
        };
        model.set_state(new_state);
        tracing::debug!("switching algorithm state to {:?}.", new_state);
        if new_state == AlgorithmState::Stopped {
            self.player.stop();
            self.algorithm = None;
        }
        self.notify_algorithm_state_update();
    }

    /// transfer the algorithm result and signal termination
    pub fn propagate_algorithm_result(&mut self, result: String) {
        if let Some(model) = self.algorithm_model.as_mut() {
            model.set_result_text(result);
        }
        self.switch_algorithm_state(AlgorithmState::Terminated);
    }

    pub fn start_algorithm(&mut self, algorithm_type: AlgorithmType) {
        self.set_mode(Mode::None);
        self.algorithm = Some(algorithm_for(algorithm_type));
        self.notify_algorithm_update(algorithm_type);
        self.algorithm_model = Some(AlgorithmModel::new());
        tracing::debug!("starting algorithm {}.", algorithm_type.algorithm_name());
        self.notify_algorithm_state_update();
    }

    /// A click on the canvas. `input` carries the answer of the vertex id or edge weight
    /// dialog; `None` means the dialog was cancelled.
    pub fn click(&mut self, point: Point, input: Option<&str>) -> Result<ClickOutcome> {
        tracing::debug!("Mouse clicked {}", point);
        if !self.canvas.contains(&point) {
            return Err(VisualizerError::OutOfBounds {
                x: point.x,
                y: point.y,
            });
        }
        if self.algorithm.is_some() {
            return self.click_algorithm(point);
        }
        match self.mode {
            Mode::AddVertex => self.handle_place_vertex(point, input),
            Mode::AddEdge => self.handle_place_edge(point, input),
            Mode::RemoveVertex => Ok(self.handle_remove_vertex(point)),
            Mode::RemoveEdge => Ok(self.handle_remove_edge(point)),
            Mode::None | Mode::ResetMode => Ok(ClickOutcome::Ignored),
        }
    }

    fn click_algorithm(&mut self, point: Point) -> Result<ClickOutcome> {
        let Some(start) = self.graph.vertex_at(&point) else {
            return Ok(ClickOutcome::Ignored);
        };
        tracing::debug!("Vertex clicked {}", start);
        self.player.stop();
        self.graph.unselect();
        self.switch_algorithm_state(AlgorithmState::Running);

        let algorithm = self
            .algorithm
            .as_mut()
            .ok_or_else(|| VisualizerError::command("no algorithm selected"))?;
        let traversal = algorithm.perform(&mut self.graph, start)?;
        tracing::debug!(
            "{} from {} yields {} steps",
            algorithm.algorithm_type().algorithm_name(),
            start,
            traversal.steps.len()
        );
        self.player.play(traversal);
        self.notify_graph_update();
        Ok(ClickOutcome::AlgorithmStarted(start))
    }

    /// place a new vertex centered at the click, if the spot is free
    fn handle_place_vertex(&mut self, point: Point, input: Option<&str>) -> Result<ClickOutcome> {
        if !self.graph.is_free(&point) {
            return Ok(ClickOutcome::Ignored);
        }
        let Some(input) = input else {
            return Ok(ClickOutcome::Cancelled);
        };
        let label = validate_vertex_label(input)?;
        self.graph.add_vertex(label, point)?;
        self.notify_graph_update();
        Ok(ClickOutcome::VertexAdded(label))
    }

    /// first click selects a vertex, the second one on another vertex adds the edge
    fn handle_place_edge(&mut self, point: Point, input: Option<&str>) -> Result<ClickOutcome> {
        let Some(vertex) = self.graph.vertex_at(&point) else {
            return Ok(ClickOutcome::Ignored);
        };
        tracing::debug!("Vertex {} clicked!", vertex);
        let Some(first) = self.selected else {
            self.selected = Some(vertex);
            self.graph.select_vertex(vertex);
            self.notify_graph_update();
            return Ok(ClickOutcome::VertexSelected(vertex));
        };
        if first == vertex {
            return Ok(ClickOutcome::Ignored);
        }

        let outcome = match input {
            None => Ok(ClickOutcome::Cancelled),
            Some(input) => {
                // an invalid weight keeps the selection, so the user can answer again
                let weight = validate_edge_weight(input)?;
                self.graph
                    .add_edge(first, vertex, weight)
                    .map(|_| ClickOutcome::EdgeAdded(first, vertex))
            }
        };
        self.selected = None;
        self.graph.unselect();
        self.notify_graph_update();
        outcome
    }

    fn handle_remove_vertex(&mut self, point: Point) -> ClickOutcome {
        let Some(vertex) = self.graph.vertex_at(&point) else {
            return ClickOutcome::Ignored;
        };
        match self.graph.remove_vertex_with_edges(vertex) {
            Ok(_) => {
                self.notify_graph_update();
                ClickOutcome::VertexRemoved(vertex)
            }
            Err(_) => ClickOutcome::Ignored,
        }
    }

    fn handle_remove_edge(&mut self, point: Point) -> ClickOutcome {
        let Some((from, to)) = self.graph.edge_at(&point) else {
            return ClickOutcome::Ignored;
        };
        match self.graph.remove_edge(from, to) {
            Ok(edge) => {
                tracing::debug!("Edge '{}' clicked", edge.name());
                self.notify_graph_update();
                ClickOutcome::EdgeRemoved(from, to)
            }
            Err(_) => ClickOutcome::Ignored,
        }
    }

    /// play one step of the running traversal
    pub fn tick(&mut self) -> PlayerTick {
        let tick = self.player.tick();
        match &tick {
            PlayerTick::Step(step) => {
                tracing::debug!(
                    "playing {} -> {}, {} steps left",
                    step.from,
                    step.to,
                    self.player.remaining()
                );
                self.graph.select_edge_and_neighbor(step);
                self.notify_graph_update();
            }
            PlayerTick::Finished(result) => self.propagate_algorithm_result(result.clone()),
            PlayerTick::Idle => {}
        }
        tick
    }

    /// play the running traversal to its end, waiting `delay` before every tick
    pub async fn play_to_end(&mut self, delay: Duration) {
        while self.player.is_playing() {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.tick();
        }
    }

    /// replace the graph by a saved one; a running algorithm is stopped
    pub fn load_snapshot(&mut self, snapshot: &GraphSnapshot) -> Result<()> {
        let graph = GraphModel::from_snapshot(snapshot, &self.canvas)?;
        self.set_mode(Mode::ResetMode);
        self.graph = graph;
        tracing::debug!(
            "loaded graph with {} vertices and {} edges",
            self.graph.vertices().len(),
            self.graph.edges().len()
        );
        self.notify_graph_update();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingListener {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl ApplicationModelListener for RecordingListener {
        fn update_mode(&mut self, mode: Mode) {
            self.events.lock().unwrap().push(format!("mode:{:?}", mode));
        }

        fn update_algorithm(&mut self, algorithm: AlgorithmType) {
            self.events
                .lock()
                .unwrap()
                .push(format!("algorithm:{:?}", algorithm));
        }

        fn update_algorithm_state(&mut self, algorithm_model: &AlgorithmModel) {
            self.events
                .lock()
                .unwrap()
                .push(format!("state:{:?}", algorithm_model.state()));
        }
    }

    fn model_with_path() -> ApplicationModel {
        let mut model = ApplicationModel::new(CanvasSettings::default());
        model.click(Point::new(100, 100), Some("A")).unwrap();
        model.click(Point::new(300, 100), Some("B")).unwrap();
        model.click(Point::new(500, 100), Some("C")).unwrap();
        model.set_mode(Mode::AddEdge);
        model.click(Point::new(100, 100), None).unwrap();
        model.click(Point::new(300, 100), Some("2")).unwrap();
        model.click(Point::new(300, 100), None).unwrap();
        model.click(Point::new(500, 100), Some("3")).unwrap();
        model
    }

    #[test]
    fn test_corner_vertices() {
        let mut model = ApplicationModel::new(CanvasSettings::default());
        model.add_corner_vertices().unwrap();
        let centers: Vec<(char, Point)> = model
            .graph()
            .vertices()
            .iter()
            .map(|v| (v.label, v.center))
            .collect();
        assert_eq!(
            centers,
            vec![
                ('0', Point::new(25, 25)),
                ('1', Point::new(775, 25)),
                ('2', Point::new(25, 470)),
                ('3', Point::new(775, 470)),
            ]
        );
    }

    #[test]
    fn test_add_vertex_mode() {
        let mut model = ApplicationModel::new(CanvasSettings::default());
        assert_eq!(
            model.click(Point::new(200, 200), Some("X")).unwrap(),
            ClickOutcome::VertexAdded('X')
        );
        // occupied spot
        assert_eq!(
            model.click(Point::new(210, 210), Some("Y")).unwrap(),
            ClickOutcome::Ignored
        );
        assert_eq!(
            model.click(Point::new(400, 200), None).unwrap(),
            ClickOutcome::Cancelled
        );
        assert!(model.click(Point::new(400, 200), Some("XY")).is_err());
        assert!(model.click(Point::new(900, 200), Some("Z")).is_err());
        assert_eq!(model.graph().vertices().len(), 1);
    }

    #[test]
    fn test_add_edge_mode_selects_then_connects() {
        let mut model = model_with_path();
        assert_eq!(model.graph().edges().len(), 2);
        assert_eq!(model.selected(), None);

        model.click(Point::new(100, 100), None).unwrap();
        assert_eq!(model.selected(), Some('A'));
        // clicking the selected vertex again does nothing
        assert_eq!(
            model.click(Point::new(100, 100), Some("1")).unwrap(),
            ClickOutcome::Ignored
        );
        // invalid weight keeps the selection
        assert!(model.click(Point::new(500, 100), Some("12")).is_err());
        assert_eq!(model.selected(), Some('A'));
        assert_eq!(
            model.click(Point::new(500, 100), Some("-4")).unwrap(),
            ClickOutcome::EdgeAdded('A', 'C')
        );
        assert_eq!(model.selected(), None);
        assert_eq!(model.graph().edge('C', 'A').unwrap().weight, -4);
    }

    #[test]
    fn test_remove_modes() {
        let mut model = model_with_path();
        model.set_mode(Mode::RemoveEdge);
        assert_eq!(
            model.click(Point::new(200, 102), None).unwrap(),
            ClickOutcome::EdgeRemoved('A', 'B')
        );
        model.set_mode(Mode::RemoveVertex);
        assert_eq!(
            model.click(Point::new(500, 100), None).unwrap(),
            ClickOutcome::VertexRemoved('C')
        );
        assert!(model.graph().edges().is_empty());
        model.set_mode(Mode::None);
        assert_eq!(
            model.click(Point::new(100, 100), None).unwrap(),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn test_algorithm_lifecycle() {
        let mut model = model_with_path();
        let listener = RecordingListener::default();
        model.register_listener(Box::new(listener.clone()));

        model.start_algorithm(AlgorithmType::DepthFirst);
        assert_eq!(model.mode(), Mode::None);
        assert_eq!(model.algorithm_state(), Some(AlgorithmState::SelectVertex));

        // clicking empty canvas does not start it
        assert_eq!(
            model.click(Point::new(400, 400), None).unwrap(),
            ClickOutcome::Ignored
        );
        assert_eq!(
            model.click(Point::new(100, 100), None).unwrap(),
            ClickOutcome::AlgorithmStarted('A')
        );
        assert_eq!(model.algorithm_state(), Some(AlgorithmState::Running));
        assert!(model.is_playing());

        assert!(matches!(model.tick(), PlayerTick::Step(_)));
        assert!(model.graph().vertex('B').unwrap().visited);
        assert!(matches!(model.tick(), PlayerTick::Step(_)));
        assert_eq!(
            model.tick(),
            PlayerTick::Finished("DFS : A -> B -> C".to_string())
        );
        assert_eq!(model.algorithm_state(), Some(AlgorithmState::Terminated));
        assert_eq!(
            model.algorithm_model().unwrap().display_text(),
            Some("DFS : A -> B -> C")
        );

        model.set_mode(Mode::AddVertex);
        assert_eq!(model.algorithm_state(), Some(AlgorithmState::Stopped));
        assert_eq!(model.algorithm_type(), None);

        let events = listener.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "mode:None",
                "algorithm:DepthFirst",
                "state:SelectVertex",
                "state:Running",
                "state:Terminated",
                "state:Stopped",
                "mode:AddVertex",
            ]
        );
    }

    #[test]
    fn test_mode_change_stops_playback() {
        let mut model = model_with_path();
        model.start_algorithm(AlgorithmType::BreadthFirst);
        model.click(Point::new(100, 100), None).unwrap();
        model.tick();
        model.set_mode(Mode::AddEdge);
        assert!(!model.is_playing());
        assert_eq!(model.algorithm_state(), Some(AlgorithmState::Stopped));
        assert!(model.graph().vertices().iter().all(|v| !v.selected));
    }

    #[test]
    fn test_clicks_outside_canvas_are_rejected_in_every_mode() {
        let mut model = model_with_path();
        model.add_corner_vertices().unwrap();
        let far_away = [
            Point::new(i32::MIN, 0),
            Point::new(0, i32::MAX),
            Point::new(-1, 100),
            Point::new(100, 495),
        ];
        for mode in [Mode::AddVertex, Mode::AddEdge, Mode::RemoveVertex, Mode::RemoveEdge] {
            model.set_mode(mode);
            for point in far_away {
                assert!(matches!(
                    model.click(point, Some("Z")),
                    Err(VisualizerError::OutOfBounds { .. })
                ));
            }
        }
        model.start_algorithm(AlgorithmType::DepthFirst);
        assert!(model.click(Point::new(i32::MIN, i32::MIN), None).is_err());
        assert_eq!(model.algorithm_state(), Some(AlgorithmState::SelectVertex));
        assert_eq!(model.graph().vertices().len(), 7);
        assert_eq!(model.graph().edges().len(), 2);
    }

    #[test]
    fn test_load_snapshot_outside_canvas_keeps_graph() {
        let mut model = model_with_path();
        let mut snapshot = model.graph().snapshot();
        snapshot.vertices[0].x = 2_000_000_000;
        assert!(model.load_snapshot(&snapshot).is_err());
        assert_eq!(model.graph().vertices().len(), 3);
    }

    #[test]
    fn test_reset_clears_graph() {
        let mut model = model_with_path();
        model.set_mode(Mode::RemoveVertex);
        model.request_reset_graph();
        assert!(model.graph().is_empty());
        assert_eq!(model.mode(), Mode::START);
    }

    #[tokio::test]
    async fn test_play_to_end_terminates() {
        let mut model = model_with_path();
        model.start_algorithm(AlgorithmType::Prim);
        model.click(Point::new(300, 100), None).unwrap();
        model.play_to_end(Duration::ZERO).await;
        assert!(!model.is_playing());
        assert_eq!(
            model.algorithm_model().unwrap().display_text(),
            Some("A=B, C=B")
        );
        assert!(model.graph().edges().iter().all(|e| e.selected));
    }
}
