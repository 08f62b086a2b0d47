use std::sync::{Arc, Mutex};

use crate::core::algorithm_model::AlgorithmModel;
use crate::core::application::ApplicationModelListener;
use crate::domain::model::{AlgorithmState, Mode};

fn read(text: &Arc<Mutex<String>>) -> String {
    text.lock().map(|t| t.clone()).unwrap_or_default()
}

fn write(text: &Arc<Mutex<String>>, value: String) {
    if let Ok(mut guard) = text.lock() {
        *guard = value;
    }
}

/// Shows the current mode, e.g. `Current Mode -> Add a Vertex`.
///
/// Clones share the same text, so one clone can be registered as listener while another
/// is kept for reading.
#[derive(Debug, Clone)]
pub struct StatusLabel {
    text: Arc<Mutex<String>>,
}

impl StatusLabel {
    pub fn new(mode: Mode) -> Self {
        Self {
            text: Arc::new(Mutex::new(Self::format(mode))),
        }
    }

    fn format(mode: Mode) -> String {
        format!("Current Mode -> {}", mode.mode_name())
    }

    pub fn text(&self) -> String {
        read(&self.text)
    }
}

impl ApplicationModelListener for StatusLabel {
    fn update_mode(&mut self, mode: Mode) {
        write(&self.text, Self::format(mode));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBackground {
    Panel,
    Highlighted,
}

#[derive(Debug, Clone, Default)]
struct ResultState {
    text: String,
    highlighted: bool,
}

/// Shows the algorithm state texts and the result once the algorithm terminated.
#[derive(Debug, Clone, Default)]
pub struct ResultLabel {
    state: Arc<Mutex<ResultState>>,
}

impl ResultLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.state
            .lock()
            .map(|s| s.text.clone())
            .unwrap_or_default()
    }

    /// the display panel turns gray while waiting for a start vertex
    pub fn background(&self) -> DisplayBackground {
        match self.state.lock().map(|s| s.highlighted) {
            Ok(true) => DisplayBackground::Highlighted,
            _ => DisplayBackground::Panel,
        }
    }
}

impl ApplicationModelListener for ResultLabel {
    fn update_algorithm_state(&mut self, algorithm_model: &AlgorithmModel) {
        if let Ok(mut state) = self.state.lock() {
            match algorithm_model.state() {
                AlgorithmState::SelectVertex => state.highlighted = true,
                AlgorithmState::Stopped => state.highlighted = false,
                AlgorithmState::Running | AlgorithmState::Terminated => {}
            }
            state.text = algorithm_model
                .display_text()
                .unwrap_or_default()
                .to_string();
        }
    }
}
