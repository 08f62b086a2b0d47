use std::collections::HashMap;

use crate::domain::model::AlgorithmState;

/// 追蹤演算法執行狀態，以及每個狀態下結果列要顯示的文字
#[derive(Debug, Clone)]
pub struct AlgorithmModel {
    state: AlgorithmState,
    state_texts: HashMap<AlgorithmState, String>,
}

impl AlgorithmModel {
    pub fn new() -> Self {
        let mut state_texts = HashMap::new();
        state_texts.insert(
            AlgorithmState::SelectVertex,
            "Please choose a starting vertex".to_string(),
        );
        state_texts.insert(AlgorithmState::Running, "Please wait...".to_string());
        Self {
            state: AlgorithmState::SelectVertex,
            state_texts,
        }
    }

    pub fn state(&self) -> AlgorithmState {
        self.state
    }

    pub fn set_state(&mut self, state: AlgorithmState) {
        self.state = state;
    }

    /// called when the algorithm finished playing; the text is shown once the state is Terminated
    pub fn set_result_text(&mut self, result: impl Into<String>) {
        self.state_texts
            .insert(AlgorithmState::Terminated, result.into());
    }

    pub fn display_text(&self) -> Option<&str> {
        self.state_texts.get(&self.state).map(String::as_str)
    }
}

impl Default for AlgorithmModel {
    fn default() -> Self {
        Self::new()
    }
}
