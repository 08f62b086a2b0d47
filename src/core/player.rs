use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::model::{Traversal, TraversalStep};

pub const DEFAULT_PLAY_DELAY: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerTick {
    /// one more step has to be highlighted
    Step(TraversalStep),
    /// all steps played, the result is ready to be shown
    Finished(String),
    Idle,
}

/// Plays a traversal in slow motion: one step per tick, then the result.
#[derive(Debug, Default)]
pub struct Player {
    play_list: VecDeque<TraversalStep>,
    result: Option<String>,
}

impl Player {
    pub fn play(&mut self, traversal: Traversal) {
        self.play_list = traversal.steps.into();
        self.result = Some(traversal.result);
    }

    pub fn is_playing(&self) -> bool {
        self.result.is_some()
    }

    pub fn remaining(&self) -> usize {
        self.play_list.len()
    }

    pub fn tick(&mut self) -> PlayerTick {
        if let Some(step) = self.play_list.pop_front() {
            return PlayerTick::Step(step);
        }
        match self.result.take() {
            Some(result) => PlayerTick::Finished(result),
            None => PlayerTick::Idle,
        }
    }

    pub fn stop(&mut self) {
        self.play_list.clear();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plays_steps_then_result() {
        let mut player = Player::default();
        assert_eq!(player.tick(), PlayerTick::Idle);

        player.play(Traversal {
            steps: vec![TraversalStep::new('A', 'B'), TraversalStep::new('B', 'C')],
            result: "DFS : A -> B -> C".to_string(),
        });
        assert!(player.is_playing());
        assert_eq!(player.remaining(), 2);
        assert_eq!(player.tick(), PlayerTick::Step(TraversalStep::new('A', 'B')));
        assert_eq!(player.tick(), PlayerTick::Step(TraversalStep::new('B', 'C')));
        assert_eq!(
            player.tick(),
            PlayerTick::Finished("DFS : A -> B -> C".to_string())
        );
        assert!(!player.is_playing());
        assert_eq!(player.tick(), PlayerTick::Idle);
    }

    #[test]
    fn test_stop_discards_pending_steps() {
        let mut player = Player::default();
        player.play(Traversal {
            steps: vec![TraversalStep::new('A', 'B')],
            result: "BFS : A -> B".to_string(),
        });
        player.stop();
        assert!(!player.is_playing());
        assert_eq!(player.tick(), PlayerTick::Idle);
    }
}
