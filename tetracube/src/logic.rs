use engine::GameLogic;

use crate::config::GameConfig;
use crate::input::Command;
use crate::session::Session;

/// Replayable game for `engine::HeadlessRunner`: one step per frame, with at
/// most one command applied before the frame advances.
#[derive(Debug, Clone)]
pub struct TetracubeLogic {
    config: GameConfig,
    seed: u64,
    max_score: u64,
}

impl TetracubeLogic {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            max_score: 0,
        }
    }

    pub fn with_max_score(mut self, max_score: u64) -> Self {
        self.max_score = max_score;
        self
    }
}

impl GameLogic for TetracubeLogic {
    type State = Session;
    type Input = Option<Command>;

    fn initial_state(&self) -> Self::State {
        Session::seeded(self.config, self.seed, self.max_score)
    }

    // Each recorded state keeps only the events of its own frame.
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        next.take_events();
        if let Some(command) = input {
            next.apply(command);
        }
        next.update();
        next
    }
}

#[cfg(test)]
mod tests {
    use engine::HeadlessRunner;

    use super::*;
    use crate::input::Direction;

    #[test]
    fn runner_replays_and_rewinds_sessions() {
        let mut runner = HeadlessRunner::new(TetracubeLogic::new(GameConfig::default(), 11));
        runner.run(std::iter::repeat_n(None, 61));
        assert_eq!(runner.state().score(), 1);
        assert_eq!(runner.state().frame(), 61);

        runner.rewind(1);
        assert_eq!(runner.state().score(), 0);
        assert_eq!(runner.state().frame(), 60);
    }

    #[test]
    fn step_drops_events_from_earlier_frames() {
        let logic = TetracubeLogic::new(GameConfig::default(), 11);
        let initial = logic.initial_state();
        assert_eq!(initial.events().len(), 1);

        let next = logic.step(&initial, Some(Command::Move(Direction::West)));
        assert!(next.events().len() <= 1);
    }
}
