use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GameConfig;
use crate::events::GameOverSummary;
use crate::session::Session;

/// Best score across the sessions of one process. Lives in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    max_score: u64,
    games_played: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_score(max_score: u64) -> Self {
        Self {
            max_score,
            games_played: 0,
        }
    }

    pub fn max_score(&self) -> u64 {
        self.max_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn start<R: RngCore>(&self, config: GameConfig, rng: R) -> Session<R> {
        Session::new(config, rng, self.max_score)
    }

    pub fn start_seeded(&self, config: GameConfig, seed: u64) -> Session {
        Session::seeded(config, seed, self.max_score)
    }

    /// Folds a finished game in. Returns true when it set a new best.
    pub fn record(&mut self, summary: &GameOverSummary) -> bool {
        self.games_played += 1;
        if summary.final_score <= self.max_score {
            return false;
        }
        info!(
            previous = self.max_score,
            score = summary.final_score,
            "new max score"
        );
        self.max_score = summary.final_score;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(final_score: u64) -> GameOverSummary {
        GameOverSummary {
            final_score,
            max_score: final_score,
            new_max: true,
        }
    }

    #[test]
    fn only_a_strictly_higher_score_replaces_the_max() {
        let mut board = Scoreboard::with_max_score(100);
        assert!(!board.record(&summary(100)));
        assert!(!board.record(&summary(40)));
        assert_eq!(board.max_score(), 100);
        assert!(board.record(&summary(101)));
        assert_eq!(board.max_score(), 101);
        assert_eq!(board.games_played(), 3);
    }

    #[test]
    fn sessions_start_with_the_current_max() {
        let board = Scoreboard::with_max_score(9000);
        let session = board.start_seeded(GameConfig::default(), 5);
        assert_eq!(session.max_score(), 9000);
        assert_eq!(session.score(), 0);
    }
}
