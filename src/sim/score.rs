//! Score, session record and cadence tracking

use serde::{Deserialize, Serialize};

use crate::consts::SCORE_CADENCE;

/// What a single paddle hit changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitOutcome {
    /// Score landed on a multiple of the cadence (palette + speed step)
    pub cadence: bool,
    /// First hit this session to beat the stored high score
    pub new_record: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
    /// Set once the score passes the high score loaded at session start
    pub set_record: bool,
}

impl Scoreboard {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
            set_record: false,
        }
    }

    pub fn register_hit(&mut self) -> HitOutcome {
        self.score += 1;

        let mut outcome = HitOutcome {
            cadence: self.score % SCORE_CADENCE == 0,
            new_record: false,
        };

        if self.score > self.high_score {
            self.high_score = self.score;
            outcome.new_record = !self.set_record;
            self.set_record = true;
        }

        outcome
    }
}
