use serde::{Deserialize, Serialize};

use crate::JudgmentResult;

/// Running score fed by judgment results. The score is unbounded in both
/// directions.
#[derive(Debug, Default, Clone)]
pub struct ScoreTracker {
    score: i64,
    hits: u32,
    misses: u32,
    invalid: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one judgment and returns the new score.
    pub fn apply(&mut self, result: JudgmentResult) -> i64 {
        match result {
            JudgmentResult::Hit => {
                self.score += 1;
                self.hits += 1;
            }
            JudgmentResult::Miss => {
                self.score -= 1;
                self.misses += 1;
            }
            JudgmentResult::Invalid => self.invalid += 1,
        }
        self.score
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            score: self.score,
            hits: self.hits,
            misses: self.misses,
            invalid: self.invalid,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// End-of-run tally handed to the host for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: i64,
    pub hits: u32,
    pub misses: u32,
    pub invalid: u32,
}

impl ScoreSummary {
    /// Share of judged presses that hit, ignoring presses before the first
    /// beat.
    pub fn accuracy(&self) -> Option<f32> {
        let judged = self.hits + self.misses;
        (judged > 0).then(|| self.hits as f32 / judged as f32)
    }
}
