use serde::{Deserialize, Serialize};

use crate::{Result, RhythmError, TempoSpec};

/// Outcome of judging a single player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JudgmentResult {
    Hit,
    Miss,
    /// The action happened before the first beat.
    Invalid,
}

/// Tolerance window that has been checked against a tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tolerance {
    ms: u32,
}

impl Tolerance {
    /// Accepts `ms` only if it is strictly less than half the beat interval,
    /// otherwise the windows around neighbouring beats overlap.
    pub fn new(ms: u32, tempo: &TempoSpec) -> Result<Self> {
        let beat_interval_ms = tempo.beat_interval_ms();
        if 2 * i64::from(ms) >= beat_interval_ms {
            return Err(RhythmError::InvalidTolerance {
                tolerance_ms: i64::from(ms),
                beat_interval_ms,
            });
        }

        Ok(Self { ms })
    }

    pub fn ms(&self) -> u32 {
        self.ms
    }
}

/// Judges `current_ms` against the beat grid of `tempo`.
///
/// The window wraps across the beat boundary: a press just before beat `n`
/// lands near the end of the interval that started at beat `n - 1`.
pub fn judge(current_ms: i64, tempo: &TempoSpec, tolerance: Tolerance) -> JudgmentResult {
    let Some(offset) = offset_from_first_beat(current_ms, tempo) else {
        return JudgmentResult::Invalid;
    };

    let interval = tempo.beat_interval_ms();
    let tolerance = i64::from(tolerance.ms());
    let distance = offset % interval;

    if distance < tolerance || distance > interval - tolerance {
        JudgmentResult::Hit
    } else {
        JudgmentResult::Miss
    }
}

/// Milliseconds since the first beat, or `None` before it.
fn offset_from_first_beat(current_ms: i64, tempo: &TempoSpec) -> Option<i64> {
    current_ms
        .checked_sub(tempo.first_beat_ms())
        .filter(|offset| *offset >= 0)
}

/// Tempo paired with a validated tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgmentEngine {
    tempo: TempoSpec,
    tolerance: Tolerance,
}

impl JudgmentEngine {
    pub fn new(tempo: TempoSpec, tolerance_ms: u32) -> Result<Self> {
        let tolerance = Tolerance::new(tolerance_ms, &tempo)?;
        Ok(Self { tempo, tolerance })
    }

    pub fn tempo(&self) -> TempoSpec {
        self.tempo
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Judges a discrete press. Call once per press, never per frame.
    pub fn judge(&self, current_ms: i64) -> JudgmentResult {
        judge(current_ms, &self.tempo, self.tolerance)
    }

    /// Signed distance to the closest beat, negative when early.
    ///
    /// Returns `None` before the first beat.
    pub fn nearest_beat_error(&self, current_ms: i64) -> Option<i64> {
        let offset = offset_from_first_beat(current_ms, &self.tempo)?;
        let interval = self.tempo.beat_interval_ms();
        let distance = offset % interval;
        if distance * 2 <= interval {
            Some(distance)
        } else {
            Some(distance - interval)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(bpm: u32, first_beat_ms: u32, tolerance_ms: u32) -> JudgmentEngine {
        JudgmentEngine::new(TempoSpec::new(bpm, first_beat_ms).unwrap(), tolerance_ms).unwrap()
    }

    #[test]
    fn judges_boundaries_at_170_bpm() {
        let engine = engine(170, 500, 100);

        assert_eq!(engine.judge(500), JudgmentResult::Hit);
        assert_eq!(engine.judge(500 + 176), JudgmentResult::Miss);
        assert_eq!(engine.judge(499), JudgmentResult::Invalid);
    }

    #[test]
    fn window_edges_are_exclusive() {
        let engine = engine(170, 500, 100);

        assert_eq!(engine.judge(500 + 99), JudgmentResult::Hit);
        assert_eq!(engine.judge(500 + 100), JudgmentResult::Miss);
        assert_eq!(engine.judge(500 + 252), JudgmentResult::Miss);
        assert_eq!(engine.judge(500 + 253), JudgmentResult::Hit);
    }

    #[test]
    fn early_press_counts_for_next_beat() {
        let engine = engine(170, 500, 45);

        assert_eq!(engine.judge(500 + 352 - 10), JudgmentResult::Hit);
        assert_eq!(engine.nearest_beat_error(500 + 352 - 10), Some(-10));
        assert_eq!(engine.nearest_beat_error(500 + 352 + 10), Some(10));
        assert_eq!(engine.nearest_beat_error(10), None);
    }

    #[test]
    fn judgment_is_periodic_in_the_beat_interval() {
        let engine = engine(170, 500, 45);
        let interval = engine.tempo().beat_interval_ms();

        for current in 500..500 + interval {
            let base = engine.judge(current);
            for k in 1..20 {
                assert_eq!(engine.judge(current + k * interval), base);
            }
        }
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let engine = engine(170, 500, 45);

        assert_eq!(engine.judge(i64::MIN), JudgmentResult::Invalid);
        assert_eq!(engine.nearest_beat_error(i64::MIN), None);

        let offset = i64::MAX - 500;
        let expected = if offset % 352 < 45 || offset % 352 > 352 - 45 {
            JudgmentResult::Hit
        } else {
            JudgmentResult::Miss
        };
        assert_eq!(engine.judge(i64::MAX), expected);
        assert!(engine.nearest_beat_error(i64::MAX).is_some());
    }

    #[test]
    fn zero_tolerance_never_hits() {
        let engine = engine(120, 0, 0);
        assert!((0..2_000).all(|ms| engine.judge(ms) == JudgmentResult::Miss));
    }

    #[test]
    fn rejects_tolerance_at_or_above_half_interval() {
        let tempo = TempoSpec::new(170, 500).unwrap();

        assert!(Tolerance::new(175, &tempo).is_ok());
        let err = JudgmentEngine::new(tempo, 176).unwrap_err();
        assert!(matches!(
            err,
            RhythmError::InvalidTolerance {
                tolerance_ms: 176,
                beat_interval_ms: 352
            }
        ));
        assert!(JudgmentEngine::new(tempo, 1_000).is_err());
    }
}
