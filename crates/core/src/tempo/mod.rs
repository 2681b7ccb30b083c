use serde::Serialize;

use crate::{Result, RhythmError};

/// Number of milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60_000;

/// Fixed tempo of a track together with the offset of its first beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TempoSpec {
    bpm: u32,
    first_beat_ms: u32,
}

impl TempoSpec {
    /// Validates `bpm` and builds the tempo.
    ///
    /// Tempos above 60000 bpm are rejected as well as zero, since their beat
    /// interval truncates to zero milliseconds.
    pub fn new(bpm: u32, first_beat_ms: u32) -> Result<Self> {
        if bpm == 0 || i64::from(bpm) > MS_PER_MINUTE {
            return Err(RhythmError::InvalidTempo {
                bpm: i64::from(bpm),
            });
        }

        Ok(Self { bpm, first_beat_ms })
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn first_beat_ms(&self) -> i64 {
        i64::from(self.first_beat_ms)
    }

    /// Milliseconds between consecutive beats, truncated to whole
    /// milliseconds.
    pub fn beat_interval_ms(&self) -> i64 {
        MS_PER_MINUTE / i64::from(self.bpm)
    }
}
