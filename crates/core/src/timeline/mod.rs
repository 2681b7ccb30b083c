use serde::{Deserialize, Serialize};

use crate::{Result, RhythmError};

/// Converts a sample rate in hertz to whole samples per millisecond.
pub fn samples_per_millisecond(sample_rate_hz: u32) -> Result<u32> {
    let samples_per_ms = sample_rate_hz / 1_000;
    TimeMapper::new(samples_per_ms)?;
    Ok(samples_per_ms)
}

/// Converts a raw playback position to milliseconds since track start.
pub fn to_milliseconds(raw_position: u64, samples_per_ms: u32) -> Result<i64> {
    Ok(TimeMapper::new(samples_per_ms)?.to_milliseconds(raw_position))
}

/// Owns the conversion from source-native positions to milliseconds.
///
/// Conversion truncates, so sub-millisecond precision is dropped while the
/// output stays monotonic for monotonic input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeMapper {
    samples_per_ms: u32,
}

impl TimeMapper {
    pub fn new(samples_per_ms: u32) -> Result<Self> {
        if samples_per_ms == 0 {
            return Err(RhythmError::InvalidSampleRate { samples_per_ms });
        }

        Ok(Self { samples_per_ms })
    }

    pub fn samples_per_ms(&self) -> u32 {
        self.samples_per_ms
    }

    pub fn to_milliseconds(&self, raw_position: u64) -> i64 {
        i64::try_from(raw_position / u64::from(self.samples_per_ms)).unwrap_or(i64::MAX)
    }
}

/// Audio collaborator that reports how far playback has progressed.
///
/// The core only reads positions; opening, decoding and closing the stream
/// stays with the implementor.
pub trait PlaybackSource {
    fn current_raw_position(&self) -> u64;

    fn total_raw_length(&self) -> u64;

    fn samples_per_millisecond(&self) -> u32;

    /// Reads the source once so a whole tick works from the same position.
    fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            raw_position: self.current_raw_position(),
            raw_length: self.total_raw_length(),
            samples_per_ms: self.samples_per_millisecond(),
        }
    }
}

/// Consistent per-tick view of a [`PlaybackSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub raw_position: u64,
    pub raw_length: u64,
    pub samples_per_ms: u32,
}

impl PlaybackSnapshot {
    pub fn mapper(&self) -> Result<TimeMapper> {
        TimeMapper::new(self.samples_per_ms)
    }

    pub fn current_ms(&self) -> Result<i64> {
        Ok(self.mapper()?.to_milliseconds(self.raw_position))
    }

    pub fn total_ms(&self) -> Result<i64> {
        Ok(self.mapper()?.to_milliseconds(self.raw_length))
    }

    /// Whole seconds played and whole seconds in the track.
    pub fn progress_seconds(&self) -> Result<(i64, i64)> {
        Ok((self.current_ms()? / 1_000, self.total_ms()? / 1_000))
    }

    pub fn is_finished(&self) -> bool {
        self.raw_position >= self.raw_length
    }
}

/// Deterministic playback source that advances in whole milliseconds.
#[derive(Debug, Clone)]
pub struct SyntheticPlayback {
    position: u64,
    length: u64,
    samples_per_ms: u32,
}

impl SyntheticPlayback {
    pub fn new(length_ms: u64, samples_per_ms: u32) -> Result<Self> {
        TimeMapper::new(samples_per_ms)?;
        Ok(Self {
            position: 0,
            length: length_ms.saturating_mul(u64::from(samples_per_ms)),
            samples_per_ms,
        })
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Moves the playhead forward, stopping at the end of the track.
    pub fn advance_ms(&mut self, delta_ms: u64) {
        let delta = delta_ms.saturating_mul(u64::from(self.samples_per_ms));
        self.position = self.position.saturating_add(delta).min(self.length);
    }
}

impl PlaybackSource for SyntheticPlayback {
    fn current_raw_position(&self) -> u64 {
        self.position
    }

    fn total_raw_length(&self) -> u64 {
        self.length
    }

    fn samples_per_millisecond(&self) -> u32 {
        self.samples_per_ms
    }
}
