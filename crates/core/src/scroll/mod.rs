use serde::{Deserialize, Serialize};

use crate::{BeatSchedule, Result, RhythmError};

/// Beats per bar used to pick out downbeats.
pub const BEATS_PER_BAR: usize = 4;

/// Visible slice of the track for one render tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewWindow {
    current_ms: i64,
    travel_time_ms: u32,
    viewport_width_px: f32,
}

impl ViewWindow {
    pub fn new(current_ms: i64, travel_time_ms: u32, viewport_width_px: f32) -> Result<Self> {
        if travel_time_ms == 0 {
            return Err(RhythmError::InvalidWindow {
                travel_time_ms: i64::from(travel_time_ms),
            });
        }

        Ok(Self {
            current_ms,
            travel_time_ms,
            viewport_width_px,
        })
    }

    pub fn current_ms(&self) -> i64 {
        self.current_ms
    }

    pub fn travel_time_ms(&self) -> u32 {
        self.travel_time_ms
    }

    pub fn viewport_width_px(&self) -> f32 {
        self.viewport_width_px
    }

    /// Last timestamp that is still on screen.
    pub fn end_ms(&self) -> i64 {
        self.current_ms.saturating_add(i64::from(self.travel_time_ms))
    }

    pub fn contains(&self, timestamp_ms: i64) -> bool {
        (self.current_ms..=self.end_ms()).contains(&timestamp_ms)
    }

    /// Horizontal position of a visible timestamp; `0` is the current time
    /// and `viewport_width_px` is one travel time ahead.
    pub fn project(&self, timestamp_ms: i64) -> f32 {
        let ahead = timestamp_ms.saturating_sub(self.current_ms) as f64;
        let ratio = ahead / f64::from(self.travel_time_ms);
        (ratio * f64::from(self.viewport_width_px)) as f32
    }
}

/// A beat placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleBeat {
    pub index: usize,
    pub timestamp_ms: i64,
    pub x: f32,
    pub is_downbeat: bool,
}

pub fn is_downbeat(index: usize) -> bool {
    index % BEATS_PER_BAR == 0
}

/// Projects the beats inside `window` onto the viewport.
///
/// Positions are derived from the window alone, so nothing drifts from one
/// frame to the next. The returned iterator borrows the schedule and holds no
/// other state; call again for the next tick.
pub fn visible_beats(
    schedule: &BeatSchedule,
    window: ViewWindow,
) -> impl Iterator<Item = VisibleBeat> + '_ {
    let beats = schedule.as_slice();
    let start = beats.partition_point(|&ts| ts < window.current_ms());

    beats[start..]
        .iter()
        .enumerate()
        .take_while(move |(_, ts)| **ts <= window.end_ms())
        .map(move |(offset, &timestamp_ms)| {
            let index = start + offset;
            VisibleBeat {
                index,
                timestamp_ms,
                x: window.project(timestamp_ms),
                is_downbeat: is_downbeat(index),
            }
        })
}

/// Scroll settings that stay fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollProjector {
    travel_time_ms: u32,
}

impl ScrollProjector {
    pub fn new(travel_time_ms: u32) -> Result<Self> {
        ViewWindow::new(0, travel_time_ms, 0.0)?;
        Ok(Self { travel_time_ms })
    }

    pub fn travel_time_ms(&self) -> u32 {
        self.travel_time_ms
    }

    pub fn window(&self, current_ms: i64, viewport_width_px: f32) -> ViewWindow {
        ViewWindow {
            current_ms,
            travel_time_ms: self.travel_time_ms,
            viewport_width_px,
        }
    }

    pub fn visible_beats<'a>(
        &self,
        schedule: &'a BeatSchedule,
        current_ms: i64,
        viewport_width_px: f32,
    ) -> impl Iterator<Item = VisibleBeat> + 'a {
        visible_beats(schedule, self.window(current_ms, viewport_width_px))
    }
}
