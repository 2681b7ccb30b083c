//! Core library for the rhythm engine.
//!
//! The crate turns a fixed tempo into a beat schedule, judges player presses
//! against it, projects upcoming beats onto a scrolling viewport and keeps the
//! score. Audio decoding, input polling and drawing belong to the host; the
//! core only consumes playback positions and press events.

pub mod config;
pub mod error;
pub mod feedback;
pub mod judgment;
pub mod schedule;
pub mod score;
pub mod scroll;
pub mod session;
pub mod tempo;
pub mod timeline;

pub use config::SessionConfig;
pub use error::{Result, RhythmError};
pub use feedback::Feedback;
pub use judgment::{judge, JudgmentEngine, JudgmentResult, Tolerance};
pub use schedule::BeatSchedule;
pub use score::{ScoreSummary, ScoreTracker};
pub use scroll::{visible_beats, ScrollProjector, ViewWindow, VisibleBeat};
pub use session::{ActionLatch, Session, TickOutcome};
pub use tempo::TempoSpec;
pub use timeline::{
    samples_per_millisecond, to_milliseconds, PlaybackSnapshot, PlaybackSource,
    SyntheticPlayback, TimeMapper,
};
