use serde::{Deserialize, Serialize};

use crate::{
    BeatSchedule, Feedback, JudgmentEngine, JudgmentResult, PlaybackSource, Result,
    ScoreSummary, ScoreTracker, ScrollProjector, SessionConfig, TimeMapper, VisibleBeat,
};

/// Turns a held/not-held input level into one press per transition.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionLatch {
    held: bool,
}

impl ActionLatch {
    /// Returns `true` only on the tick the action goes down.
    pub fn update(&mut self, held: bool) -> bool {
        let pressed = held && !self.held;
        self.held = held;
        pressed
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub current_ms: i64,
    pub judgment: Option<JudgmentResult>,
    pub score: i64,
}

impl TickOutcome {
    pub fn feedback(&self) -> Option<Feedback> {
        self.judgment.map(Feedback::from)
    }
}

/// All state for one play-through of a track.
///
/// Components only ever see copies of timestamps, the schedule is lent out
/// read-only and the score is only touched through [`ScoreTracker`].
#[derive(Debug, Clone)]
pub struct Session {
    mapper: TimeMapper,
    schedule: BeatSchedule,
    judgment: JudgmentEngine,
    projector: ScrollProjector,
    tracker: ScoreTracker,
    latch: ActionLatch,
}

impl Session {
    /// Validates the configuration and the source's sample rate. A rejected
    /// configuration never reaches judgment.
    pub fn new(config: &SessionConfig, samples_per_ms: u32) -> Result<Self> {
        Self::build(config, samples_per_ms).inspect_err(|err| {
            tracing::warn!(%err, ?config, "rejected session configuration");
        })
    }

    /// Builds a session around the rate reported by `source`.
    pub fn for_source(config: &SessionConfig, source: &impl PlaybackSource) -> Result<Self> {
        Self::new(config, source.samples_per_millisecond())
    }

    fn build(config: &SessionConfig, samples_per_ms: u32) -> Result<Self> {
        let judgment = config.judgment()?;
        let projector = config.projector()?;
        let tempo = judgment.tempo();
        let mapper = TimeMapper::new(samples_per_ms)?;
        let schedule = BeatSchedule::generate(tempo, config.beat_count);

        tracing::debug!(
            bpm = tempo.bpm(),
            beat_interval_ms = tempo.beat_interval_ms(),
            beats = schedule.len(),
            samples_per_ms,
            "session created"
        );

        Ok(Self {
            mapper,
            schedule,
            judgment,
            projector,
            tracker: ScoreTracker::new(),
            latch: ActionLatch::default(),
        })
    }

    /// Runs the input half of a frame: map the position, then judge and score
    /// if the action was pressed this tick. Project afterwards with
    /// [`Session::visible_beats`].
    pub fn tick(&mut self, raw_position: u64, action_held: bool) -> TickOutcome {
        let current_ms = self.mapper.to_milliseconds(raw_position);
        let judgment = self
            .latch
            .update(action_held)
            .then(|| self.judge_and_score(current_ms));

        TickOutcome {
            current_ms,
            judgment,
            score: self.tracker.score(),
        }
    }

    /// Ticks from a single read of `source`.
    pub fn tick_source(&mut self, source: &impl PlaybackSource, action_held: bool) -> TickOutcome {
        self.tick(source.current_raw_position(), action_held)
    }

    /// Judges and scores a discrete press at `current_ms`.
    pub fn press(&mut self, current_ms: i64) -> JudgmentResult {
        self.judge_and_score(current_ms)
    }

    fn judge_and_score(&mut self, current_ms: i64) -> JudgmentResult {
        let result = self.judgment.judge(current_ms);
        let score = self.tracker.apply(result);
        tracing::trace!(current_ms, ?result, score, "press judged");
        result
    }

    pub fn visible_beats(
        &self,
        current_ms: i64,
        viewport_width_px: f32,
    ) -> impl Iterator<Item = VisibleBeat> + '_ {
        self.projector
            .visible_beats(&self.schedule, current_ms, viewport_width_px)
    }

    pub fn schedule(&self) -> &BeatSchedule {
        &self.schedule
    }

    pub fn judgment(&self) -> &JudgmentEngine {
        &self.judgment
    }

    pub fn score(&self) -> i64 {
        self.tracker.score()
    }

    pub fn summary(&self) -> ScoreSummary {
        self.tracker.summary()
    }
}
