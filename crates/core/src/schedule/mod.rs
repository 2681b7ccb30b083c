use serde::Serialize;

use crate::TempoSpec;

/// Ordered beat timestamps in milliseconds since track start.
///
/// Built once per tempo and beat count and lent read-only to judgment and
/// scroll projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeatSchedule {
    tempo: TempoSpec,
    beats: Vec<i64>,
}

impl BeatSchedule {
    /// Generates `count` beats starting at the tempo's first beat.
    ///
    /// The interval is computed once and reused for every step, so the
    /// truncation error does not accumulate beyond `i * interval`.
    pub fn generate(tempo: TempoSpec, count: usize) -> Self {
        let first = tempo.first_beat_ms();
        let interval = tempo.beat_interval_ms();
        let beats = (0..count as i64).map(|i| first + i * interval).collect();

        Self { tempo, beats }
    }

    /// Generates every beat that falls within a track of the given length.
    pub fn covering(tempo: TempoSpec, track_length_ms: i64) -> Self {
        let span = track_length_ms - tempo.first_beat_ms();
        let count = if span < 0 {
            0
        } else {
            (span / tempo.beat_interval_ms() + 1) as usize
        };

        Self::generate(tempo, count)
    }

    pub fn tempo(&self) -> TempoSpec {
        self.tempo
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.beats.get(index).copied()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.beats
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.beats.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tempo(bpm: u32, first_beat_ms: u32) -> TempoSpec {
        TempoSpec::new(bpm, first_beat_ms).unwrap()
    }

    #[test]
    fn generates_evenly_spaced_beats() {
        for (bpm, first, count) in [(170, 500, 675), (60, 0, 10), (97, 13, 333), (60_000, 7, 50)] {
            let schedule = BeatSchedule::generate(tempo(bpm, first), count);
            let interval = 60_000 / i64::from(bpm);

            assert_eq!(schedule.len(), count);
            assert_eq!(schedule.get(0), Some(i64::from(first)));
            for pair in schedule.as_slice().windows(2) {
                assert!(pair[1] > pair[0]);
                assert_eq!(pair[1] - pair[0], interval);
            }
        }
    }

    #[test]
    fn empty_schedule_for_zero_count() {
        let schedule = BeatSchedule::generate(tempo(120, 0), 0);
        assert!(schedule.is_empty());
        assert_eq!(schedule.iter().count(), 0);
    }

    #[test]
    fn last_beat_has_no_accumulated_drift() {
        let schedule = BeatSchedule::generate(tempo(170, 500), 675);
        assert_eq!(schedule.get(674), Some(500 + 674 * 352));
    }

    #[test]
    fn covering_stops_at_track_end() {
        let schedule = BeatSchedule::covering(tempo(120, 100), 2_100);
        assert_eq!(schedule.as_slice(), &[100, 600, 1_100, 1_600, 2_100]);

        let schedule = BeatSchedule::covering(tempo(120, 100), 2_099);
        assert_eq!(schedule.len(), 4);
    }

    #[test]
    fn covering_is_empty_when_track_ends_before_first_beat() {
        let schedule = BeatSchedule::covering(tempo(120, 500), 499);
        assert!(schedule.is_empty());
    }
}
