use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{JudgmentEngine, Result, RhythmError, ScrollProjector, TempoSpec};

/// Everything a session needs before the first tick.
///
/// Tempo, tolerance and travel time are signed so that out-of-range values,
/// negatives included, are reported with their own error variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub bpm: i64,
    pub first_beat_ms: u32,
    pub tolerance_ms: i64,
    pub beat_count: usize,
    pub travel_time_ms: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bpm: 170,
            first_beat_ms: 500,
            tolerance_ms: 45,
            beat_count: 675,
            travel_time_ms: 2_000,
        }
    }
}

impl SessionConfig {
    /// Parses a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn tempo(&self) -> Result<TempoSpec> {
        let bpm =
            u32::try_from(self.bpm).map_err(|_| RhythmError::InvalidTempo { bpm: self.bpm })?;
        TempoSpec::new(bpm, self.first_beat_ms)
    }

    pub fn judgment(&self) -> Result<JudgmentEngine> {
        let tempo = self.tempo()?;
        let tolerance_ms =
            u32::try_from(self.tolerance_ms).map_err(|_| RhythmError::InvalidTolerance {
                tolerance_ms: self.tolerance_ms,
                beat_interval_ms: tempo.beat_interval_ms(),
            })?;
        JudgmentEngine::new(tempo, tolerance_ms)
    }

    pub fn projector(&self) -> Result<ScrollProjector> {
        let travel_time_ms =
            u32::try_from(self.travel_time_ms).map_err(|_| RhythmError::InvalidWindow {
                travel_time_ms: self.travel_time_ms,
            })?;
        ScrollProjector::new(travel_time_ms)
    }

    /// Checks tempo, tolerance and travel time without building a session.
    pub fn validate(&self) -> Result<()> {
        self.judgment()?;
        self.projector()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SessionConfig::from_json_str(r#"{ "bpm": 120, "tolerance_ms": 60 }"#).unwrap();

        assert_eq!(config.bpm, 120);
        assert_eq!(config.tolerance_ms, 60);
        assert_eq!(config.first_beat_ms, 500);
        assert_eq!(config.beat_count, 675);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = SessionConfig::from_json_str("{ bpm: }").unwrap_err();
        assert!(matches!(err, RhythmError::Config(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn negative_values_map_to_their_error_kind() {
        let config = SessionConfig::from_json_str(r#"{ "bpm": -120 }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(RhythmError::InvalidTempo { bpm: -120 })
        ));

        let config = SessionConfig::from_json_str(r#"{ "tolerance_ms": -5 }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(RhythmError::InvalidTolerance {
                tolerance_ms: -5,
                beat_interval_ms: 352
            })
        ));

        let config = SessionConfig::from_json_str(r#"{ "travel_time_ms": -1 }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(RhythmError::InvalidWindow { travel_time_ms: -1 })
        ));

        let config = SessionConfig::from_json_str(r#"{ "bpm": 5000000000 }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(RhythmError::InvalidTempo { .. })
        ));
    }

    #[test]
    fn negative_first_beat_fails_to_parse() {
        let err = SessionConfig::from_json_str(r#"{ "first_beat_ms": -1 }"#).unwrap_err();
        assert!(matches!(err, RhythmError::Config(_)));
    }

    #[test]
    fn validation_reports_each_error_kind() {
        let bad_tempo = SessionConfig {
            bpm: 0,
            ..Default::default()
        };
        assert!(matches!(
            bad_tempo.validate(),
            Err(RhythmError::InvalidTempo { .. })
        ));

        let bad_tolerance = SessionConfig {
            tolerance_ms: 200,
            ..Default::default()
        };
        assert!(matches!(
            bad_tolerance.validate(),
            Err(RhythmError::InvalidTolerance { .. })
        ));

        let bad_window = SessionConfig {
            travel_time_ms: 0,
            ..Default::default()
        };
        let err = bad_window.validate().unwrap_err();
        assert!(matches!(err, RhythmError::InvalidWindow { .. }));
        assert!(err.is_configuration());
    }
}
