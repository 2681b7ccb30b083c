/// Result alias that carries the custom [`RhythmError`] type.
pub type Result<T> = std::result::Result<T, RhythmError>;

/// Common error type for the core crate.
///
/// The four `Invalid*` variants are configuration errors. They are raised
/// while a session is being set up and never in the middle of a tick. Values
/// are reported as `i64` so negative config entries keep their own variant.
/// `first_beat_ms` and `beat_count` are unsigned in the config, so a negative
/// value there fails to parse and surfaces as [`RhythmError::Config`].
#[derive(Debug, thiserror::Error)]
pub enum RhythmError {
    /// The tempo cannot produce a non-zero beat interval.
    #[error("invalid tempo: {bpm} bpm (expected 1..=60000)")]
    InvalidTempo { bpm: i64 },
    /// The playback source reports a conversion rate that truncates to zero.
    #[error("invalid sample rate: {samples_per_ms} samples per millisecond")]
    InvalidSampleRate { samples_per_ms: u32 },
    /// The tolerance windows around neighbouring beats would overlap.
    #[error(
        "invalid tolerance: {tolerance_ms} ms must be less than half of the {beat_interval_ms} ms beat interval"
    )]
    InvalidTolerance {
        tolerance_ms: i64,
        beat_interval_ms: i64,
    },
    /// The scroll window has no travel time to project beats across.
    #[error("invalid view window: travel time must be positive, got {travel_time_ms} ms")]
    InvalidWindow { travel_time_ms: i64 },
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The configuration file could not be parsed.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl RhythmError {
    /// Returns `true` for the configuration errors that reject a session.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidTempo { .. }
                | Self::InvalidSampleRate { .. }
                | Self::InvalidTolerance { .. }
                | Self::InvalidWindow { .. }
        )
    }
}
