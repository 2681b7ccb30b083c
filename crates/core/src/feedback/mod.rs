use serde::{Deserialize, Serialize};

use crate::JudgmentResult;

/// Display variant a host renders for the latest judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Hit,
    Miss,
    Invalid,
}

impl From<JudgmentResult> for Feedback {
    fn from(result: JudgmentResult) -> Self {
        match result {
            JudgmentResult::Hit => Self::Hit,
            JudgmentResult::Miss => Self::Miss,
            JudgmentResult::Invalid => Self::Invalid,
        }
    }
}

impl Feedback {
    /// Flash colour as RGBA. Invalid presses leave the background alone.
    pub fn flash_rgba(&self) -> Option<[u8; 4]> {
        match self {
            Self::Hit => Some([0x00, 0xff, 0x00, 0xff]),
            Self::Miss => Some([0xff, 0x00, 0x00, 0xff]),
            Self::Invalid => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Invalid => "too early",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_result_has_a_distinct_variant() {
        let hit = Feedback::from(JudgmentResult::Hit);
        let miss = Feedback::from(JudgmentResult::Miss);
        let invalid = Feedback::from(JudgmentResult::Invalid);

        assert_eq!(hit.flash_rgba(), Some([0, 255, 0, 255]));
        assert_eq!(miss.flash_rgba(), Some([255, 0, 0, 255]));
        assert_eq!(invalid.flash_rgba(), None);
        assert_ne!(hit.label(), invalid.label());
    }
}
