//! The closed set of mood kinds and their constant lookup tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MoodError;

/// One of the five fixed mood categories.
///
/// Variant order is the enumeration order used for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKind {
    Happy,
    Sad,
    Angry,
    Calm,
    Excited,
}

/// Lowest score on the trend scale.
pub const MIN_SCORE: u8 = 1;

/// Highest score on the trend scale.
pub const MAX_SCORE: u8 = 5;

impl MoodKind {
    /// All kinds in enumeration order.
    pub const ALL: [MoodKind; 5] = [
        MoodKind::Happy,
        MoodKind::Sad,
        MoodKind::Angry,
        MoodKind::Calm,
        MoodKind::Excited,
    ];

    /// Position in [`MoodKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodKind::Happy => "happy",
            MoodKind::Sad => "sad",
            MoodKind::Angry => "angry",
            MoodKind::Calm => "calm",
            MoodKind::Excited => "excited",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodKind::Happy => "Happy",
            MoodKind::Sad => "Sad",
            MoodKind::Angry => "Angry",
            MoodKind::Calm => "Calm",
            MoodKind::Excited => "Excited",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodKind::Happy => "\u{1F60A}",   // 😊
            MoodKind::Sad => "\u{1F622}",     // 😢
            MoodKind::Angry => "\u{1F620}",   // 😠
            MoodKind::Calm => "\u{1F60C}",    // 😌
            MoodKind::Excited => "\u{1F389}", // 🎉
        }
    }

    /// Score on the 1..=5 trend scale. Only used for trend scoring.
    pub fn score(self) -> u8 {
        match self {
            MoodKind::Angry => 1,
            MoodKind::Sad => 2,
            MoodKind::Calm => 3,
            MoodKind::Happy => 4,
            MoodKind::Excited => 5,
        }
    }

    /// Display color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            MoodKind::Happy => "#FACC15",
            MoodKind::Sad => "#60A5FA",
            MoodKind::Angry => "#F87171",
            MoodKind::Calm => "#34D399",
            MoodKind::Excited => "#A78BFA",
        }
    }

    /// Display color as an RGB triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            MoodKind::Happy => (0xFA, 0xCC, 0x15),
            MoodKind::Sad => (0x60, 0xA5, 0xFA),
            MoodKind::Angry => (0xF8, 0x71, 0x71),
            MoodKind::Calm => (0x34, 0xD3, 0x99),
            MoodKind::Excited => (0xA7, 0x8B, 0xFA),
        }
    }
}

impl fmt::Display for MoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodKind {
    type Err = MoodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        MoodKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                MoodError::Validation(format!(
                    "Unknown mood \"{}\" (expected one of: happy, sad, angry, calm, excited)",
                    value.trim()
                ))
            })
    }
}

/// Check that a score lies on the 1..=5 scale.
pub fn validate_score(score: i64) -> crate::Result<u8> {
    if score < i64::from(MIN_SCORE) || score > i64::from(MAX_SCORE) {
        return Err(MoodError::Validation(format!(
            "Mood score must be between {} and {}",
            MIN_SCORE, MAX_SCORE
        )));
    }
    Ok(score as u8)
}
