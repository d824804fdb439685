//! Threshold classification of deltas and scores
//!
//! One threshold set is used everywhere: per-dimension status feeds the
//! recommendation lookup, the risk tier is what records and exports carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deltas above this are critical
pub const CRITICAL_DELTA: u32 = 6;

/// Deltas above this (and not critical) are manageable
pub const MANAGEABLE_DELTA: u32 = 3;

/// Scores above this are in the OPTIMAL tier
pub const OPTIMAL_SCORE: u8 = 80;

/// Scores above this (and not optimal) are in the MANAGEABLE tier
pub const MANAGEABLE_SCORE: u8 = 50;

/// Scores above this make a partnership compatible
pub const COMPATIBILITY_THRESHOLD: u8 = 60;

/// Friction level of a single dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionStatus {
    Optimal,
    Manageable,
    Critical,
}

impl DimensionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DimensionStatus::Optimal => "optimal",
            DimensionStatus::Manageable => "manageable",
            DimensionStatus::Critical => "critical",
        }
    }

    /// Whether the dimension needs a mitigation
    pub fn needs_mitigation(self) -> bool {
        !matches!(self, DimensionStatus::Optimal)
    }
}

impl fmt::Display for DimensionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk tier of a whole partnership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Optimal,
    Manageable,
    Critical,
}

impl RiskLevel {
    /// Tier for a synergy score
    pub fn from_score(score: u8) -> Self {
        if score > OPTIMAL_SCORE {
            RiskLevel::Optimal
        } else if score > MANAGEABLE_SCORE {
            RiskLevel::Manageable
        } else {
            RiskLevel::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Optimal => "OPTIMAL",
            RiskLevel::Manageable => "MANAGEABLE",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status for an absolute rating gap
pub fn classify_delta(delta: u32) -> DimensionStatus {
    if delta > CRITICAL_DELTA {
        DimensionStatus::Critical
    } else if delta > MANAGEABLE_DELTA {
        DimensionStatus::Manageable
    } else {
        DimensionStatus::Optimal
    }
}

/// Risk tier for a synergy score. Same rule as [`RiskLevel::from_score`].
pub fn classify_risk(score: u8) -> RiskLevel {
    RiskLevel::from_score(score)
}

/// Whether a score clears the compatibility bar
pub fn is_compatible(score: u8) -> bool {
    score > COMPATIBILITY_THRESHOLD
}
