//! Core types for PartnerFit
//!
//! This module defines the inputs and outputs of the synergy engine:
//! - Ratings per dimension (`EcosystemValues`)
//! - The two compared actors (`ActorProfile`)
//! - Per-dimension breakdown and the overall result

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::classification::{DimensionStatus, RiskLevel};
use crate::dimension::DimensionId;
use crate::error::{ParseDimensionError, ValidationError};

/// Lowest rating on the scale
pub const MIN_RATING: i32 = 1;

/// Highest rating on the scale
pub const MAX_RATING: i32 = 10;

/// Rating the original calibration sliders start at
pub const NEUTRAL_RATING: i32 = 5;

/// One rating per dimension.
///
/// Every dimension is a field, so a constructed value is always complete.
/// Range is checked by the engine, not here, so that out-of-range input
/// reaches the engine and is reported with the actor's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EcosystemValues {
    pub speed: i32,
    pub risk: i32,
    pub cashflow: i32,
    pub ip: i32,
}

impl Default for EcosystemValues {
    fn default() -> Self {
        Self::uniform(NEUTRAL_RATING)
    }
}

impl EcosystemValues {
    pub fn new(speed: i32, risk: i32, cashflow: i32, ip: i32) -> Self {
        Self {
            speed,
            risk,
            cashflow,
            ip,
        }
    }

    /// Same rating on every dimension
    pub fn uniform(rating: i32) -> Self {
        Self::new(rating, rating, rating, rating)
    }

    pub fn get(&self, id: DimensionId) -> i32 {
        match id {
            DimensionId::Speed => self.speed,
            DimensionId::Risk => self.risk,
            DimensionId::Cashflow => self.cashflow,
            DimensionId::Ip => self.ip,
        }
    }

    /// Copy with one rating replaced
    pub fn with(mut self, id: DimensionId, rating: i32) -> Self {
        match id {
            DimensionId::Speed => self.speed = rating,
            DimensionId::Risk => self.risk = rating,
            DimensionId::Cashflow => self.cashflow = rating,
            DimensionId::Ip => self.ip = rating,
        }
        self
    }

    /// Build from loose `(key, rating)` pairs.
    ///
    /// Every dimension must be given exactly once and no other keys are allowed.
    pub fn from_pairs<I, K>(actor: &str, pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, i32)>,
        K: AsRef<str>,
    {
        let mut ratings: HashMap<DimensionId, i32> = HashMap::with_capacity(DimensionId::ALL.len());

        for (key, rating) in pairs {
            let key = key.as_ref();
            let id: DimensionId =
                key.parse()
                    .map_err(|ParseDimensionError(key)| ValidationError::UnknownDimension {
                        actor: actor.to_string(),
                        key,
                    })?;
            if ratings.insert(id, rating).is_some() {
                return Err(ValidationError::DuplicateRating {
                    actor: actor.to_string(),
                    dimension: id,
                });
            }
        }

        let mut values = Self::default();
        for id in DimensionId::ALL {
            let rating = ratings.get(&id).ok_or_else(|| ValidationError::MissingRating {
                actor: actor.to_string(),
                dimension: id,
            })?;
            values = values.with(id, *rating);
        }
        Ok(values)
    }

    /// Parse a `speed=8,risk=2,cashflow=9,ip=3` list
    pub fn parse(actor: &str, input: &str) -> Result<Self, ValidationError> {
        let mut pairs = Vec::new();
        for item in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, raw) = item.split_once('=').ok_or_else(|| ValidationError::MalformedRating {
                raw: item.to_string(),
            })?;
            let rating: i32 = raw.trim().parse().map_err(|_| ValidationError::MalformedRating {
                raw: raw.trim().to_string(),
            })?;
            pairs.push((key.trim().to_string(), rating));
        }
        Self::from_pairs(actor, pairs)
    }
}

/// One side of the comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub name: String,
    pub values: EcosystemValues,
}

impl ActorProfile {
    pub fn new(name: impl Into<String>, values: EcosystemValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Breakdown of one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionAnalysis {
    pub id: DimensionId,
    pub weight: u32,
    pub corp_val: i32,
    pub start_val: i32,
    /// Absolute rating gap, 0..=9
    pub delta: u32,
    pub status: DimensionStatus,
}

/// Outcome of scoring two profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyResult {
    /// 0 (total friction) to 100 (perfect alignment)
    pub score: u8,
    pub dimension_analysis: Vec<DimensionAnalysis>,
    pub is_compatible: bool,
}

impl SynergyResult {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score)
    }

    pub fn analysis_for(&self, id: DimensionId) -> Option<&DimensionAnalysis> {
        self.dimension_analysis.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let values = EcosystemValues::default();
        for id in DimensionId::ALL {
            assert_eq!(values.get(id), NEUTRAL_RATING);
        }
    }

    #[test]
    fn test_with_replaces_single_rating() {
        let values = EcosystemValues::uniform(5).with(DimensionId::Cashflow, 9);
        assert_eq!(values, EcosystemValues::new(5, 5, 9, 5));
    }

    #[test]
    fn test_parse_rating_list() {
        let values = EcosystemValues::parse("corp", "speed=8, risk=2,cashflow=9,ip=3").unwrap();
        assert_eq!(values, EcosystemValues::new(8, 2, 9, 3));
    }

    #[test]
    fn test_from_pairs_missing_dimension() {
        let err = EcosystemValues::from_pairs("Startup", [("speed", 3), ("risk", 7), ("ip", 8)])
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRating {
                actor: "Startup".to_string(),
                dimension: DimensionId::Cashflow,
            }
        );
    }

    #[test]
    fn test_from_pairs_unknown_key() {
        let err = EcosystemValues::parse("corp", "speed=1,risk=1,cashflow=1,ip=1,culture=4")
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownDimension { key, .. } if key == "culture"));
    }

    #[test]
    fn test_from_pairs_duplicate_key() {
        let err = EcosystemValues::parse("corp", "speed=1,speed=2,risk=1,cashflow=1,ip=1")
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::DuplicateRating {
                dimension: DimensionId::Speed,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_non_integer() {
        let err = EcosystemValues::parse("corp", "speed=fast").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedRating {
                raw: "fast".to_string()
            }
        );
    }

    #[test]
    fn test_values_json_rejects_unknown_fields() {
        let ok: EcosystemValues =
            serde_json::from_str(r#"{"speed":8,"risk":2,"cashflow":9,"ip":3}"#).unwrap();
        assert_eq!(ok.get(DimensionId::Ip), 3);

        let extra = serde_json::from_str::<EcosystemValues>(
            r#"{"speed":8,"risk":2,"cashflow":9,"ip":3,"culture":1}"#,
        );
        assert!(extra.is_err());

        let missing = serde_json::from_str::<EcosystemValues>(r#"{"speed":8,"risk":2}"#);
        assert!(missing.is_err());
    }
}
