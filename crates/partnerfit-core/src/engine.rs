//! Synergy Engine - weighted friction scoring of two profiles
//!
//! For every dimension the engine takes the absolute gap between the two
//! ratings, weights it, and compares the weighted total with the largest
//! total the table allows:
//!
//! ```text
//! friction = Σ |corp[d] - startup[d]| · w[d]  /  Σ 9 · w[d]
//! score    = round_half_up(100 · (1 - friction))
//! ```
//!
//! All arithmetic is done on integers, so the score is exact and a .5 always
//! rounds up.
//!
//! # Example
//!
//! ```
//! use partnerfit_core::{ActorProfile, EcosystemValues, SynergyEngine, RiskLevel};
//!
//! let corp = ActorProfile::new("Acme", EcosystemValues::new(8, 2, 9, 3));
//! let startup = ActorProfile::new("Rocket", EcosystemValues::new(3, 7, 2, 8));
//!
//! let result = SynergyEngine::reference().compute(&corp, &startup).unwrap();
//! assert_eq!(result.score, 37);
//! assert!(!result.is_compatible);
//! assert_eq!(result.risk_level(), RiskLevel::Critical);
//! ```

use tracing::{debug, warn};

use crate::classification::{classify_delta, is_compatible};
use crate::dimension::{validate_dimensions, DimensionConfig, MAX_DELTA, REFERENCE_DIMENSIONS};
use crate::error::{Result, SynergyError, ValidationError};
use crate::types::{ActorProfile, DimensionAnalysis, SynergyResult, MAX_RATING, MIN_RATING};

/// Scorer bound to a validated weight table.
///
/// Holds no mutable state; a single engine can be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynergyEngine {
    dimensions: Vec<DimensionConfig>,
}

impl SynergyEngine {
    /// Create an engine after validating the table
    pub fn new(dimensions: Vec<DimensionConfig>) -> Result<Self> {
        validate_dimensions(&dimensions)?;
        Ok(Self { dimensions })
    }

    /// Engine over the fixed reference weights
    pub fn reference() -> Self {
        Self {
            dimensions: REFERENCE_DIMENSIONS.to_vec(),
        }
    }

    pub fn dimensions(&self) -> &[DimensionConfig] {
        &self.dimensions
    }

    /// Score two profiles against this engine's table
    pub fn compute(&self, corp: &ActorProfile, startup: &ActorProfile) -> Result<SynergyResult> {
        compute_synergy(corp, startup, &self.dimensions)
    }
}

impl Default for SynergyEngine {
    fn default() -> Self {
        Self::reference()
    }
}

/// Score two profiles against a weight table.
///
/// Fails before computing anything if the table is malformed or any rating
/// lies outside [1, 10]; the error names the first offending actor and
/// dimension.
pub fn compute_synergy(
    corp: &ActorProfile,
    startup: &ActorProfile,
    dimensions: &[DimensionConfig],
) -> Result<SynergyResult> {
    validate_dimensions(dimensions)?;
    validate_ratings(corp, dimensions)?;
    validate_ratings(startup, dimensions)?;

    let mut total_weighted_delta: u64 = 0;
    let mut max_weighted_delta: u64 = 0;
    let mut dimension_analysis = Vec::with_capacity(dimensions.len());

    for dim in dimensions {
        let corp_val = corp.values.get(dim.id);
        let start_val = startup.values.get(dim.id);
        let delta = corp_val.abs_diff(start_val);
        let weight = u64::from(dim.weight);

        total_weighted_delta += u64::from(delta) * weight;
        max_weighted_delta += u64::from(MAX_DELTA) * weight;

        dimension_analysis.push(DimensionAnalysis {
            id: dim.id,
            weight: dim.weight,
            corp_val,
            start_val,
            delta,
            status: classify_delta(delta),
        });
    }

    let score = synergy_score(total_weighted_delta, max_weighted_delta)?;

    debug!(
        corp = %corp.name,
        startup = %startup.name,
        total_weighted_delta,
        max_weighted_delta,
        score,
        "synergy computed"
    );

    Ok(SynergyResult {
        score,
        dimension_analysis,
        is_compatible: is_compatible(score),
    })
}

/// Share of the maximum weighted friction actually present, in [0, 1]
pub fn friction_ratio(result: &SynergyResult) -> f64 {
    let (total, max) = result
        .dimension_analysis
        .iter()
        .fold((0u64, 0u64), |(total, max), d| {
            let weight = u64::from(d.weight);
            (total + u64::from(d.delta) * weight, max + u64::from(MAX_DELTA) * weight)
        });

    if max == 0 {
        return 0.0;
    }
    total as f64 / max as f64
}

/// `round_half_up(100 * (max - total) / max)` on integers
fn synergy_score(total_weighted_delta: u64, max_weighted_delta: u64) -> Result<u8> {
    if max_weighted_delta == 0 {
        return Err(SynergyError::Configuration(
            "maximum weighted delta is zero".to_string(),
        ));
    }

    let aligned = max_weighted_delta.saturating_sub(total_weighted_delta);
    let score = (200 * aligned + max_weighted_delta) / (2 * max_weighted_delta);

    u8::try_from(score).map_err(|_| {
        SynergyError::Configuration(format!("score {score} outside [0, 100]"))
    })
}

fn validate_ratings(actor: &ActorProfile, dimensions: &[DimensionConfig]) -> Result<()> {
    for dim in dimensions {
        let value = actor.values.get(dim.id);
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            warn!(actor = %actor.name, dimension = %dim.id, value, "rating out of range");
            return Err(ValidationError::RatingOutOfRange {
                actor: actor.name.clone(),
                dimension: dim.id,
                value,
            }
            .into());
        }
    }
    Ok(())
}
