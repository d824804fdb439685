//! PartnerFit Core - Synergy scoring for corporate/startup partnerships
//!
//! PartnerFit Core rates two actors on a fixed set of weighted dimensions and
//! turns the rating gaps into a synergy score, a risk tier and a list of
//! mitigations.
//!
//! # Architecture
//!
//! 1. **Dimensions** (`dimension`): the closed set of axes and the weight table
//! 2. **Engine** (`engine`): pure, deterministic scoring of two profiles
//! 3. **Classification** (`classification`): status and risk-tier thresholds
//! 4. **Diagnosis** (`diagnosis`): recommendations for friction dimensions
//! 5. **Portfolio** (`portfolio`): saved-analysis records and aggregation
//!
//! # Quick Start
//!
//! ```
//! use partnerfit_core::{ActorProfile, Diagnosis, EcosystemValues, SynergyEngine};
//!
//! let corp = ActorProfile::new("Acme Industries", EcosystemValues::new(3, 2, 2, 2));
//! let startup = ActorProfile::new("Rocket Labs", EcosystemValues::new(9, 8, 8, 7));
//!
//! let result = SynergyEngine::reference().compute(&corp, &startup).unwrap();
//! let diagnosis = Diagnosis::from_result(&result);
//!
//! println!("Synergy: {}/100 ({})", diagnosis.score, diagnosis.risk_level);
//! for friction in &diagnosis.frictions {
//!     println!("{}: {}", friction.analysis.id.label(), friction.recommendation.title);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations, clippy::all)]

pub mod classification;
pub mod diagnosis;
pub mod dimension;
pub mod engine;
pub mod error;
pub mod portfolio;
pub mod types;

// Re-export commonly used types for convenience
pub use classification::{classify_delta, classify_risk, DimensionStatus, RiskLevel};
pub use diagnosis::{recommendation_for, Diagnosis, Friction, Recommendation};
pub use dimension::{validate_dimensions, DimensionConfig, DimensionId, REFERENCE_DIMENSIONS};
pub use engine::{compute_synergy, friction_ratio, SynergyEngine};
pub use error::{ParseDimensionError, Result, ResultExt, SynergyError, ValidationError};
pub use portfolio::{AnalysisRepository, InMemoryRepository, PortfolioSummary, SavedAnalysis};
pub use types::{ActorProfile, DimensionAnalysis, EcosystemValues, SynergyResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_end_to_end_workflow() {
        let engine = SynergyEngine::reference();
        let repo = InMemoryRepository::new();

        let corp = ActorProfile::new("Acme", EcosystemValues::new(2, 2, 2, 2));
        let startup = ActorProfile::new("Rocket", EcosystemValues::new(9, 4, 2, 6));

        let result = engine.compute(&corp, &startup).unwrap();
        let diagnosis = Diagnosis::from_result(&result);

        // speed 7 (critical), risk 2 (optimal), cashflow 0 (optimal), ip 4 (manageable)
        assert_eq!(diagnosis.frictions.len(), 2);
        assert_eq!(diagnosis.optimal_zone, vec![DimensionId::Risk, DimensionId::Cashflow]);

        repo.save(SavedAnalysis::capture(&corp, &startup, &result)).unwrap();

        let stored = repo.get_all().unwrap();
        let replayed = stored[0].replay(&engine).unwrap();
        assert_eq!(replayed, result);

        let summary = PortfolioSummary::from_records(&stored);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.average_score, result.score);
    }
}
