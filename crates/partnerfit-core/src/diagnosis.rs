//! Diagnosis - from a synergy result to mitigations
//!
//! Every dimension whose status is not optimal resolves to a fixed
//! recommendation; optimal dimensions are collected in the optimal zone.

use serde::Serialize;

use crate::classification::RiskLevel;
use crate::dimension::DimensionId;
use crate::types::{DimensionAnalysis, SynergyResult};

/// Mitigation service suggested for a friction dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Short service code
    pub code: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const SAEM: Recommendation = Recommendation {
    code: "SAEM",
    title: "Multilevel Strategic Alignment (SAEM®)",
    description: "Align operational goals with strategic drivers to ensure project velocity and coherence.",
};

const ASIR: Recommendation = Recommendation {
    code: "ASIR",
    title: "Innovation Architecture (ASIR®)",
    description: "Create innovation roadmaps (H1-H3) to align technology maturity with market impact.",
};

const ETCD: Recommendation = Recommendation {
    code: "ETCD",
    title: "Cultural & Digital Transformation (ETCD®)",
    description: "Deep cultural alignment to bridge the gap between agile startups and corporate structures.",
};

const GAE: Recommendation = Recommendation {
    code: "GAE",
    title: "Strategic Asset Management (GAE®)",
    description: "Transform intellectual capital into protected assets (Patents, IP) with full lifecycle support.",
};

/// Recommendation for a dimension. Total over the closed dimension set.
pub fn recommendation_for(id: DimensionId) -> &'static Recommendation {
    match id {
        DimensionId::Speed => &SAEM,
        DimensionId::Risk => &ASIR,
        DimensionId::Cashflow => &ETCD,
        DimensionId::Ip => &GAE,
    }
}

/// A non-optimal dimension paired with its mitigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friction {
    #[serde(flatten)]
    pub analysis: DimensionAnalysis,
    pub recommendation: &'static Recommendation,
}

/// Result split into frictions and the optimal zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub score: u8,
    pub risk_level: RiskLevel,
    pub is_compatible: bool,
    pub frictions: Vec<Friction>,
    pub optimal_zone: Vec<DimensionId>,
}

impl Diagnosis {
    pub fn from_result(result: &SynergyResult) -> Self {
        let mut frictions = Vec::new();
        let mut optimal_zone = Vec::new();

        for analysis in &result.dimension_analysis {
            if analysis.status.needs_mitigation() {
                frictions.push(Friction {
                    analysis: *analysis,
                    recommendation: recommendation_for(analysis.id),
                });
            } else {
                optimal_zone.push(analysis.id);
            }
        }

        Self {
            score: result.score,
            risk_level: result.risk_level(),
            is_compatible: result.is_compatible,
            frictions,
            optimal_zone,
        }
    }

    /// Whether no dimension needs a mitigation
    pub fn is_frictionless(&self) -> bool {
        self.frictions.is_empty()
    }
}

impl From<&SynergyResult> for Diagnosis {
    fn from(result: &SynergyResult) -> Self {
        Self::from_result(result)
    }
}
