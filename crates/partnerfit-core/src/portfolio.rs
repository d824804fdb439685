//! Saved analyses and portfolio aggregation
//!
//! A [`SavedAnalysis`] keeps the raw ratings plus the score and tier, never the
//! per-dimension breakdown: the breakdown is recomputed on load through the
//! engine so that stored records cannot drift from the scoring rules.
//!
//! Durable storage is left to the caller; [`AnalysisRepository`] is the
//! contract and [`InMemoryRepository`] the only implementation here.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::classification::RiskLevel;
use crate::engine::SynergyEngine;
use crate::error::{Result, ResultExt, SynergyError};
use crate::types::{ActorProfile, EcosystemValues, SynergyResult};

/// Durable record of one analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnalysis {
    /// Opaque identifier; new records get a v4 UUID
    pub id: String,
    /// Milliseconds since the epoch on the wire
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub corp_name: String,
    pub startup_name: String,
    pub score: u8,
    pub risk_level: RiskLevel,
    pub corp_values: EcosystemValues,
    pub startup_values: EcosystemValues,
}

impl SavedAnalysis {
    /// Record a freshly computed result
    pub fn capture(corp: &ActorProfile, startup: &ActorProfile, result: &SynergyResult) -> Self {
        Self::capture_at(corp, startup, result, Utc::now())
    }

    /// Record a result with an explicit timestamp
    pub fn capture_at(
        corp: &ActorProfile,
        startup: &ActorProfile,
        result: &SynergyResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at,
            corp_name: corp.name.clone(),
            startup_name: startup.name.clone(),
            score: result.score,
            risk_level: result.risk_level(),
            corp_values: corp.values,
            startup_values: startup.values,
        }
    }

    pub fn corp(&self) -> ActorProfile {
        ActorProfile::new(self.corp_name.clone(), self.corp_values)
    }

    pub fn startup(&self) -> ActorProfile {
        ActorProfile::new(self.startup_name.clone(), self.startup_values)
    }

    /// Recompute the breakdown from the stored ratings.
    ///
    /// Fails with [`SynergyError::RecordMismatch`] when the stored score or
    /// tier disagrees with what the engine computes now.
    pub fn replay(&self, engine: &SynergyEngine) -> Result<SynergyResult> {
        let result = engine
            .compute(&self.corp(), &self.startup())
            .with_context(|| format!("replaying record {}", self.id))?;
        let recomputed_risk = result.risk_level();

        if result.score != self.score || recomputed_risk != self.risk_level {
            warn!(
                id = %self.id,
                stored = self.score,
                recomputed = result.score,
                "saved analysis disagrees with engine"
            );
            return Err(SynergyError::RecordMismatch {
                id: self.id.clone(),
                stored_score: self.score,
                stored_risk: self.risk_level,
                recomputed_score: result.score,
                recomputed_risk,
            });
        }

        Ok(result)
    }
}

/// Storage contract for saved analyses
pub trait AnalysisRepository: Send + Sync {
    fn save(&self, record: SavedAnalysis) -> Result<()>;

    /// All records, newest first
    fn get_all(&self) -> Result<Vec<SavedAnalysis>>;

    fn clear(&self) -> Result<()>;
}

/// Process-local repository
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: RwLock<Vec<SavedAnalysis>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl AnalysisRepository for InMemoryRepository {
    fn save(&self, record: SavedAnalysis) -> Result<()> {
        self.records.write().insert(0, record);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<SavedAnalysis>> {
        Ok(self.records.read().clone())
    }

    fn clear(&self) -> Result<()> {
        self.records.write().clear();
        Ok(())
    }
}

/// Aggregate view over a set of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total: usize,
    /// Mean score rounded half up; 0 for an empty portfolio
    pub average_score: u8,
    pub optimal: usize,
    pub manageable: usize,
    pub critical: usize,
}

impl PortfolioSummary {
    pub fn from_records(records: &[SavedAnalysis]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        let mut score_sum: u64 = 0;

        for record in records {
            score_sum += u64::from(record.score);
            match record.risk_level {
                RiskLevel::Optimal => summary.optimal += 1,
                RiskLevel::Manageable => summary.manageable += 1,
                RiskLevel::Critical => summary.critical += 1,
            }
        }

        let count = records.len() as u64;
        // mean of values in [0, 100] stays in [0, 100]
        summary.average_score = ((2 * score_sum + count) / (2 * count)) as u8;
        summary
    }
}
