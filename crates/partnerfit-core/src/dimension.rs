//! Dimensions of comparison and the weight table
//!
//! The set of dimensions is closed: adding one means extending [`DimensionId`],
//! and every exhaustive `match` on it (labels, recommendations, ratings)
//! then fails to compile until it is handled.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseDimensionError, Result, SynergyError, ValidationError};

/// Largest possible gap between two ratings on the 1-10 scale
pub const MAX_DELTA: u32 = 9;

/// Axis along which both actors are rated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionId {
    /// Time-to-decision and execution velocity
    Speed,
    /// Tolerance for failure
    Risk,
    /// Payment terms and runway pressure
    Cashflow,
    /// Ownership of intellectual property
    Ip,
}

impl DimensionId {
    /// All dimensions in reference order
    pub const ALL: [DimensionId; 4] = [
        DimensionId::Speed,
        DimensionId::Risk,
        DimensionId::Cashflow,
        DimensionId::Ip,
    ];

    /// Stable lowercase key, as used in records and CLI input
    pub fn as_str(self) -> &'static str {
        match self {
            DimensionId::Speed => "speed",
            DimensionId::Risk => "risk",
            DimensionId::Cashflow => "cashflow",
            DimensionId::Ip => "ip",
        }
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            DimensionId::Speed => "Operational Speed",
            DimensionId::Risk => "Risk Appetite",
            DimensionId::Cashflow => "Cash Flow Pressure",
            DimensionId::Ip => "IP Governance",
        }
    }

    /// What a low-end rating looks like on the corporate side
    pub fn corp_pole(self) -> &'static str {
        match self {
            DimensionId::Speed => "Bureaucracy / Committees",
            DimensionId::Risk => "Failure Intolerant",
            DimensionId::Cashflow => "Net 90/120 Days",
            DimensionId::Ip => "Exclusive / Owned",
        }
    }

    /// What a high-end rating looks like on the startup side
    pub fn startup_pole(self) -> &'static str {
        match self {
            DimensionId::Speed => "Agility / Autonomy",
            DimensionId::Risk => "Fail Fast / Learn",
            DimensionId::Cashflow => "Upfront / D+15",
            DimensionId::Ip => "Licensed / Shared",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DimensionId::Speed => "Time-to-Decision and execution velocity.",
            DimensionId::Risk => "Tolerance for failure and experimental scope.",
            DimensionId::Cashflow => "Payment terms urgency and runway sensitivity.",
            DimensionId::Ip => "Control over intellectual property & exclusivity.",
        }
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionId {
    type Err = ParseDimensionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DimensionId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDimensionError(s.to_string()))
    }
}

/// One row of the weight table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionConfig {
    pub id: DimensionId,
    /// Relative importance of the dimension; must be positive
    pub weight: u32,
}

impl DimensionConfig {
    pub const fn new(id: DimensionId, weight: u32) -> Self {
        Self { id, weight }
    }

    /// Reference weight table: speed=3, risk=2, cashflow=4, ip=3
    pub fn reference() -> Vec<DimensionConfig> {
        REFERENCE_DIMENSIONS.to_vec()
    }
}

/// The fixed weights every analysis is scored with
pub const REFERENCE_DIMENSIONS: [DimensionConfig; 4] = [
    DimensionConfig::new(DimensionId::Speed, 3),
    DimensionConfig::new(DimensionId::Risk, 2),
    DimensionConfig::new(DimensionId::Cashflow, 4),
    DimensionConfig::new(DimensionId::Ip, 3),
];

/// Check the weight table and return its total weight.
///
/// An all-zero table is a configuration error (nothing can be scored);
/// any other malformation is a validation error.
pub fn validate_dimensions(dimensions: &[DimensionConfig]) -> Result<u64> {
    if dimensions.is_empty() {
        return Err(ValidationError::EmptyDimensionTable.into());
    }

    let total_weight: u64 = dimensions.iter().map(|d| u64::from(d.weight)).sum();
    if total_weight == 0 {
        return Err(SynergyError::Configuration(format!(
            "dimension table of {} entries has zero total weight",
            dimensions.len()
        )));
    }

    let mut seen = HashSet::with_capacity(dimensions.len());
    for dim in dimensions {
        if !seen.insert(dim.id) {
            return Err(ValidationError::DuplicateDimension(dim.id).into());
        }
        if dim.weight == 0 {
            return Err(ValidationError::NonPositiveWeight(dim.id).into());
        }
    }

    if let Some(missing) = DimensionId::ALL.into_iter().find(|id| !seen.contains(id)) {
        return Err(ValidationError::MissingDimension(missing).into());
    }

    Ok(total_weight)
}
