//! Plain-text rendering of engine output

use partnerfit_core::{Diagnosis, DimensionConfig, PortfolioSummary, SavedAnalysis};
use std::fmt;

/// Diagnosis of one pairing, frictions first
#[derive(Debug)]
pub struct DiagnosisReport<'a> {
    pub corp: &'a str,
    pub startup: &'a str,
    pub diagnosis: &'a Diagnosis,
}

impl fmt::Display for DiagnosisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnosis = self.diagnosis;

        writeln!(f, "{} x {}", self.corp, self.startup)?;
        writeln!(f, "SYNERGY SCORE: {}/100", diagnosis.score)?;
        writeln!(f, "LEVEL: {}", diagnosis.risk_level)?;
        writeln!(
            f,
            "COMPATIBLE: {}",
            if diagnosis.is_compatible { "yes" } else { "no" }
        )?;

        if !diagnosis.frictions.is_empty() {
            writeln!(f)?;
            writeln!(f, "FRICTION DETECTED")?;
            for friction in &diagnosis.frictions {
                let a = &friction.analysis;
                writeln!(
                    f,
                    "  {:<20} {:>2} vs {:>2}  gap {} ({})",
                    a.id.label(),
                    a.corp_val,
                    a.start_val,
                    a.delta,
                    a.status
                )?;
                writeln!(f, "    -> {}", friction.recommendation.title)?;
                writeln!(f, "       {}", friction.recommendation.description)?;
            }
        }

        if !diagnosis.optimal_zone.is_empty() {
            writeln!(f)?;
            writeln!(f, "OPTIMAL ZONES")?;
            for id in &diagnosis.optimal_zone {
                writeln!(f, "  {}", id.label())?;
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct DimensionTable<'a>(pub &'a [DimensionConfig]);

impl fmt::Display for DimensionTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} {:>6}  {:<20} CORP <-> STARTUP", "ID", "WEIGHT", "LABEL")?;
        for dim in self.0 {
            writeln!(
                f,
                "{:<10} {:>6}  {:<20} {} <-> {}",
                dim.id.as_str(),
                dim.weight,
                dim.id.label(),
                dim.id.corp_pole(),
                dim.id.startup_pole()
            )?;
        }
        Ok(())
    }
}

/// Summary header followed by one line per record
#[derive(Debug)]
pub struct PortfolioReport<'a> {
    pub records: &'a [SavedAnalysis],
    pub summary: &'a PortfolioSummary,
}

impl fmt::Display for PortfolioReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;

        writeln!(f, "PROJECTS: {}", summary.total)?;
        writeln!(f, "AVG SYNERGY: {}/100", summary.average_score)?;
        writeln!(
            f,
            "OPTIMAL: {}  MANAGEABLE: {}  CRITICAL: {}",
            summary.optimal, summary.manageable, summary.critical
        )?;

        for record in self.records {
            writeln!(
                f,
                "  {}  {} x {}  {:>3}  {}",
                record.created_at.format("%Y-%m-%d"),
                record.corp_name,
                record.startup_name,
                record.score,
                record.risk_level
            )?;
        }
        Ok(())
    }
}
