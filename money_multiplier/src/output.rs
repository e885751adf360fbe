//! Data output and serialization
//!
//! Structured export of a run to CSV and JSON for analysis or charting in
//! external tools. The engine itself never writes anything; callers build a
//! `SimulationOutput` from an engine snapshot and choose where it goes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::RunSummary;
use crate::engine::SimulationEngine;
use crate::{Cycle, SimulationConfig};

/// Top-level container for a run's exportable data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub metadata: RunMetadata,
    pub cycles: Vec<Cycle>,
    pub summary: RunSummary,
}

/// Metadata for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub config: SimulationConfig,
    pub timestamp: String,
    pub git_commit: Option<String>,
}

impl SimulationOutput {
    /// Snapshot an engine's configuration, history, and summary metrics.
    pub fn from_engine(engine: &SimulationEngine) -> Self {
        let git_commit = std::process::Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            });

        SimulationOutput {
            metadata: RunMetadata {
                config: engine.config().clone(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                git_commit,
            },
            cycles: engine.history().to_vec(),
            summary: RunSummary::from_engine(engine),
        }
    }

    /// Write the cycle history to CSV.
    pub fn write_cycles_csv<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record([
            "cycle",
            "bank",
            "deposit",
            "reserve",
            "loan",
            "total_money_supply",
            "is_valid",
        ])?;

        for cycle in &self.cycles {
            wtr.write_record(&[
                cycle.cycle_number.to_string(),
                cycle.bank_label(),
                format!("{:.2}", cycle.deposit),
                format!("{:.2}", cycle.reserve),
                format!("{:.2}", cycle.loan),
                format!("{:.2}", cycle.total_money_supply),
                cycle.is_valid.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write metadata, history, and summary as pretty JSON.
    pub fn write_summary_json<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Write all outputs to a directory.
    ///
    /// Creates:
    /// - cycles.csv
    /// - summary.json
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<(), Box<dyn std::error::Error>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        self.write_cycles_csv(dir.join("cycles.csv"))?;
        self.write_summary_json(dir.join("summary.json"))?;

        Ok(())
    }
}
