//! Derived metrics over a simulation run
//!
//! Everything here is computed read-only from an engine's configuration and
//! history; nothing feeds back into the recurrence.

use serde::{Deserialize, Serialize};

use crate::engine::SimulationEngine;
use crate::{EndReason, EngineStatus};

/// Summary of a run, suitable for printing or serializing alongside the
/// cycle history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub status: EngineStatus,
    pub end_reason: Option<EndReason>,
    pub cycles_run: usize,
    pub initial_deposit: f64,
    pub reserve_ratio: f64,
    pub total_money_supply: f64,
    pub money_created: f64,
    pub money_multiplier: f64,
    /// `initial_deposit / reserve_ratio`; None for a zero reserve ratio.
    pub theoretical_limit: Option<f64>,
    /// Fraction of the theoretical limit actually reached by the run.
    pub limit_attainment: Option<f64>,
}

impl RunSummary {
    pub fn from_engine(engine: &SimulationEngine) -> Self {
        let config = engine.config();
        let theoretical_limit = config.theoretical_limit();
        let limit_attainment =
            theoretical_limit.map(|limit| engine.total_money_supply() / limit);

        RunSummary {
            status: engine.status(),
            end_reason: engine.end_reason(),
            cycles_run: engine.history().len(),
            initial_deposit: config.initial_deposit,
            reserve_ratio: config.reserve_ratio,
            total_money_supply: engine.total_money_supply(),
            money_created: engine.money_created(),
            money_multiplier: engine.money_multiplier(),
            theoretical_limit,
            limit_attainment,
        }
    }

    pub fn print_summary(&self) {
        println!("Run Summary:");
        println!("  Cycles run: {}", self.cycles_run);
        match self.end_reason {
            Some(reason) => println!("  End reason: {}", reason),
            None => println!("  End reason: still {}", self.status),
        }
        println!("  Initial deposit: ${:.2}", self.initial_deposit);
        println!("  Reserve ratio: {:.0}%", self.reserve_ratio * 100.0);
        println!("  Total money supply: ${:.2}", self.total_money_supply);
        println!("  Money created: ${:.2}", self.money_created);
        println!("  Money multiplier: {:.2}x", self.money_multiplier);
        match (self.theoretical_limit, self.limit_attainment) {
            (Some(limit), Some(attainment)) => {
                println!(
                    "  Theoretical limit: ${:.2} ({:.1}% attained)",
                    limit,
                    attainment * 100.0
                );
            }
            _ => println!("  Theoretical limit: unbounded (zero reserve ratio)"),
        }
    }
}
