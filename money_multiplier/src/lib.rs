//! Fractional-Reserve Money Multiplier Simulation
//!
//! This crate models how an initial deposit expands the money supply as a
//! chain of banks repeatedly withholds a reserve fraction and lends out the
//! remainder, which becomes the next bank's deposit.
//!
//! Key pieces:
//! - SimulationConfig: initial deposit, reserve ratio, optional cycle cap
//! - SimulationEngine: advances the recurrence one cycle at a time and owns
//!   the append-only cycle history
//! - RunSummary / SimulationOutput: derived metrics and CSV/JSON export
//!
//! All amounts are rounded to the cent at every stage, so the recurrence
//! terminates in finitely many cycles for any positive reserve ratio.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod helpers;
pub mod output;

pub use analysis::RunSummary;
pub use config::{ConfigError, SimulationConfig};
pub use engine::SimulationEngine;
pub use output::SimulationOutput;

use serde::{Deserialize, Serialize};

/// Smallest representable currency unit (one cent).
pub const MIN_CURRENCY_UNIT: f64 = 0.01;

/// Lifecycle of a simulation engine.
///
/// `Ready` and `Running` are both advanceable; `Finished` is terminal and
/// can only be left through a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    Ready,
    Running,
    Finished,
}

impl std::fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineStatus::Ready => write!(f, "ready"),
            EngineStatus::Running => write!(f, "running"),
            EngineStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Why a finished simulation stopped producing cycles.
///
/// These are ordinary termination signals, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The next deposit was too small to withhold even one cent of reserve.
    InsufficientReserves,
    /// The loanable amount fell to a cent or less.
    NaturalCompletion,
    /// The configured cycle cap (or the global hard cap) was reached.
    MaxCyclesReached,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::InsufficientReserves => write!(f, "insufficient reserves"),
            EndReason::NaturalCompletion => write!(f, "natural completion"),
            EndReason::MaxCyclesReached => write!(f, "max cycles reached"),
        }
    }
}

/// One step of the money-creation chain.
///
/// Records are append-only: the engine creates each cycle exactly once and
/// never mutates it afterwards. All amounts are already rounded to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    /// 1-based position in the history.
    pub cycle_number: usize,
    /// Amount deposited into this cycle's bank. For cycle 1 this is the
    /// initial deposit; afterwards it is the previous cycle's loan.
    pub deposit: f64,
    /// Amount withheld: `deposit × reserve_ratio`.
    pub reserve: f64,
    /// Amount lent on: `deposit − reserve`, never negative.
    pub loan: f64,
    /// Running sum of all deposits made so far.
    pub total_money_supply: f64,
    /// False only for the degenerate terminal cycle whose deposit could not
    /// sustain the reserve ratio.
    pub is_valid: bool,
}

impl Cycle {
    /// Display label for this cycle's bank ("Bank A", "Bank B", ..., "Bank A1").
    pub fn bank_label(&self) -> String {
        helpers::bank_label(self.cycle_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_reason_serializes_snake_case() {
        let json = serde_json::to_string(&EndReason::InsufficientReserves).unwrap();
        assert_eq!(json, "\"insufficient_reserves\"");

        let json = serde_json::to_string(&EndReason::MaxCyclesReached).unwrap();
        assert_eq!(json, "\"max_cycles_reached\"");
    }

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(EngineStatus::Ready.to_string(), "ready");
        assert_eq!(EngineStatus::Finished.to_string(), "finished");
    }

    #[test]
    fn cycle_bank_label_follows_cycle_number() {
        let cycle = Cycle {
            cycle_number: 1,
            deposit: 1000.0,
            reserve: 100.0,
            loan: 900.0,
            total_money_supply: 1000.0,
            is_valid: true,
        };
        assert_eq!(cycle.bank_label(), "Bank A");
    }
}
