use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MIN_CURRENCY_UNIT;

/// Rejected configuration input.
///
/// Construction never clamps out-of-range values; it fails instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial deposit must be a positive, finite amount (got {0})")]
    NonPositiveDeposit(f64),
    #[error("reserve ratio must lie in [0, 1] (got {0})")]
    RatioOutOfRange(f64),
    #[error("max cycles must be at least 1 when set")]
    InvalidMaxCycles,
}

/// Simulation configuration, immutable once an engine is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed deposit into the first bank. Must be finite and positive.
    pub initial_deposit: f64,
    /// Fraction of each deposit withheld as reserve, in [0, 1].
    pub reserve_ratio: f64,
    /// Optional upper bound on cycle count. Absent means the run is bounded
    /// only by natural termination and the engine's hard cap.
    #[serde(default)]
    pub max_cycles: Option<usize>,
}

impl SimulationConfig {
    /// Build and validate a configuration.
    pub fn new(
        initial_deposit: f64,
        reserve_ratio: f64,
        max_cycles: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let config = SimulationConfig {
            initial_deposit,
            reserve_ratio,
            max_cycles,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check all construction constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_deposit.is_finite() || self.initial_deposit <= 0.0 {
            return Err(ConfigError::NonPositiveDeposit(self.initial_deposit));
        }
        if !self.reserve_ratio.is_finite() || !(0.0..=1.0).contains(&self.reserve_ratio) {
            return Err(ConfigError::RatioOutOfRange(self.reserve_ratio));
        }
        if self.max_cycles == Some(0) {
            return Err(ConfigError::InvalidMaxCycles);
        }
        Ok(())
    }

    /// The textbook classroom example: $1000 at a 10% reserve ratio.
    pub fn baseline() -> Self {
        SimulationConfig {
            initial_deposit: 1000.0,
            reserve_ratio: 0.1,
            max_cycles: None,
        }
    }

    /// Full-reserve banking: nothing can be lent, no money is created.
    pub fn full_reserve() -> Self {
        SimulationConfig {
            reserve_ratio: 1.0,
            ..Self::baseline()
        }
    }

    /// High reserve ratio: the chain collapses within a few dozen cycles.
    pub fn narrow_lending() -> Self {
        SimulationConfig {
            reserve_ratio: 0.9,
            ..Self::baseline()
        }
    }

    /// Smallest deposit that can still withhold one cent of reserve
    /// (`0.01 / reserve_ratio`), or 0 when the ratio is 0 and every deposit
    /// is fully loanable.
    pub fn min_viable_deposit(&self) -> f64 {
        if self.reserve_ratio > 0.0 {
            MIN_CURRENCY_UNIT / self.reserve_ratio
        } else {
            0.0
        }
    }

    /// Geometric-series limit of the total money supply
    /// (`initial_deposit / reserve_ratio`), or None when the ratio is 0 and
    /// the supply grows without bound.
    pub fn theoretical_limit(&self) -> Option<f64> {
        if self.reserve_ratio > 0.0 {
            Some(self.initial_deposit / self.reserve_ratio)
        } else {
            None
        }
    }
}
