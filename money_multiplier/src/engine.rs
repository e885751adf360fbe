use crate::config::{ConfigError, SimulationConfig};
use crate::helpers::round_to_cent;
use crate::{Cycle, EndReason, EngineStatus, MIN_CURRENCY_UNIT};

/// Hard cap on cycle count, applied even without an explicit `max_cycles`.
///
/// A very small positive reserve ratio can otherwise take thousands of
/// cycles before the cent threshold ends the run.
pub const HARD_CYCLE_CAP: usize = 500;

/// Owns the simulation configuration and the append-only cycle history, and
/// advances the money-creation recurrence one cycle at a time.
///
/// The engine performs no I/O and keeps no timer state. "Play" semantics
/// belong to the caller, which schedules repeated `advance()` calls at
/// whatever cadence it likes and cancels that schedule itself.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: SimulationConfig,
    cycles: Vec<Cycle>,
    status: EngineStatus,
    end_reason: Option<EndReason>,
}

impl SimulationEngine {
    /// Construct an engine, rejecting invalid configuration up front.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(SimulationEngine {
            config,
            cycles: Vec::new(),
            status: EngineStatus::Ready,
            end_reason: None,
        })
    }

    /// Process the next cycle.
    ///
    /// Returns the newly appended record, or None if the engine is already
    /// finished (a no-op: the history is not touched).
    pub fn advance(&mut self) -> Option<Cycle> {
        if self.status == EngineStatus::Finished {
            return None;
        }

        let cycle_number = self.cycles.len() + 1;
        let (deposit, total_money_supply) = match self.cycles.last() {
            None => {
                let deposit = round_to_cent(self.config.initial_deposit);
                (deposit, deposit)
            }
            // The previous loan is already cent-rounded.
            Some(prev) => (prev.loan, round_to_cent(prev.total_money_supply + prev.loan)),
        };

        let reserve = round_to_cent(deposit * self.config.reserve_ratio);

        // Reserve constraint: with a positive ratio, a deposit too small to
        // withhold a single cent cannot maintain the ratio. Record the
        // degenerate cycle and end the run.
        if self.config.reserve_ratio > 0.0 && reserve < MIN_CURRENCY_UNIT {
            let cycle = Cycle {
                cycle_number,
                deposit,
                reserve: 0.0,
                loan: 0.0,
                total_money_supply,
                is_valid: false,
            };
            self.cycles.push(cycle);
            self.finish(EndReason::InsufficientReserves);
            return Some(cycle);
        }

        let loan = round_to_cent(deposit - reserve).max(0.0);
        let cycle = Cycle {
            cycle_number,
            deposit,
            reserve,
            loan,
            total_money_supply,
            is_valid: true,
        };
        self.cycles.push(cycle);
        self.status = EngineStatus::Running;

        if loan <= MIN_CURRENCY_UNIT {
            self.finish(EndReason::NaturalCompletion);
        } else if self.config.max_cycles.is_some_and(|cap| cycle_number >= cap) {
            self.finish(EndReason::MaxCyclesReached);
        } else if cycle_number >= HARD_CYCLE_CAP {
            self.finish(EndReason::MaxCyclesReached);
        }

        Some(cycle)
    }

    /// Repeatedly advance until the engine finishes or `step_limit` cycles
    /// have been appended by this call (defaults to the hard cap).
    ///
    /// The loop is one `advance()` per iteration, so a caller wrapping this
    /// with its own loop can stop between any two cycles.
    pub fn run_to_completion(&mut self, step_limit: Option<usize>) -> Vec<Cycle> {
        let limit = step_limit.unwrap_or(HARD_CYCLE_CAP);
        let mut appended = Vec::new();
        while appended.len() < limit {
            match self.advance() {
                Some(cycle) => appended.push(cycle),
                None => break,
            }
        }
        appended
    }

    /// Discard the entire history and return to the initial state.
    pub fn reset(&mut self) {
        self.cycles.clear();
        self.status = EngineStatus::Ready;
        self.end_reason = None;
    }

    fn finish(&mut self, reason: EndReason) {
        self.status = EngineStatus::Finished;
        self.end_reason = Some(reason);
    }

    /// Ordered, append-only sequence of processed cycles.
    pub fn history(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Whether another `advance()` call can still produce a cycle.
    pub fn can_advance(&self) -> bool {
        self.status != EngineStatus::Finished
    }

    /// Current total money supply, 0 before the first cycle.
    pub fn total_money_supply(&self) -> f64 {
        self.cycles.last().map_or(0.0, |c| c.total_money_supply)
    }

    /// How much the money supply has expanded relative to the seed deposit,
    /// 0 before the first cycle.
    pub fn money_multiplier(&self) -> f64 {
        if self.cycles.is_empty() {
            0.0
        } else {
            self.total_money_supply() / self.config.initial_deposit
        }
    }

    /// New money created beyond the seed deposit, 0 before the first cycle.
    pub fn money_created(&self) -> f64 {
        if self.cycles.is_empty() {
            0.0
        } else {
            round_to_cent(self.total_money_supply() - self.config.initial_deposit)
        }
    }

    /// Smallest deposit that still satisfies the reserve constraint.
    pub fn min_viable_deposit(&self) -> f64 {
        self.config.min_viable_deposit()
    }

    /// Geometric-series limit of the total money supply, None for a zero
    /// reserve ratio.
    pub fn theoretical_limit(&self) -> Option<f64> {
        self.config.theoretical_limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn engine(initial_deposit: f64, reserve_ratio: f64, max_cycles: Option<usize>) -> SimulationEngine {
        SimulationEngine::new(
            SimulationConfig::new(initial_deposit, reserve_ratio, max_cycles).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn starts_ready_with_empty_history() {
        let engine = engine(1000.0, 0.1, None);
        assert_eq!(engine.status(), EngineStatus::Ready);
        assert!(engine.history().is_empty());
        assert_eq!(engine.end_reason(), None);
        assert!(engine.can_advance());
        assert_eq!(engine.total_money_supply(), 0.0);
        assert_eq!(engine.money_multiplier(), 0.0);
        assert_eq!(engine.money_created(), 0.0);
    }

    #[test]
    fn first_advance_moves_to_running() {
        let mut engine = engine(1000.0, 0.1, None);
        let cycle = engine.advance().unwrap();

        assert_eq!(engine.status(), EngineStatus::Running);
        assert_eq!(cycle.cycle_number, 1);
        assert_eq!(cycle.deposit, 1000.0);
        assert_eq!(cycle.reserve, 100.0);
        assert_eq!(cycle.loan, 900.0);
        assert_eq!(cycle.total_money_supply, 1000.0);
        assert!(cycle.is_valid);
    }

    #[test]
    fn initial_deposit_is_rounded_before_use() {
        let mut engine = engine(999.999, 0.1, None);
        let cycle = engine.advance().unwrap();
        assert_eq!(cycle.deposit, 1000.0);
        assert_eq!(cycle.total_money_supply, 1000.0);
    }

    #[test]
    fn each_stage_is_rounded_to_the_cent() {
        // 123.45 * 0.33 = 40.7385, rounds to 40.74; loan = 82.71
        let mut engine = engine(123.45, 0.33, None);
        let cycle = engine.advance().unwrap();
        assert_eq!(cycle.reserve, 40.74);
        assert_eq!(cycle.loan, 82.71);
        assert_abs_diff_eq!(cycle.reserve + cycle.loan, cycle.deposit, epsilon = 1e-9);
    }

    #[test]
    fn full_reserve_finishes_on_first_cycle() {
        let mut engine = engine(1000.0, 1.0, None);
        let cycle = engine.advance().unwrap();

        assert_eq!(cycle.reserve, 1000.0);
        assert_eq!(cycle.loan, 0.0);
        assert_eq!(engine.status(), EngineStatus::Finished);
        assert_eq!(engine.end_reason(), Some(EndReason::NaturalCompletion));
        assert_eq!(engine.total_money_supply(), 1000.0);
        assert_eq!(engine.money_created(), 0.0);
    }

    #[test]
    fn insufficient_reserve_cycle_is_degenerate_and_terminal() {
        // 0.04 * 0.1 rounds to 0.00, below one cent
        let mut engine = engine(0.04, 0.1, None);
        let cycle = engine.advance().unwrap();

        assert!(!cycle.is_valid);
        assert_eq!(cycle.reserve, 0.0);
        assert_eq!(cycle.loan, 0.0);
        assert_eq!(cycle.total_money_supply, 0.04);
        assert_eq!(engine.status(), EngineStatus::Finished);
        assert_eq!(engine.end_reason(), Some(EndReason::InsufficientReserves));
    }

    #[test]
    fn max_cycles_caps_the_run() {
        let mut engine = engine(1000.0, 0.1, Some(3));
        let appended = engine.run_to_completion(None);

        assert_eq!(appended.len(), 3);
        assert_eq!(engine.history().len(), 3);
        assert_eq!(engine.end_reason(), Some(EndReason::MaxCyclesReached));
    }

    #[test]
    fn zero_ratio_runs_to_hard_cap() {
        let mut engine = engine(1000.0, 0.0, None);
        engine.run_to_completion(None);

        assert_eq!(engine.history().len(), HARD_CYCLE_CAP);
        assert_eq!(engine.end_reason(), Some(EndReason::MaxCyclesReached));

        // Every cycle is fully loanable; the supply keeps growing linearly.
        let last = engine.history().last().unwrap();
        assert_eq!(last.reserve, 0.0);
        assert_eq!(last.loan, 1000.0);
        assert_eq!(last.total_money_supply, 1000.0 * HARD_CYCLE_CAP as f64);
    }

    #[test]
    fn advance_after_finished_is_a_noop() {
        let mut engine = engine(1000.0, 1.0, None);
        engine.run_to_completion(None);
        let history_before: Vec<Cycle> = engine.history().to_vec();

        assert_eq!(engine.advance(), None);
        assert_eq!(engine.history(), history_before.as_slice());
        assert_eq!(engine.status(), EngineStatus::Finished);
    }

    #[test]
    fn run_to_completion_respects_step_limit() {
        let mut engine = engine(1000.0, 0.1, None);
        let first_batch = engine.run_to_completion(Some(2));

        assert_eq!(first_batch.len(), 2);
        assert_eq!(engine.status(), EngineStatus::Running);

        // Resuming picks up exactly where the first batch stopped.
        let second_batch = engine.run_to_completion(Some(1));
        assert_eq!(second_batch[0].cycle_number, 3);
        assert_eq!(second_batch[0].deposit, first_batch[1].loan);
    }

    #[test]
    fn run_to_completion_returns_only_newly_appended_cycles() {
        let mut engine = engine(1000.0, 0.9, None);
        engine.advance().unwrap();

        let appended = engine.run_to_completion(None);
        assert_eq!(appended[0].cycle_number, 2);
        assert_eq!(engine.history().len(), appended.len() + 1);
        assert_eq!(engine.status(), EngineStatus::Finished);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut engine = engine(1000.0, 0.1, None);
        engine.run_to_completion(None);
        assert_eq!(engine.status(), EngineStatus::Finished);

        engine.reset();
        assert_eq!(engine.status(), EngineStatus::Ready);
        assert!(engine.history().is_empty());
        assert_eq!(engine.end_reason(), None);
        assert!(engine.can_advance());
    }

    #[test]
    fn derived_queries_track_the_run() {
        let mut engine = engine(1000.0, 0.1, Some(2));
        engine.run_to_completion(None);

        assert_eq!(engine.total_money_supply(), 1900.0);
        assert_abs_diff_eq!(engine.money_multiplier(), 1.9, epsilon = 1e-12);
        assert_eq!(engine.money_created(), 900.0);
        assert_abs_diff_eq!(engine.min_viable_deposit(), 0.1, epsilon = 1e-12);
        assert_eq!(engine.theoretical_limit(), Some(10_000.0));
    }

    #[test]
    fn construction_rejects_invalid_config() {
        let config = SimulationConfig {
            initial_deposit: 1000.0,
            reserve_ratio: 1.5,
            max_cycles: None,
        };
        assert!(SimulationEngine::new(config).is_err());
    }
}
