//! Demonstration of caller-driven stepping
//!
//! The engine keeps no timer state: "play" mode is just a caller invoking
//! `advance()` on whatever cadence it owns. This example steps manually,
//! interrupts mid-run, then resets and replays the identical configuration.

use money_multiplier::{SimulationConfig, SimulationEngine};

fn main() {
    let config = SimulationConfig::baseline();
    let mut engine = SimulationEngine::new(config).expect("baseline config is valid");

    println!("=== Manual Stepping Demo ===\n");
    println!("Stepping five cycles by hand (a UI would do this on a timer):\n");

    for _ in 0..5 {
        match engine.advance() {
            Some(cycle) => println!(
                "  {}: deposit ${:.2} -> reserve ${:.2}, loan ${:.2} (supply ${:.2})",
                cycle.bank_label(),
                cycle.deposit,
                cycle.reserve,
                cycle.loan,
                cycle.total_money_supply
            ),
            None => {
                println!("  engine finished early");
                break;
            }
        }
    }

    println!("\nPausing here - nothing is scheduled, the engine just waits.");
    println!(
        "Status: {}, supply so far ${:.2}, multiplier {:.2}x\n",
        engine.status(),
        engine.total_money_supply(),
        engine.money_multiplier()
    );

    println!("Resuming with an interruptible batch loop, stopping at cycle 20:\n");
    while engine.can_advance() {
        // One advance per iteration, so the caller can bail between cycles.
        if engine.history().len() >= 20 {
            println!("  caller stopped the run at cycle 20");
            break;
        }
        engine.advance();
    }

    println!("\nReset and replay the same configuration to completion:");
    engine.reset();
    let cycles = engine.run_to_completion(None);
    println!(
        "  {} cycles, end reason: {}",
        cycles.len(),
        engine
            .end_reason()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "  final supply ${:.2} ({:.2}x multiplier)",
        engine.total_money_supply(),
        engine.money_multiplier()
    );
}
