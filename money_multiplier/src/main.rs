//! Money Multiplier Simulation - console front-end
//!
//! Runs the fractional-reserve money-creation chain to completion and prints
//! the cycle table plus summary metrics.
//!
//! Usage:
//!   cargo run -- [initial_deposit] [reserve_ratio] [max_cycles] [output_dir]
//!
//! Defaults to the classroom example ($1000 at 10%). When an output
//! directory is given, the cycle history and summary are also written there
//! as CSV and JSON.

use money_multiplier::analysis::RunSummary;
use money_multiplier::output::SimulationOutput;
use money_multiplier::{SimulationConfig, SimulationEngine};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    let defaults = SimulationConfig::baseline();
    let initial_deposit = parse_arg(&args, 1, "initial_deposit", defaults.initial_deposit);
    let reserve_ratio = parse_arg(&args, 2, "reserve_ratio", defaults.reserve_ratio);
    let max_cycles = args.get(3).map(|raw| {
        raw.parse::<usize>().unwrap_or_else(|e| {
            eprintln!("Invalid max_cycles '{}': {}", raw, e);
            std::process::exit(1);
        })
    });
    let output_dir = args.get(4).cloned();

    let config = SimulationConfig::new(initial_deposit, reserve_ratio, max_cycles)
        .unwrap_or_else(|e| {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        });

    println!("=== Fractional-Reserve Money Multiplier ===\n");
    println!("Configuration:");
    println!("  Initial deposit: ${:.2}", config.initial_deposit);
    println!("  Reserve ratio: {:.0}%", config.reserve_ratio * 100.0);
    match config.max_cycles {
        Some(cap) => println!("  Max cycles: {}", cap),
        None => println!("  Max cycles: unbounded"),
    }
    println!();

    let mut engine = SimulationEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });
    engine.run_to_completion(None);

    println!(
        "{:>5}  {:<8} {:>12} {:>12} {:>12} {:>14}",
        "Cycle", "Bank", "Deposit", "Reserve", "Loan", "Total Supply"
    );
    println!(
        "{:->5}  {:-<8} {:->12} {:->12} {:->12} {:->14}",
        "", "", "", "", "", ""
    );
    for cycle in engine.history() {
        println!(
            "{:>5}  {:<8} {:>12.2} {:>12.2} {:>12.2} {:>14.2}{}",
            cycle.cycle_number,
            cycle.bank_label(),
            cycle.deposit,
            cycle.reserve,
            cycle.loan,
            cycle.total_money_supply,
            if cycle.is_valid { "" } else { "  (degenerate)" }
        );
    }
    println!();

    let summary = RunSummary::from_engine(&engine);
    summary.print_summary();

    if let Some(dir) = output_dir {
        let output = SimulationOutput::from_engine(&engine);
        output.write_all(&dir).unwrap_or_else(|e| {
            eprintln!("Error writing output to {}: {}", dir, e);
            std::process::exit(1);
        });
        println!("\nResults written to: {}", dir);
    }
}

fn parse_arg(args: &[String], index: usize, name: &str, default: f64) -> f64 {
    match args.get(index) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            eprintln!("Invalid {} '{}': {}", name, raw, e);
            std::process::exit(1);
        }),
        None => default,
    }
}
