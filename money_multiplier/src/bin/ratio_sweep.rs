//! Reserve-Ratio Sweep Runner
//!
//! Runs the simulation to completion for a list of reserve ratios and
//! tabulates how the money multiplier responds. Sweeps are driven by TOML
//! configuration files and executed in parallel.
//!
//! Usage:
//!   cargo run --release --bin ratio_sweep -- experiments/ratio_sweep.toml

use money_multiplier::analysis::RunSummary;
use money_multiplier::{SimulationConfig, SimulationEngine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Top-level sweep configuration
#[derive(Debug, Clone, Deserialize)]
struct SweepConfig {
    experiment: ExperimentMetadata,
    model: ModelSettings,
    sweep: SweepSettings,
}

#[derive(Debug, Clone, Deserialize)]
struct ExperimentMetadata {
    name: String,
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ModelSettings {
    initial_deposit: f64,
    max_cycles: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
struct SweepSettings {
    ratios: Vec<f64>,
}

/// One row of the sweep result table
#[derive(Debug, Clone, Serialize)]
struct SweepRow {
    reserve_ratio: f64,
    cycles_run: usize,
    total_money_supply: f64,
    money_multiplier: f64,
    theoretical_limit: Option<f64>,
    end_reason: String,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <sweep_config.toml>", args[0]);
        eprintln!("Example: {} experiments/ratio_sweep.toml", args[0]);
        std::process::exit(1);
    }

    let config_path = &args[1];
    println!("=== Money Multiplier Ratio Sweep ===\n");
    println!("Loading sweep config: {}\n", config_path);

    let config_str = fs::read_to_string(config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let sweep_config: SweepConfig = toml::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing TOML config: {}", e);
        std::process::exit(1);
    });

    println!("Experiment: {}", sweep_config.experiment.name);
    println!("Description: {}", sweep_config.experiment.description);
    println!(
        "Sweeping {} reserve ratios at initial deposit ${:.2}\n",
        sweep_config.sweep.ratios.len(),
        sweep_config.model.initial_deposit
    );

    // Validate every swept configuration before spending time on any run.
    let configs: Vec<SimulationConfig> = sweep_config
        .sweep
        .ratios
        .iter()
        .map(|&ratio| {
            SimulationConfig::new(
                sweep_config.model.initial_deposit,
                ratio,
                sweep_config.model.max_cycles,
            )
            .unwrap_or_else(|e| {
                eprintln!("Invalid sweep entry (ratio {}): {}", ratio, e);
                std::process::exit(1);
            })
        })
        .collect();

    let rows: Vec<SweepRow> = configs
        .into_par_iter()
        .map(|config| {
            let mut engine =
                SimulationEngine::new(config).expect("config validated before sweep");
            engine.run_to_completion(None);
            let summary = RunSummary::from_engine(&engine);

            SweepRow {
                reserve_ratio: summary.reserve_ratio,
                cycles_run: summary.cycles_run,
                total_money_supply: summary.total_money_supply,
                money_multiplier: summary.money_multiplier,
                theoretical_limit: summary.theoretical_limit,
                end_reason: summary
                    .end_reason
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            }
        })
        .collect();

    println!(
        "{:>8} {:>8} {:>14} {:>12} {:>14}  {}",
        "Ratio", "Cycles", "Total Supply", "Multiplier", "Limit", "End Reason"
    );
    println!(
        "{:->8} {:->8} {:->14} {:->12} {:->14}  {:-<22}",
        "", "", "", "", "", ""
    );
    for row in &rows {
        println!(
            "{:>7.0}% {:>8} {:>14.2} {:>11.2}x {:>14}  {}",
            row.reserve_ratio * 100.0,
            row.cycles_run,
            row.total_money_supply,
            row.money_multiplier,
            row.theoretical_limit
                .map(|l| format!("{:.2}", l))
                .unwrap_or_else(|| "unbounded".to_string()),
            row.end_reason
        );
    }

    let output_dir = PathBuf::from("results").join(&sweep_config.experiment.name);
    fs::create_dir_all(&output_dir).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    write_sweep_csv(&rows, &output_dir).unwrap_or_else(|e| {
        eprintln!("Error writing sweep CSV: {}", e);
        std::process::exit(1);
    });

    let json = serde_json::to_string_pretty(&rows).unwrap_or_else(|e| {
        eprintln!("Error serializing sweep summary: {}", e);
        std::process::exit(1);
    });
    fs::write(output_dir.join("sweep_summary.json"), json).unwrap_or_else(|e| {
        eprintln!("Error writing sweep summary: {}", e);
        std::process::exit(1);
    });

    println!("\nResults saved to: {}", output_dir.display());
}

fn write_sweep_csv(
    rows: &[SweepRow],
    dir: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(dir.join("sweep.csv"))?;

    wtr.write_record([
        "reserve_ratio",
        "cycles_run",
        "total_money_supply",
        "money_multiplier",
        "theoretical_limit",
        "end_reason",
    ])?;

    for row in rows {
        wtr.write_record(&[
            row.reserve_ratio.to_string(),
            row.cycles_run.to_string(),
            format!("{:.2}", row.total_money_supply),
            format!("{:.4}", row.money_multiplier),
            row.theoretical_limit
                .map(|l| format!("{:.2}", l))
                .unwrap_or_default(),
            row.end_reason.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
