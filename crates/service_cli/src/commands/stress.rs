//! Stress command implementation
//!
//! Reprices the note under the standard scenario set with a common seed.

use pricer_risk::scenarios::{run_stress_test, StressScenario};
use tracing::info;

use super::OutputFormat;
use crate::config::DeskConfig;
use crate::Result;

/// Run the stress command
pub fn run(config: &DeskConfig, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let note = config.product()?;
    let market = config.market()?;
    let grid = config.grid()?;
    let sim = &config.simulation;

    let scenarios = StressScenario::standard();
    info!("Running {} stress scenarios...", scenarios.len());

    let results = run_stress_test(&note, &grid, &market, &scenarios, sim.n_paths, sim.seed)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Table => {
            println!("\n┌──────────────────┬──────────────┬──────────────┐");
            println!("│ Scenario         │ Price        │ PnL vs base  │");
            println!("├──────────────────┼──────────────┼──────────────┤");
            for r in &results {
                println!(
                    "│ {:<16} │ {:>12.4} │ {:>12.4} │",
                    r.scenario.name(),
                    r.price,
                    r.pnl_vs_base
                );
            }
            println!("└──────────────────┴──────────────┴──────────────┘");
        }
    }

    info!("Stress tests complete");
    Ok(())
}
