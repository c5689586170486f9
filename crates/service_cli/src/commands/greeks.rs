//! Greeks command implementation
//!
//! Per-asset bump-and-reprice delta and vega with common random numbers.

use ndarray::Array1;
use pricer_pricing::greeks::{delta, vega};
use serde_json::json;
use tracing::info;

use super::OutputFormat;
use crate::config::DeskConfig;
use crate::Result;

/// Run the greeks command
pub fn run(config: &DeskConfig, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let note = config.product()?;
    let market = config.market()?;
    let grid = config.grid()?;
    let sim = &config.simulation;

    info!("Computing Greeks...");
    info!("  Delta bump (relative): {}", sim.delta_bump);
    info!("  Vega bump (absolute): {}", sim.vega_bump);

    let spot0 = Array1::<f64>::ones(market.n_assets());
    let deltas = delta(
        &note,
        &market,
        &grid,
        sim.n_paths,
        spot0.view(),
        sim.delta_bump,
        sim.seed,
    )?;
    let vegas = vega(&note, &market, &grid, sim.n_paths, sim.vega_bump, sim.seed)?;

    match format {
        OutputFormat::Json => {
            let out = json!({ "delta": deltas, "vega": vegas });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("\n┌────────┬──────────────┬──────────────┐");
            println!("│ Asset  │ Delta        │ Vega         │");
            println!("├────────┼──────────────┼──────────────┤");
            for (asset, (d, v)) in deltas.iter().zip(&vegas).enumerate() {
                println!("│ {:<6} │ {:>12.4} │ {:>12.4} │", asset, d, v);
            }
            println!("└────────┴──────────────┴──────────────┘");
        }
    }

    info!("Greeks complete");
    Ok(())
}
