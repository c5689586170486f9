//! Price command implementation
//!
//! Prices the configured note from time zero and reports run diagnostics.

use pricer_pricing::mc::price_with_diagnostics;
use pricer_pricing::rng::PricerRng;
use serde_json::json;
use tracing::info;

use super::OutputFormat;
use crate::config::DeskConfig;
use crate::Result;

/// Run the price command
pub fn run(config: &DeskConfig, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let note = config.product()?;
    let market = config.market()?;
    let grid = config.grid()?;
    let sim = &config.simulation;

    info!("Starting pricing...");
    info!("  Monte Carlo paths: {}", sim.n_paths);
    info!("  Seed: {}", sim.seed);
    info!("  Grid points: {}", grid.len());

    let mut rng = PricerRng::from_seed(sim.seed);
    let (pv, diag) = price_with_diagnostics(&note, &market, &grid, sim.n_paths, &mut rng)?;

    match format {
        OutputFormat::Json => {
            let out = json!({ "price": pv, "diagnostics": diag });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("\n┌──────────────────────────┬──────────────┐");
            println!("│ Price                    │ {:>12.4} │", pv);
            println!("├──────────────────────────┼──────────────┤");
            println!("│ Std error                │ {:>12.4} │", diag.std_error);
            println!("│ 95% CI half-width        │ {:>12.4} │", diag.confidence_95());
            println!("│ Autocall probability     │ {:>12.4} │", diag.call_probability);
            println!("│ Mean redemption time     │ {:>12.4} │", diag.mean_tau);
            println!("│ Std discounted payoff    │ {:>12.4} │", diag.std_discounted_payoff);
            println!("│ Paths                    │ {:>12} │", diag.n_paths);
            println!("└──────────────────────────┴──────────────┘");
        }
    }

    info!("Pricing complete");
    Ok(())
}
