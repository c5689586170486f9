//! Hedge command implementation
//!
//! Runs the delta-hedging simulation on one realised path, prints the last
//! steps and the PnL summary, and optionally exports the full series.

use std::fs::File;
use std::io::BufWriter;

use pricer_risk::hedging::{run_hedge_simulation, HedgeConfig, HedgeReport};
use tracing::info;

use crate::config::DeskConfig;
use crate::Result;

/// Run the hedge command
pub fn run(config: &DeskConfig, output: Option<&str>, tail: usize) -> Result<()> {
    let note = config.product()?;
    let market = config.market()?;
    let grid = config.grid()?;
    let hedge: HedgeConfig = (&config.hedge).into();

    info!("Starting hedge simulation...");
    info!("  Steps: {}", grid.len().saturating_sub(1));
    info!("  Paths per repricing: {}", hedge.n_paths_pricing);
    info!("  Path seed: {}", hedge.seed_path);

    let report = run_hedge_simulation(&note, &market, &grid, &hedge)?;

    print_tail(&report, tail);
    print_summary(&report);

    if let Some(path) = output {
        info!("Writing hedge series to {}", path);
        report.write_csv(BufWriter::new(File::create(path)?))?;
    }

    info!("Hedge simulation complete");
    Ok(())
}

fn print_tail(report: &HedgeReport, tail: usize) {
    let cum = report.cumulative_pnl();
    let start = report.len().saturating_sub(tail);

    println!("\n┌────────┬──────────┬──────────────┬──────────────┬──────────────┐");
    println!("│ Step   │ Time     │ V product    │ PnL total    │ Cum PnL      │");
    println!("├────────┼──────────┼──────────────┼──────────────┼──────────────┤");
    for (i, record) in report.records().iter().enumerate().skip(start) {
        let pnl = record
            .pnl_total
            .map(|p| format!("{:>12.4}", p))
            .unwrap_or_else(|| format!("{:>12}", "-"));
        let running = cum
            .get(i)
            .map(|c| format!("{:>12.4}", c))
            .unwrap_or_else(|| format!("{:>12}", "-"));
        println!(
            "│ {:<6} │ {:>8.4} │ {:>12.4} │ {} │ {} │",
            record.step, record.time, record.product_value, pnl, running
        );
    }
    println!("└────────┴──────────┴──────────────┴──────────────┴──────────────┘");
}

fn print_summary(report: &HedgeReport) {
    let summary = report.summary();
    println!("\nFinal cumulative PnL: {:.4}", summary.final_cumulative_pnl);
    println!("PnL mean / std:       {:.4} / {:.4}", summary.mean_pnl, summary.std_pnl);
    println!("Worst / best step:    {:.4} / {:.4}", summary.worst_pnl, summary.best_pnl);
}
