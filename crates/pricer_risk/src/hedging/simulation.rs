//! Discrete delta hedging along one realised path.
//!
//! At each grid step before maturity:
//! 1. Rebase the product and grid to the current date
//! 2. Price and delta from the realised levels (fresh seed per step)
//! 3. Rebalance to `q = -delta`, funding the trade from cash
//! 4. Accrue cash to the next step
//! 5. Mark the hedge before and after the next move

use ndarray::{Array1, Axis};
use pricer_core::{obs_times_to_indices, MarketParams, TimeGrid};
use pricer_models::AutocallableWorstOf;
use pricer_pricing::greeks::price_and_delta_from_state;
use pricer_pricing::mc::simulate_paths;
use pricer_pricing::rng::PricerRng;
use tracing::{debug, trace};

use super::book::HedgeBook;
use super::error::HedgeError;
use super::report::{HedgeRecord, HedgeReport};

/// Run settings for [`run_hedge_simulation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HedgeConfig {
    /// Paths per repricing at each step.
    pub n_paths_pricing: usize,
    /// Relative spot bump for delta.
    pub rel_bump: f64,
    /// Seed of the realised path.
    pub seed_path: u64,
    /// Base seed of the pricer; step `k` uses `seed_pricer + k`.
    pub seed_pricer: u64,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            n_paths_pricing: 20_000,
            rel_bump: 0.01,
            seed_path: 123,
            seed_pricer: 0,
        }
    }
}

/// Simulates a delta-hedged short position in `product` along one
/// realised path of `full_grid`.
///
/// The realised path is drawn from `market` with `config.seed_path`. When
/// no observation date remains, the product is observed only at its
/// remaining maturity (the last grid index). No rebalancing happens at
/// maturity itself.
///
/// # Errors
///
/// Returns `HedgeError::GridTooShort` for a single-point grid and
/// propagates pricing, grid and product errors from each step.
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use pricer_core::{make_time_grid, MarketParams};
/// use pricer_models::AutocallableWorstOf;
/// use pricer_risk::hedging::{run_hedge_simulation, HedgeConfig};
///
/// let market = MarketParams::new(0.0, array![0.2, 0.2], array![[1.0, 0.2], [0.2, 1.0]]).unwrap();
/// let note = AutocallableWorstOf::new(0.1, vec![0.1], 0.05, 1.0, 0.6, 100.0).unwrap();
/// let grid = make_time_grid(0.1, 50).unwrap();
///
/// let config = HedgeConfig { n_paths_pricing: 200, ..HedgeConfig::default() };
/// let report = run_hedge_simulation(&note, &market, &grid, &config).unwrap();
/// assert_eq!(report.len(), grid.len() - 1);
/// ```
pub fn run_hedge_simulation(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    full_grid: &TimeGrid,
    config: &HedgeConfig,
) -> Result<HedgeReport, HedgeError> {
    let n_steps = full_grid.len();
    if n_steps < 2 {
        return Err(HedgeError::GridTooShort { len: n_steps });
    }

    let realised_paths = simulate_paths(
        full_grid,
        market,
        1,
        &mut PricerRng::from_seed(config.seed_path),
    )?;
    let realised = realised_paths.index_axis(Axis(0), 0);
    let times = full_grid.times();
    let n_assets = market.n_assets();

    debug!(
        n_steps,
        n_assets,
        seed_path = config.seed_path,
        n_paths_pricing = config.n_paths_pricing,
        "starting hedge simulation"
    );

    let mut book = HedgeBook::new(n_assets);
    let mut records = Vec::with_capacity(n_steps - 1);

    for step in 0..n_steps - 1 {
        let now = times[step];
        let levels = realised.row(step);
        let levels_next = realised.row(step + 1);

        let grid_remaining = full_grid.remaining_from(step)?;
        let remaining = product.remaining(now)?;
        let (product_remaining, obs_indices) = if remaining.obs_times().is_empty() {
            let at_maturity = remaining.with_obs_times(vec![remaining.maturity()])?;
            (at_maturity, vec![grid_remaining.last_index()])
        } else {
            let indices = obs_times_to_indices(&grid_remaining, remaining.obs_times())?;
            (remaining, indices)
        };

        let (product_value, delta) = price_and_delta_from_state(
            &product_remaining,
            market,
            &grid_remaining,
            levels,
            &obs_indices,
            config.n_paths_pricing,
            config.rel_bump,
            config.seed_pricer.wrapping_add(step as u64),
        )?;

        let target: Array1<f64> = delta.iter().map(|d| -d).collect();
        book.rebalance(target.view(), levels);
        book.accrue(market.rate(), times[step + 1] - now);

        let hedge_value = book.value(levels);
        let hedge_value_next = book.value(levels_next);

        trace!(step, time = now, product_value, ?delta, cash = book.cash(), "hedge step");

        records.push(HedgeRecord {
            step,
            time: now,
            product_value,
            delta,
            position: book.position().to_vec(),
            levels: levels.to_vec(),
            cash: book.cash(),
            hedge_value,
            hedge_value_next,
            product_value_next: None,
            pnl_product: None,
            pnl_hedge: hedge_value_next - hedge_value,
            pnl_total: None,
        });
    }

    let report = HedgeReport::new(n_assets, records);
    debug!(
        steps = report.len(),
        final_cumulative_pnl = report.summary().final_cumulative_pnl,
        "hedge simulation complete"
    );

    Ok(report)
}
