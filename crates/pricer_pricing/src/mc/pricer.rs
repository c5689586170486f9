//! Monte Carlo pricer for the worst-of autocallable.
//!
//! The price is the sample mean of discounted redemptions:
//! ```text
//! V = mean_p( exp(-r × tau_p) × payoff_p )
//! ```
//!
//! Two entry points:
//! - [`price`] / [`price_with_diagnostics`]: from time zero, all assets at 1
//! - [`price_from_state`] / [`price_from_state_with_diagnostics`]: from an
//!   intermediate date given the current levels, on a remaining grid

use ndarray::{ArrayView1, Axis};
use pricer_core::{obs_times_to_indices, MarketParams, TimeGrid, TIME_TOLERANCE};
use pricer_models::AutocallableWorstOf;
use tracing::{debug, warn};

use super::error::PricingError;
use super::paths::{simulate_paths, simulate_paths_from, PathTensor};
use crate::rng::PricerRng;

/// Convergence diagnostics of a Monte Carlo run.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingDiagnostics;
///
/// let diag = PricingDiagnostics {
///     n_paths: 10_000,
///     call_probability: 0.6,
///     mean_tau: 0.55,
///     mean_discounted_payoff: 98.0,
///     std_discounted_payoff: 12.0,
///     std_error: 0.12,
/// };
/// assert!((diag.confidence_95() - 1.96 * 0.12).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingDiagnostics {
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Fraction of paths redeemed strictly before maturity.
    pub call_probability: f64,
    /// Mean redemption time.
    pub mean_tau: f64,
    /// Mean discounted payoff (the price).
    pub mean_discounted_payoff: f64,
    /// Sample standard deviation of discounted payoffs (Bessel-corrected).
    pub std_discounted_payoff: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
}

impl PricingDiagnostics {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Prices the note from time zero.
///
/// Observation times are mapped onto `grid`; all assets start at 1.
///
/// # Errors
///
/// Returns `PricingError` if `n_paths` is invalid, the observation schedule
/// does not map onto the grid, the correlation matrix cannot be factorised,
/// or the basket has fewer than two assets.
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use pricer_core::{make_time_grid, MarketParams};
/// use pricer_models::AutocallableWorstOf;
/// use pricer_pricing::mc::price;
/// use pricer_pricing::rng::PricerRng;
///
/// let market = MarketParams::new(0.02, array![0.25, 0.3], array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
/// let grid = make_time_grid(1.0, 52).unwrap();
/// let note = AutocallableWorstOf::new(1.0, vec![0.25, 0.5, 0.75, 1.0], 0.08, 1.0, 0.6, 100.0).unwrap();
///
/// let pv = price(&note, &market, &grid, 2_000, &mut PricerRng::from_seed(0)).unwrap();
/// assert!(pv > 0.0 && pv < 200.0);
/// ```
pub fn price(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    grid: &TimeGrid,
    n_paths: usize,
    rng: &mut PricerRng,
) -> Result<f64, PricingError> {
    price_with_diagnostics(product, market, grid, n_paths, rng).map(|(pv, _)| pv)
}

/// As [`price`], also returning run diagnostics.
pub fn price_with_diagnostics(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    grid: &TimeGrid,
    n_paths: usize,
    rng: &mut PricerRng,
) -> Result<(f64, PricingDiagnostics), PricingError> {
    check_horizon(product, grid);
    let obs_indices = obs_times_to_indices(grid, product.obs_times())?;
    let paths = simulate_paths(grid, market, n_paths, rng)?;
    evaluate(product, market, &paths, &obs_indices)
}

/// Prices the note from an intermediate state.
///
/// `product` and `grid_remaining` are expressed from the current date
/// (time zero is now); `current_levels` are the realised normalised levels
/// and `obs_indices` the remaining observations on `grid_remaining`.
///
/// # Errors
///
/// As [`price`], plus `PricingError::LevelsShape` or
/// `PricingError::InvalidLevel` for a bad `current_levels` vector.
pub fn price_from_state(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    grid_remaining: &TimeGrid,
    current_levels: ArrayView1<'_, f64>,
    obs_indices: &[usize],
    n_paths: usize,
    rng: &mut PricerRng,
) -> Result<f64, PricingError> {
    price_from_state_with_diagnostics(
        product,
        market,
        grid_remaining,
        current_levels,
        obs_indices,
        n_paths,
        rng,
    )
    .map(|(pv, _)| pv)
}

/// As [`price_from_state`], also returning run diagnostics.
pub fn price_from_state_with_diagnostics(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    grid_remaining: &TimeGrid,
    current_levels: ArrayView1<'_, f64>,
    obs_indices: &[usize],
    n_paths: usize,
    rng: &mut PricerRng,
) -> Result<(f64, PricingDiagnostics), PricingError> {
    check_horizon(product, grid_remaining);
    let paths = simulate_paths_from(grid_remaining, market, current_levels, n_paths, rng)?;
    evaluate(product, market, &paths, obs_indices)
}

fn check_horizon(product: &AutocallableWorstOf, grid: &TimeGrid) {
    if (product.maturity() - grid.horizon()).abs() > TIME_TOLERANCE {
        warn!(
            maturity = product.maturity(),
            horizon = grid.horizon(),
            "product maturity differs from grid horizon; redemption uses the last grid step"
        );
    }
}

fn evaluate(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    paths: &PathTensor,
    obs_indices: &[usize],
) -> Result<(f64, PricingDiagnostics), PricingError> {
    let n_paths = paths.len_of(Axis(0));
    let rate = market.rate();
    let call_cutoff = product.maturity() - TIME_TOLERANCE;

    let mut discounted = Vec::with_capacity(n_paths);
    let mut n_called = 0usize;
    let mut tau_sum = 0.0;

    for path in paths.outer_iter() {
        let redemption = product.redemption(path, obs_indices)?;
        discounted.push((-rate * redemption.tau).exp() * redemption.payoff);
        tau_sum += redemption.tau;
        if redemption.tau < call_cutoff {
            n_called += 1;
        }
    }

    let n = n_paths as f64;
    let mean = discounted.iter().sum::<f64>() / n;
    let std = if n_paths > 1 {
        let ss: f64 = discounted.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    let diagnostics = PricingDiagnostics {
        n_paths,
        call_probability: n_called as f64 / n,
        mean_tau: tau_sum / n,
        mean_discounted_payoff: mean,
        std_discounted_payoff: std,
        std_error: std / n.sqrt(),
    };

    debug!(
        n_paths,
        price = mean,
        std_error = diagnostics.std_error,
        call_probability = diagnostics.call_probability,
        "priced autocallable"
    );

    Ok((mean, diagnostics))
}
