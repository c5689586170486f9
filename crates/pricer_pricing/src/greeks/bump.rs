//! Finite-difference Greeks.

use ndarray::{Array1, ArrayView1};
use pricer_core::{obs_times_to_indices, MarketParams, TimeGrid};
use pricer_models::AutocallableWorstOf;
use tracing::debug;

use crate::mc::{check_levels, price, price_from_state, PricingError};
use crate::rng::PricerRng;

fn check_rel_bump(rel_bump: f64) -> Result<(), PricingError> {
    if !(rel_bump.is_finite() && rel_bump != 0.0 && rel_bump > -1.0) {
        return Err(PricingError::InvalidBump {
            name: "relative spot bump",
            value: rel_bump,
        });
    }
    Ok(())
}

fn check_abs_bump(abs_bump: f64) -> Result<(), PricingError> {
    if !(abs_bump.is_finite() && abs_bump != 0.0) {
        return Err(PricingError::InvalidBump {
            name: "absolute volatility bump",
            value: abs_bump,
        });
    }
    Ok(())
}

/// Per-asset delta from time zero.
///
/// Asset `i` is bumped by scaling its initial normalised level by
/// `1 + rel_bump`; the price change is divided by `spot0[i] × rel_bump`, so
/// `spot0` sets the units of the result (pass ones for sensitivity to the
/// normalised level).
///
/// # Errors
///
/// Returns `PricingError::InvalidBump` for a zero, non-finite or `<= -1`
/// bump, `PricingError::LevelsShape` / `InvalidLevel` for a bad `spot0`,
/// and any pricing error from the underlying runs.
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use pricer_core::{make_time_grid, MarketParams};
/// use pricer_models::AutocallableWorstOf;
/// use pricer_pricing::greeks::delta;
///
/// let market = MarketParams::new(0.02, array![0.25, 0.3], array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
/// let grid = make_time_grid(1.0, 12).unwrap();
/// let note = AutocallableWorstOf::new(1.0, vec![0.5, 1.0], 0.08, 1.0, 0.6, 100.0).unwrap();
///
/// let d = delta(&note, &market, &grid, 1_000, array![1.0, 1.0].view(), 0.01, 0).unwrap();
/// assert_eq!(d.len(), 2);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn delta(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    grid: &TimeGrid,
    n_paths: usize,
    spot0: ArrayView1<'_, f64>,
    rel_bump: f64,
    seed: u64,
) -> Result<Vec<f64>, PricingError> {
    check_rel_bump(rel_bump)?;
    check_levels(spot0, market.n_assets())?;

    let obs_indices = obs_times_to_indices(grid, product.obs_times())?;
    let base = price(product, market, grid, n_paths, &mut PricerRng::from_seed(seed))?;

    let mut deltas = Vec::with_capacity(market.n_assets());
    for (asset, &s0) in spot0.iter().enumerate() {
        let mut levels = Array1::<f64>::ones(market.n_assets());
        levels[asset] *= 1.0 + rel_bump;

        let bumped = price_from_state(
            product,
            market,
            grid,
            levels.view(),
            &obs_indices,
            n_paths,
            &mut PricerRng::from_seed(seed),
        )?;
        deltas.push((bumped - base) / (s0 * rel_bump));
    }

    debug!(?deltas, seed, rel_bump, "computed delta");
    Ok(deltas)
}

/// Per-asset delta from an intermediate state.
///
/// See [`price_and_delta_from_state`].
#[allow(clippy::too_many_arguments)]
pub fn delta_from_state(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    grid_remaining: &TimeGrid,
    current_levels: ArrayView1<'_, f64>,
    obs_indices: &[usize],
    n_paths: usize,
    rel_bump: f64,
    seed: u64,
) -> Result<Vec<f64>, PricingError> {
    price_and_delta_from_state(
        product,
        market,
        grid_remaining,
        current_levels,
        obs_indices,
        n_paths,
        rel_bump,
        seed,
    )
    .map(|(_, deltas)| deltas)
}

/// Price and per-asset delta from an intermediate state.
///
/// The base price equals `price_from_state` with a generator seeded by
/// `seed`. Asset `i` is bumped to `current_levels[i] × (1 + rel_bump)`
/// and the price change divided by `current_levels[i] × rel_bump`.
///
/// # Errors
///
/// As [`delta`], with `current_levels` validated in place of `spot0`.
#[allow(clippy::too_many_arguments)]
pub fn price_and_delta_from_state(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    grid_remaining: &TimeGrid,
    current_levels: ArrayView1<'_, f64>,
    obs_indices: &[usize],
    n_paths: usize,
    rel_bump: f64,
    seed: u64,
) -> Result<(f64, Vec<f64>), PricingError> {
    check_rel_bump(rel_bump)?;

    let base = price_from_state(
        product,
        market,
        grid_remaining,
        current_levels,
        obs_indices,
        n_paths,
        &mut PricerRng::from_seed(seed),
    )?;

    let mut deltas = Vec::with_capacity(market.n_assets());
    for (asset, &level) in current_levels.iter().enumerate() {
        let mut bumped_levels = current_levels.to_owned();
        bumped_levels[asset] = level * (1.0 + rel_bump);

        let bumped = price_from_state(
            product,
            market,
            grid_remaining,
            bumped_levels.view(),
            obs_indices,
            n_paths,
            &mut PricerRng::from_seed(seed),
        )?;
        deltas.push((bumped - base) / (level * rel_bump));
    }

    Ok((base, deltas))
}

/// Per-asset vega from time zero.
///
/// Volatility `i` is shifted by `abs_bump` (absolute, e.g. 0.01 for one
/// vol point) and the price change divided by `abs_bump`.
///
/// # Errors
///
/// Returns `PricingError::VolatilityBump` if a shifted volatility is not
/// positive, `PricingError::InvalidBump` for a zero or non-finite bump, and
/// any pricing error from the underlying runs.
pub fn vega(
    product: &AutocallableWorstOf,
    market: &MarketParams,
    grid: &TimeGrid,
    n_paths: usize,
    abs_bump: f64,
    seed: u64,
) -> Result<Vec<f64>, PricingError> {
    check_abs_bump(abs_bump)?;
    for (asset, &vol) in market.vols().iter().enumerate() {
        if !(vol + abs_bump > 0.0) {
            return Err(PricingError::VolatilityBump {
                asset,
                vol,
                bump: abs_bump,
            });
        }
    }

    let base = price(product, market, grid, n_paths, &mut PricerRng::from_seed(seed))?;

    let mut vegas = Vec::with_capacity(market.n_assets());
    for asset in 0..market.n_assets() {
        let bumped_market = market.with_bumped_vol(asset, abs_bump)?;
        let bumped = price(
            product,
            &bumped_market,
            grid,
            n_paths,
            &mut PricerRng::from_seed(seed),
        )?;
        vegas.push((bumped - base) / abs_bump);
    }

    debug!(?vegas, seed, abs_bump, "computed vega");
    Ok(vegas)
}
