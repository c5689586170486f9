//! Correlated lognormal path generation.
//!
//! Each asset follows risk-neutral Geometric Brownian Motion, simulated
//! exactly in log space on a uniform grid:
//! ```text
//! S_a(t) = S_a(t-1) × exp((r - ½σ_a²)dt + σ_a√dt × W_a)
//! W = L × Z,    C = L × Lᵀ
//! ```
//!
//! # Memory Layout
//!
//! Paths are returned as a [`PathTensor`] indexed `[path, step, asset]`;
//! `step = 0` holds the initial levels.
//!
//! # Draw Order
//!
//! Normals are drawn step-major, then by path, then by asset. Two runs with
//! equal seeds and equal shapes therefore see identical shocks, whatever the
//! initial levels or volatilities.

use ndarray::{s, Array1, Array3, ArrayView1};
use pricer_core::{MarketParams, TimeGrid};
use tracing::trace;

use super::error::PricingError;
use crate::rng::PricerRng;

/// Simulated normalised levels, indexed `[path, step, asset]`.
pub type PathTensor = Array3<f64>;

/// Largest path count accepted by a single simulation.
pub const MAX_PATHS: usize = 10_000_000;

pub(crate) fn check_path_count(n_paths: usize) -> Result<(), PricingError> {
    if n_paths == 0 || n_paths > MAX_PATHS {
        return Err(PricingError::InvalidPathCount { n_paths });
    }
    Ok(())
}

pub(crate) fn check_levels(levels: ArrayView1<'_, f64>, n_assets: usize) -> Result<(), PricingError> {
    if levels.len() != n_assets {
        return Err(PricingError::LevelsShape {
            got: levels.len(),
            expected: n_assets,
        });
    }
    for (index, &value) in levels.iter().enumerate() {
        if !(value.is_finite() && value > 0.0) {
            return Err(PricingError::InvalidLevel { index, value });
        }
    }
    Ok(())
}

/// Simulates correlated paths starting from level 1 for every asset.
///
/// # Errors
///
/// Returns `PricingError::InvalidPathCount` if `n_paths` is zero or above
/// [`MAX_PATHS`], and `PricingError::Correlation` if the correlation matrix
/// is not positive definite.
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use pricer_core::{make_time_grid, MarketParams};
/// use pricer_pricing::mc::simulate_paths;
/// use pricer_pricing::rng::PricerRng;
///
/// let market = MarketParams::new(0.02, array![0.2, 0.3], array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
/// let grid = make_time_grid(1.0, 12).unwrap();
/// let mut rng = PricerRng::from_seed(0);
///
/// let paths = simulate_paths(&grid, &market, 100, &mut rng).unwrap();
/// assert_eq!(paths.dim(), (100, 13, 2));
/// assert_eq!(paths[[5, 0, 1]], 1.0);
/// ```
pub fn simulate_paths(
    grid: &TimeGrid,
    market: &MarketParams,
    n_paths: usize,
    rng: &mut PricerRng,
) -> Result<PathTensor, PricingError> {
    let ones = Array1::<f64>::ones(market.n_assets());
    simulate_paths_from(grid, market, ones.view(), n_paths, rng)
}

/// Simulates correlated paths from the given per-asset initial levels.
///
/// Under GBM, starting from `S0` is the same as starting from 1 and
/// scaling the whole path by `S0`; spot bumps and state-conditional
/// pricing both go through here.
///
/// # Errors
///
/// As [`simulate_paths`], plus `PricingError::LevelsShape` or
/// `PricingError::InvalidLevel` for a bad `initial_levels` vector.
pub fn simulate_paths_from(
    grid: &TimeGrid,
    market: &MarketParams,
    initial_levels: ArrayView1<'_, f64>,
    n_paths: usize,
    rng: &mut PricerRng,
) -> Result<PathTensor, PricingError> {
    check_path_count(n_paths)?;
    let n_assets = market.n_assets();
    check_levels(initial_levels, n_assets)?;

    let chol = market.cholesky()?;
    let n_steps = grid.len();
    let dt = grid.dt();

    // Precompute per-asset drift and diffusion terms
    let vols = market.vols();
    let drift_dt = vols.mapv(|sigma| (market.rate() - 0.5 * sigma * sigma) * dt);
    let vol_sqrt_dt = vols.mapv(|sigma| sigma * dt.sqrt());

    let mut paths = PathTensor::zeros((n_paths, n_steps, n_assets));
    for mut start in paths.slice_mut(s![.., 0, ..]).outer_iter_mut() {
        start.assign(&initial_levels);
    }

    let mut z = vec![0.0; n_assets];
    let mut w = vec![0.0; n_assets];

    for step in 1..n_steps {
        for path in 0..n_paths {
            rng.fill_normal(&mut z);
            chol.transform_into(&z, &mut w);

            for asset in 0..n_assets {
                let increment = drift_dt[asset] + vol_sqrt_dt[asset] * w[asset];
                paths[[path, step, asset]] = paths[[path, step - 1, asset]] * increment.exp();
            }
        }
    }

    trace!(
        n_paths,
        n_steps,
        n_assets,
        seed = rng.seed(),
        "simulated correlated paths"
    );

    Ok(paths)
}
