//! Market and simulation-grid model.
//!
//! Immutable value objects describing the Black-Scholes market for a basket
//! of assets and the time discretisation used by the Monte Carlo engine.
//!
//! # Components
//!
//! - [`params`]: Flat rate, per-asset volatility and correlation (`MarketParams`)
//! - [`grid`]: Uniform time grids, observation mapping, remaining horizons
//! - [`correlation`]: Cholesky factor of the correlation matrix
//! - [`error`]: Construction and mapping errors
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use pricer_core::market_data::{make_time_grid, obs_times_to_indices, MarketParams};
//!
//! let market = MarketParams::new(0.02, array![0.25, 0.30], array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
//! let grid = make_time_grid(1.0, 252).unwrap();
//! let obs = obs_times_to_indices(&grid, &[0.25, 0.5, 0.75, 1.0]).unwrap();
//!
//! assert_eq!(market.n_assets(), 2);
//! assert_eq!(obs[3], 252);
//! ```

pub mod correlation;
pub mod error;
pub mod grid;
pub mod params;

// Re-export commonly used types
pub use correlation::CholeskyFactor;
pub use error::{CorrelationError, GridError, MarketError};
pub use grid::{
    make_time_grid, obs_times_to_indices, remaining_obs_times, TimeGrid, TIME_TOLERANCE,
};
pub use params::{MarketParams, CORRELATION_TOLERANCE};
