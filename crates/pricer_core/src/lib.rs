//! # pricer_core: Market Foundation for the Autocallable Desk Simulator
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Market parameters: flat rate, per-asset volatility, correlation (`market_data::params`)
//! - Simulation time grids and observation-date mapping (`market_data::grid`)
//! - Cholesky factorisation of correlation matrices (`market_data::correlation`)
//! - Error types: `MarketError`, `GridError`, `CorrelationError` (`market_data::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - ndarray: Vectors and matrices
//! - thiserror: Error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use ndarray::array;
//! use pricer_core::market_data::{make_time_grid, MarketParams};
//!
//! let market = MarketParams::new(
//!     0.02,
//!     array![0.25, 0.30],
//!     array![[1.0, 0.5], [0.5, 1.0]],
//! ).unwrap();
//! let grid = make_time_grid(1.0, 252).unwrap();
//!
//! assert_eq!(market.n_assets(), 2);
//! assert_eq!(grid.len(), 253);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;

pub use market_data::{
    make_time_grid, obs_times_to_indices, remaining_obs_times, CholeskyFactor, CorrelationError,
    GridError, MarketError, MarketParams, TimeGrid, CORRELATION_TOLERANCE, TIME_TOLERANCE,
};
