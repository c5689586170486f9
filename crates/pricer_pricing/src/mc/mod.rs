//! Monte Carlo engine for the worst-of autocallable.
//!
//! # Architecture
//!
//! ```text
//! simulate_paths / simulate_paths_from   (correlated GBM, PathTensor)
//!         │
//!         ▼
//! AutocallableWorstOf::redemption        (per path: payoff, tau)
//!         │
//!         ▼
//! price / price_from_state               (discounted mean + diagnostics)
//! ```
//!
//! All randomness flows through the caller's [`PricerRng`](crate::rng::PricerRng).
//!
//! # Examples
//!
//! ```rust
//! use ndarray::array;
//! use pricer_core::{make_time_grid, MarketParams};
//! use pricer_models::AutocallableWorstOf;
//! use pricer_pricing::mc::price_with_diagnostics;
//! use pricer_pricing::rng::PricerRng;
//!
//! let market = MarketParams::new(0.02, array![0.25, 0.3], array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
//! let grid = make_time_grid(1.0, 52).unwrap();
//! let note = AutocallableWorstOf::new(1.0, vec![0.25, 0.5, 0.75, 1.0], 0.08, 1.0, 0.6, 100.0).unwrap();
//!
//! let (pv, diag) = price_with_diagnostics(&note, &market, &grid, 2_000, &mut PricerRng::from_seed(0)).unwrap();
//! println!("{:.4} +/- {:.4}", pv, diag.confidence_95());
//! ```

mod error;
mod paths;
mod pricer;

pub use error::PricingError;
pub use paths::{simulate_paths, simulate_paths_from, PathTensor, MAX_PATHS};
pub use pricer::{
    price, price_from_state, price_from_state_with_diagnostics, price_with_diagnostics,
    PricingDiagnostics,
};

pub(crate) use paths::check_levels;
