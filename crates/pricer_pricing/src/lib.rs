//! # Pricer Pricing (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns the market model and the product into numbers:
//! - Seeded random source ([`rng::PricerRng`])
//! - Correlated lognormal path simulation ([`mc::simulate_paths`])
//! - Monte Carlo pricing from time zero or from an intermediate state
//!   ([`mc::price`], [`mc::price_from_state`])
//! - Bump-and-reprice delta and vega with common random numbers
//!   ([`greeks`])
//!
//! ## Usage Example
//!
//! ```rust
//! use ndarray::array;
//! use pricer_core::{make_time_grid, MarketParams};
//! use pricer_models::AutocallableWorstOf;
//! use pricer_pricing::{greeks, mc, rng::PricerRng};
//!
//! let market = MarketParams::new(0.02, array![0.25, 0.3], array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
//! let grid = make_time_grid(1.0, 52).unwrap();
//! let note = AutocallableWorstOf::new(1.0, vec![0.25, 0.5, 0.75, 1.0], 0.08, 1.0, 0.6, 100.0).unwrap();
//!
//! let pv = mc::price(&note, &market, &grid, 2_000, &mut PricerRng::from_seed(0)).unwrap();
//! let vega = greeks::vega(&note, &market, &grid, 2_000, 0.01, 0).unwrap();
//!
//! assert!(pv > 0.0);
//! assert_eq!(vega.len(), 2);
//! ```
//!
//! ## Determinism
//!
//! The engine is single-threaded and holds no global random state. Equal
//! seeds give bit-identical results.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod greeks;
pub mod mc;
pub mod rng;

pub use mc::{PricingDiagnostics, PricingError};
