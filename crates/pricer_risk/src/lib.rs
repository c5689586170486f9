//! # Pricer Risk (L4: Application)
//!
//! Desk-level risk on top of the Monte Carlo engine.
//!
//! This crate provides:
//! - Delta-hedging simulation along a realised path ([`hedging`])
//! - Hedge time series with PnL attribution, summary and CSV export
//! - Market stress scenarios and a common-seed stress runner ([`scenarios`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  hedging/    - HedgeBook, HedgeReport,  │
//! │                run_hedge_simulation     │
//! │  scenarios/  - StressScenario,          │
//! │                run_stress_test          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  Path simulation, pricing, Greeks       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use pricer_core::{make_time_grid, MarketParams};
//! use pricer_models::AutocallableWorstOf;
//! use pricer_risk::hedging::{run_hedge_simulation, HedgeConfig};
//!
//! let market = MarketParams::new(0.0, array![0.2, 0.2], array![[1.0, 0.2], [0.2, 1.0]]).unwrap();
//! let note = AutocallableWorstOf::new(0.1, vec![0.1], 0.05, 1.0, 0.6, 100.0).unwrap();
//! let grid = make_time_grid(0.1, 50).unwrap();
//!
//! let config = HedgeConfig { n_paths_pricing: 200, ..HedgeConfig::default() };
//! let report = run_hedge_simulation(&note, &market, &grid, &config).unwrap();
//! let summary = report.summary();
//! assert_eq!(summary.steps, report.len() - 1);
//! ```

#![warn(missing_docs)]

pub mod hedging;
pub mod scenarios;

pub use hedging::{run_hedge_simulation, HedgeConfig, HedgeError, HedgeReport};
pub use scenarios::{run_stress_test, ScenarioResult, StressScenario};
