//! Delta-hedging simulator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            run_hedge_simulation              │
//! ├──────────────────────────────────────────────┤
//! │  realised path   - one simulated trajectory  │
//! │  price_and_delta - per-step repricing (L3)   │
//! │  HedgeBook       - position + cash account   │
//! │  HedgeReport     - time series, PnL, CSV     │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The desk is short the note and holds `-delta` of each underlying,
//! using normalised levels as prices. Per-step PnL is the change in
//! product value plus the change in hedge value over the step.

mod book;
mod error;
mod report;
mod simulation;

pub use book::HedgeBook;
pub use error::HedgeError;
pub use report::{HedgeRecord, HedgeReport, PnlSummary};
pub use simulation::{run_hedge_simulation, HedgeConfig};
