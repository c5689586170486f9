//! Market stress scenarios.
//!
//! Simple market transforms (volatility up or down, correlation
//! breakdown) and a runner that reprices the note under each with a
//! common seed.

mod presets;
mod stress;

pub use presets::StressScenario;
pub use stress::{
    corr_breakdown, run_stress_test, vol_down, vol_up, ScenarioError, ScenarioResult,
};
