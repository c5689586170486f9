//! Bump-and-reprice Greeks with common random numbers.
//!
//! Every repricing (base and bumped) starts from a fresh
//! `PricerRng::from_seed(seed)`, so base and bumped runs see identical
//! shocks and the finite difference reflects the bump rather than
//! simulation noise.
//!
//! - [`delta`]: per-asset spot sensitivity from time zero
//! - [`delta_from_state`] / [`price_and_delta_from_state`]: from an
//!   intermediate state
//! - [`vega`]: per-asset absolute volatility sensitivity

mod bump;

pub use bump::{delta, delta_from_state, price_and_delta_from_state, vega};

#[cfg(test)]
mod tests;
