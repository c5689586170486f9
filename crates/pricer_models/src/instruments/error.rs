//! Instrument error types.
//!
//! Provides structured error handling for product construction and payoff
//! evaluation.

use thiserror::Error;

/// Product construction errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Non-positive or non-finite maturity
/// - `ObservationOutOfRange`: Observation time outside (0, maturity]
/// - `ObservationsNotIncreasing`: Observation times not strictly increasing
/// - `InvalidBarrier`: Non-positive barrier level
/// - `BarrierOrdering`: Protection barrier above the autocall barrier
/// - `InvalidNotional`: Non-positive notional
/// - `InvalidCoupon`: Non-finite coupon rate
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::ProductError;
///
/// let err = ProductError::InvalidMaturity { maturity: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid maturity: T = -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    /// Invalid maturity (non-positive).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Observation time outside (0, maturity].
    #[error("Observation time {time} outside (0, {maturity}]")]
    ObservationOutOfRange {
        /// The offending observation time
        time: f64,
        /// Product maturity
        maturity: f64,
    },

    /// Observation times not strictly increasing.
    #[error("Observation times are not strictly increasing at index {index}")]
    ObservationsNotIncreasing {
        /// Index of the first offending observation
        index: usize,
    },

    /// Barrier level non-positive.
    #[error("Invalid {name} barrier: {level} (must be > 0)")]
    InvalidBarrier {
        /// Barrier name
        name: &'static str,
        /// The invalid level
        level: f64,
    },

    /// Protection barrier exceeds autocall barrier.
    #[error("Protection barrier {protection} exceeds autocall barrier {autocall}")]
    BarrierOrdering {
        /// Protection barrier level
        protection: f64,
        /// Autocall barrier level
        autocall: f64,
    },

    /// Invalid notional amount.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// Coupon rate is not finite.
    #[error("Invalid coupon rate: {coupon_rate}")]
    InvalidCoupon {
        /// The invalid coupon rate
        coupon_rate: f64,
    },
}

/// Payoff evaluation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayoffError {
    /// Worst-of comparison needs at least two assets.
    #[error("Worst-of autocallable requires at least 2 assets, got {n_assets}")]
    TooFewAssets {
        /// Number of assets in the trajectory
        n_assets: usize,
    },

    /// Trajectory has no time steps.
    #[error("Trajectory has no time steps")]
    EmptyTrajectory,

    /// Number of observation indices differs from the product's schedule.
    #[error("Got {indices} observation indices for {observations} observation times")]
    ObservationCountMismatch {
        /// Number of indices supplied
        indices: usize,
        /// Number of observation times on the product
        observations: usize,
    },

    /// Observation index beyond the end of the trajectory.
    #[error("Observation index {index} outside trajectory of {n_steps} steps")]
    ObservationIndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of steps in the trajectory
        n_steps: usize,
    },
}
