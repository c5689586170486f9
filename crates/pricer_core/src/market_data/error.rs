//! Market data error types.
//!
//! This module provides structured error handling for market parameter,
//! time grid and correlation construction.

use thiserror::Error;

/// Market parameter construction errors.
///
/// # Variants
///
/// - `NoAssets`: Empty volatility vector
/// - `InvalidRate`: Non-finite risk-free rate
/// - `InvalidVolatility`: Non-positive or non-finite volatility
/// - `CorrelationShape`: Correlation matrix does not match the asset count
/// - `NonUnitDiagonal`: Correlation diagonal entry differs from 1.0
/// - `NotSymmetric`: Correlation matrix is not symmetric
/// - `CorrelationOutOfRange`: Off-diagonal correlation outside [-1, 1]
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketError;
///
/// let err = MarketError::InvalidVolatility { index: 1, value: -0.2 };
/// assert!(format!("{}", err).contains("index 1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// No assets supplied.
    #[error("Market must contain at least one asset")]
    NoAssets,

    /// Risk-free rate is not finite.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate
        rate: f64,
    },

    /// Volatility is non-positive or non-finite.
    #[error("Invalid volatility at index {index}: {value} (must be finite and > 0)")]
    InvalidVolatility {
        /// Asset index
        index: usize,
        /// The invalid volatility
        value: f64,
    },

    /// Correlation matrix shape disagrees with the asset count.
    #[error("Correlation matrix has shape ({rows}, {cols}), expected ({n_assets}, {n_assets})")]
    CorrelationShape {
        /// Number of rows supplied
        rows: usize,
        /// Number of columns supplied
        cols: usize,
        /// Number of assets implied by the volatility vector
        n_assets: usize,
    },

    /// Diagonal element is not 1.0.
    #[error("Correlation diagonal at index {index} is {value}, expected 1.0")]
    NonUnitDiagonal {
        /// Diagonal index
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Matrix is not symmetric.
    #[error("Correlation matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },

    /// Off-diagonal correlation outside [-1, 1].
    #[error("Correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    CorrelationOutOfRange {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
        /// The offending value
        value: f64,
    },
}

/// Time grid and observation mapping errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::GridError;
///
/// let err = GridError::NonZeroOrigin { first: 0.5 };
/// assert_eq!(format!("{}", err), "Time grid must start at 0.0, got 0.5");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Grid has no time points.
    #[error("Time grid must contain at least one point")]
    Empty,

    /// Grid construction would produce a single point.
    #[error("Time grid needs at least {need} points, got {got}")]
    TooFewPoints {
        /// Number of points produced
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Step size is non-positive or non-finite.
    #[error("Invalid time step: dt = {dt}")]
    InvalidStep {
        /// The invalid step
        dt: f64,
    },

    /// First time point is not exactly zero.
    #[error("Time grid must start at 0.0, got {first}")]
    NonZeroOrigin {
        /// The first time point
        first: f64,
    },

    /// Times are not strictly increasing.
    #[error("Time grid is not strictly increasing at index {index}")]
    NotIncreasing {
        /// Index of the first offending point
        index: usize,
    },

    /// Maturity is non-positive or non-finite.
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity
        maturity: f64,
    },

    /// Zero steps per year.
    #[error("steps_per_year must be > 0")]
    InvalidStepsPerYear,

    /// Grid index outside the grid.
    #[error("Step index {index} outside grid of {len} points")]
    StepOutOfRange {
        /// Requested index
        index: usize,
        /// Number of grid points
        len: usize,
    },

    /// Observation time outside `[0, horizon]`.
    #[error("Observation time {time} outside [0, {horizon}]")]
    ObservationOutOfRange {
        /// The observation time
        time: f64,
        /// Grid horizon
        horizon: f64,
    },

    /// Observation times are not strictly increasing.
    #[error("Observation times are not strictly increasing at index {index}")]
    ObservationsNotIncreasing {
        /// Index of the first offending observation
        index: usize,
    },

    /// Two observation times snap to the same grid index.
    #[error(
        "Observation {index} snaps to grid index {grid_index}, which is not after the previous \
         observation; refine the grid or adjust the observation times"
    )]
    AmbiguousObservationMapping {
        /// Index of the observation that collided
        index: usize,
        /// Grid index it snapped to
        grid_index: usize,
    },
}

/// Correlation decomposition errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Cholesky pivot is non-positive or non-finite.
    #[error("Correlation matrix is not positive definite (pivot {index} = {pivot})")]
    NotPositiveDefinite {
        /// Pivot index where the decomposition failed
        index: usize,
        /// The offending pivot value
        pivot: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = MarketError::InvalidVolatility {
            index: 0,
            value: 0.0,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid volatility at index 0: 0 (must be finite and > 0)"
        );
    }

    #[test]
    fn test_correlation_shape_display() {
        let err = MarketError::CorrelationShape {
            rows: 3,
            cols: 3,
            n_assets: 2,
        };
        assert_eq!(
            format!("{}", err),
            "Correlation matrix has shape (3, 3), expected (2, 2)"
        );
    }

    #[test]
    fn test_observation_out_of_range_display() {
        let err = GridError::ObservationOutOfRange {
            time: 1.5,
            horizon: 1.0,
        };
        assert_eq!(format!("{}", err), "Observation time 1.5 outside [0, 1]");
    }

    #[test]
    fn test_ambiguous_mapping_mentions_index() {
        let err = GridError::AmbiguousObservationMapping {
            index: 2,
            grid_index: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("Observation 2"));
        assert!(msg.contains("grid index 5"));
    }

    #[test]
    fn test_not_positive_definite_display() {
        let err = CorrelationError::NotPositiveDefinite {
            index: 1,
            pivot: -0.5,
        };
        assert!(err.to_string().contains("not positive definite"));
    }
}
