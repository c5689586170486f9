//! Error types for the Monte Carlo engine.
//!
//! Lower-layer failures (market, grid, correlation, product, payoff) are
//! wrapped through `#[from]` so `?` propagates them unchanged.

use pricer_core::{CorrelationError, GridError, MarketError};
use pricer_models::{PayoffError, ProductError};
use thiserror::Error;

use super::paths::MAX_PATHS;

/// Monte Carlo pricing and Greeks errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Path count outside [1, MAX_PATHS].
    #[error("Invalid path count {n_paths}: must be in range [1, {}]", MAX_PATHS)]
    InvalidPathCount {
        /// Requested number of paths
        n_paths: usize,
    },

    /// Per-asset level vector has the wrong length.
    #[error("Expected {expected} asset levels, got {got}")]
    LevelsShape {
        /// Supplied length
        got: usize,
        /// Number of assets in the market
        expected: usize,
    },

    /// Asset level non-positive or non-finite.
    #[error("Invalid level for asset {index}: {value} (must be > 0)")]
    InvalidLevel {
        /// Asset index
        index: usize,
        /// Offending level
        value: f64,
    },

    /// Bump size unusable for finite differences.
    #[error("Invalid {name}: {value}")]
    InvalidBump {
        /// Bump parameter name
        name: &'static str,
        /// Offending bump
        value: f64,
    },

    /// Volatility bump would leave a non-positive volatility.
    #[error("Volatility bump {bump} makes vol of asset {asset} non-positive ({vol} + {bump})")]
    VolatilityBump {
        /// Asset index
        asset: usize,
        /// Unbumped volatility
        vol: f64,
        /// Absolute bump
        bump: f64,
    },

    /// Invalid market parameters.
    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    /// Correlation matrix could not be factorised.
    #[error("Correlation error: {0}")]
    Correlation(#[from] CorrelationError),

    /// Grid construction or observation mapping failed.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Product could not be constructed.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// Payoff evaluation failed.
    #[error("Payoff error: {0}")]
    Payoff(#[from] PayoffError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::InvalidPathCount { n_paths: 0 };
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = PricingError::VolatilityBump {
            asset: 1,
            vol: 0.2,
            bump: -0.3,
        };
        assert!(err.to_string().contains("asset 1"));
    }

    #[test]
    fn test_from_correlation_error() {
        let err: PricingError = CorrelationError::NotPositiveDefinite {
            index: 2,
            pivot: -0.5,
        }
        .into();
        assert!(matches!(err, PricingError::Correlation(_)));
    }
}
