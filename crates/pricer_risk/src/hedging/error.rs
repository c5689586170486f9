//! Hedging simulation errors.

use pricer_core::GridError;
use pricer_models::ProductError;
use pricer_pricing::PricingError;
use thiserror::Error;

/// Errors from the delta-hedging simulator and its report export.
#[derive(Error, Debug)]
pub enum HedgeError {
    /// Grid has no step to hedge over.
    #[error("Hedging needs at least 2 grid points, got {len}")]
    GridTooShort {
        /// Number of grid points
        len: usize,
    },

    /// Pricing or Greeks run failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Remaining grid or observation mapping failed.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Remaining product could not be derived.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// CSV export failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure while flushing the export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
