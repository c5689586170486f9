//! CLI error types.

use pricer_core::{GridError, MarketError};
use pricer_models::ProductError;
use pricer_pricing::PricingError;
use pricer_risk::scenarios::ScenarioError;
use pricer_risk::HedgeError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `desk` commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bad command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Market parameters rejected.
    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    /// Time grid could not be built.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Product terms rejected.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// Pricing or Greeks run failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Hedge simulation or export failed.
    #[error("Hedge error: {0}")]
    Hedge(#[from] HedgeError),

    /// Stress run failed.
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
