//! Desk configuration management.
//!
//! Loads the note terms, market and run settings from a TOML file with
//! environment variable overrides. Every section and field has a default,
//! so a partial file (or no file) still yields a runnable configuration.

use std::path::Path;

use ndarray::{Array1, Array2};
use pricer_core::{make_time_grid, MarketParams, TimeGrid};
use pricer_models::AutocallableWorstOf;
use pricer_pricing::mc::MAX_PATHS;
use pricer_risk::HedgeConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Result;

/// Note terms (`[product]`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProductConfig {
    /// Maturity in years
    pub maturity: f64,
    /// Observation dates in years
    pub obs_times: Vec<f64>,
    /// Coupon per year elapsed
    pub coupon_rate: f64,
    /// Autocall barrier on the worst-of level
    pub autocall_barrier: f64,
    /// Capital protection barrier
    pub protection_barrier: f64,
    /// Notional
    pub notional: f64,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            maturity: 1.0,
            obs_times: vec![0.25, 0.5, 0.75, 1.0],
            coupon_rate: 0.08,
            autocall_barrier: 1.0,
            protection_barrier: 0.6,
            notional: 100.0,
        }
    }
}

/// Market parameters (`[market]`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Per-asset volatilities
    pub vols: Vec<f64>,
    /// Correlation matrix, row by row
    pub correlation: Vec<Vec<f64>>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            rate: 0.02,
            vols: vec![0.25, 0.30],
            correlation: vec![vec![1.0, 0.5], vec![0.5, 1.0]],
        }
    }
}

/// Pricing run settings (`[simulation]`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid resolution
    pub steps_per_year: u32,
    /// Monte Carlo paths for price, Greeks and stress runs
    pub n_paths: usize,
    /// Base seed
    pub seed: u64,
    /// Relative spot bump for delta
    pub delta_bump: f64,
    /// Absolute volatility bump for vega
    pub vega_bump: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps_per_year: 252,
            n_paths: 50_000,
            seed: 0,
            delta_bump: 0.01,
            vega_bump: 0.01,
        }
    }
}

/// Hedge simulation settings (`[hedge]`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HedgeSettings {
    /// Paths per repricing step
    pub n_paths_pricing: usize,
    /// Relative spot bump for the hedge delta
    pub rel_bump: f64,
    /// Seed of the realised path
    pub seed_path: u64,
    /// Base seed of the per-step pricer
    pub seed_pricer: u64,
}

impl Default for HedgeSettings {
    fn default() -> Self {
        Self {
            n_paths_pricing: 5_000,
            rel_bump: 0.01,
            seed_path: 42,
            seed_pricer: 0,
        }
    }
}

impl From<&HedgeSettings> for HedgeConfig {
    fn from(settings: &HedgeSettings) -> Self {
        Self {
            n_paths_pricing: settings.n_paths_pricing,
            rel_bump: settings.rel_bump,
            seed_path: settings.seed_path,
            seed_pricer: settings.seed_pricer,
        }
    }
}

/// Full desk configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeskConfig {
    /// Note terms
    #[serde(default)]
    pub product: ProductConfig,

    /// Market parameters
    #[serde(default)]
    pub market: MarketConfig,

    /// Pricing run settings
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Hedge simulation settings
    #[serde(default)]
    pub hedge: HedgeSettings,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            product: ProductConfig::default(),
            market: MarketConfig::default(),
            simulation: SimulationConfig::default(),
            hedge: HedgeSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl DeskConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// Load `path` if it exists, otherwise the built-in defaults
    pub fn load_or_default(path: &Path) -> std::result::Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(n_paths) = std::env::var("DESK_N_PATHS") {
            if let Ok(n) = n_paths.parse() {
                self.simulation.n_paths = n;
            }
        }

        if let Ok(seed) = std::env::var("DESK_SEED") {
            if let Ok(s) = seed.parse() {
                self.simulation.seed = s;
            }
        }

        if let Ok(log_level) = std::env::var("DESK_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        // Product
        let p = &self.product;
        if !(p.maturity > 0.0) {
            errors.push(format!("product.maturity must be positive, got {}", p.maturity));
        }
        if p.obs_times.windows(2).any(|w| w[1] <= w[0]) {
            errors.push("product.obs_times must be strictly increasing".to_string());
        }
        if p.obs_times.iter().any(|&t| t <= 0.0 || t > p.maturity) {
            errors.push(format!(
                "product.obs_times must lie in (0, {}]",
                p.maturity
            ));
        }
        if p.protection_barrier > p.autocall_barrier {
            errors.push(format!(
                "product.protection_barrier {} exceeds autocall_barrier {}",
                p.protection_barrier, p.autocall_barrier
            ));
        }
        if !(p.notional > 0.0) {
            errors.push(format!("product.notional must be positive, got {}", p.notional));
        }

        // Market
        let m = &self.market;
        let n = m.vols.len();
        if n < 2 {
            errors.push(format!("market.vols needs at least 2 assets, got {}", n));
        }
        if m.vols.iter().any(|&v| !(v > 0.0)) {
            errors.push("market.vols must all be positive".to_string());
        }
        if m.correlation.len() != n || m.correlation.iter().any(|row| row.len() != n) {
            errors.push(format!("market.correlation must be {}x{}", n, n));
        }

        // Simulation
        let s = &self.simulation;
        if s.steps_per_year == 0 {
            errors.push("simulation.steps_per_year must be greater than 0".to_string());
        }
        if s.n_paths == 0 {
            errors.push("simulation.n_paths must be greater than 0".to_string());
        }
        if s.n_paths > MAX_PATHS {
            errors.push(format!(
                "simulation.n_paths {} exceeds maximum allowed ({})",
                s.n_paths, MAX_PATHS
            ));
        }
        if !(s.delta_bump > 0.0) || !(s.vega_bump > 0.0) {
            errors.push("simulation bumps must be positive".to_string());
        }

        // Hedge
        let h = &self.hedge;
        if h.n_paths_pricing == 0 || h.n_paths_pricing > MAX_PATHS {
            errors.push(format!(
                "hedge.n_paths_pricing must be in 1..={}, got {}",
                MAX_PATHS, h.n_paths_pricing
            ));
        }
        if !(h.rel_bump > 0.0) {
            errors.push(format!("hedge.rel_bump must be positive, got {}", h.rel_bump));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> std::result::Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Build the note.
    pub fn product(&self) -> Result<AutocallableWorstOf> {
        let p = &self.product;
        Ok(AutocallableWorstOf::new(
            p.maturity,
            p.obs_times.clone(),
            p.coupon_rate,
            p.autocall_barrier,
            p.protection_barrier,
            p.notional,
        )?)
    }

    /// Build the market.
    pub fn market(&self) -> Result<MarketParams> {
        let m = &self.market;
        let n = m.vols.len();
        let flat: Vec<f64> = m.correlation.iter().flatten().copied().collect();
        let corr = Array2::from_shape_vec((n, n), flat).map_err(|e| {
            ConfigError::Validation(vec![format!("market.correlation: {}", e)])
        })?;

        Ok(MarketParams::new(m.rate, Array1::from(m.vols.clone()), corr)?)
    }

    /// Build the simulation grid over the note's life.
    pub fn grid(&self) -> Result<TimeGrid> {
        Ok(make_time_grid(
            self.product.maturity,
            self.simulation.steps_per_year,
        )?)
    }
}

/// Configuration error type
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_errors(config: &DeskConfig) -> Vec<String> {
        match config.validate() {
            Err(ConfigError::Validation(errors)) => errors,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_validates() {
        let config = DeskConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.product.obs_times, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(config.hedge.seed_path, 42);
    }

    #[test]
    fn test_default_config_builds_inputs() {
        let config = DeskConfig::default();
        let market = config.market().unwrap();
        let grid = config.grid().unwrap();
        let note = config.product().unwrap();

        assert_eq!(market.n_assets(), 2);
        assert_eq!(market.corr()[[0, 1]], 0.5);
        assert_eq!(grid.len(), 253);
        assert_eq!(note.notional(), 100.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DeskConfig::from_toml(
            r#"
            [market]
            vols = [0.2, 0.2, 0.2]
            correlation = [[1.0, 0.3, 0.3], [0.3, 1.0, 0.3], [0.3, 0.3, 1.0]]

            [simulation]
            n_paths = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.market.vols.len(), 3);
        assert_eq!(config.market.rate, 0.02);
        assert_eq!(config.simulation.n_paths, 1000);
        assert_eq!(config.simulation.steps_per_year, 252);
        assert_eq!(config.product, ProductConfig::default());
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
        assert_eq!(config.market().unwrap().n_assets(), 3);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(DeskConfig::from_toml("").unwrap(), DeskConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let result = DeskConfig::from_toml("[simulation]\nn_paths = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = DeskConfig::load_or_default(Path::new("no/such/desk.toml")).unwrap();
        assert_eq!(config, DeskConfig::default());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("DESK_N_PATHS", "1234");
        std::env::set_var("DESK_SEED", "not-a-number");
        let config = DeskConfig::default().with_env_override();
        std::env::remove_var("DESK_N_PATHS");
        std::env::remove_var("DESK_SEED");

        assert_eq!(config.simulation.n_paths, 1234);
        assert_eq!(config.simulation.seed, 0);
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = DeskConfig::default();
        config.log_level = "loud".to_string();
        assert!(validation_errors(&config)
            .iter()
            .any(|e| e.contains("log_level")));
    }

    #[test]
    fn test_validate_correlation_shape() {
        let mut config = DeskConfig::default();
        config.market.correlation = vec![vec![1.0, 0.5]];
        assert!(validation_errors(&config)
            .iter()
            .any(|e| e.contains("market.correlation")));
    }

    #[test]
    fn test_validate_barrier_ordering() {
        let mut config = DeskConfig::default();
        config.product.protection_barrier = 1.2;
        assert!(validation_errors(&config)
            .iter()
            .any(|e| e.contains("protection_barrier")));
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = DeskConfig::default();
        config.simulation.n_paths = 0;
        config.hedge.rel_bump = 0.0;
        config.product.obs_times = vec![0.5, 0.25];

        let errors = validation_errors(&config);
        assert!(errors.len() >= 3, "Expected at least 3 validation errors");
    }

    #[test]
    fn test_hedge_settings_conversion() {
        let config: HedgeConfig = (&HedgeSettings::default()).into();
        assert_eq!(config.n_paths_pricing, 5_000);
        assert_eq!(config.seed_path, 42);
        assert_eq!(config.seed_pricer, 0);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = format!("{}", error);
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
