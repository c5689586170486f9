//! Market transforms and the stress runner.

use ndarray::Array2;
use pricer_core::{MarketError, MarketParams, TimeGrid};
use pricer_models::AutocallableWorstOf;
use pricer_pricing::mc::price;
use pricer_pricing::rng::PricerRng;
use pricer_pricing::PricingError;
use thiserror::Error;
use tracing::debug;

use super::presets::StressScenario;

/// Stress test errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// Stressed market is invalid.
    #[error("Scenario '{scenario}' produced an invalid market: {source}")]
    Market {
        /// Scenario name
        scenario: &'static str,
        /// Underlying validation error
        source: MarketError,
    },

    /// Repricing failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

/// Price of the note under one scenario.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioResult {
    /// Scenario applied
    pub scenario: StressScenario,
    /// Price under the stressed market
    pub price: f64,
    /// `price - base price`
    pub pnl_vs_base: f64,
}

/// Volatilities scaled by `1 + bump`.
pub fn vol_up(market: &MarketParams, bump: f64) -> Result<MarketParams, MarketError> {
    market.with_vols(market.vols() * (1.0 + bump))
}

/// Volatilities scaled by `1 - bump`.
pub fn vol_down(market: &MarketParams, bump: f64) -> Result<MarketParams, MarketError> {
    market.with_vols(market.vols() * (1.0 - bump))
}

/// Every off-diagonal correlation set to `target`.
///
/// The result may not be positive definite for negative targets with
/// three or more assets; that surfaces when the market is simulated.
pub fn corr_breakdown(market: &MarketParams, target: f64) -> Result<MarketParams, MarketError> {
    let n = market.n_assets();
    let corr = Array2::from_shape_fn((n, n), |(i, j)| if i == j { 1.0 } else { target });
    market.with_correlation(corr)
}

/// Prices `product` under each scenario with a common seed.
///
/// The unstressed price is computed first; `pnl_vs_base` is measured
/// against it.
///
/// # Errors
///
/// Returns `ScenarioError::Market` if a scenario yields invalid parameters
/// and `ScenarioError::Pricing` if any pricing run fails.
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use pricer_core::{make_time_grid, MarketParams};
/// use pricer_models::AutocallableWorstOf;
/// use pricer_risk::scenarios::{run_stress_test, StressScenario};
///
/// let market = MarketParams::new(0.02, array![0.25, 0.3], array![[1.0, 0.5], [0.5, 1.0]]).unwrap();
/// let note = AutocallableWorstOf::new(1.0, vec![0.5, 1.0], 0.08, 1.0, 0.6, 100.0).unwrap();
/// let grid = make_time_grid(1.0, 12).unwrap();
///
/// let results = run_stress_test(&note, &grid, &market, &StressScenario::standard(), 1_000, 0).unwrap();
/// assert_eq!(results[0].pnl_vs_base, 0.0);
/// ```
pub fn run_stress_test(
    product: &AutocallableWorstOf,
    grid: &TimeGrid,
    market: &MarketParams,
    scenarios: &[StressScenario],
    n_paths: usize,
    seed: u64,
) -> Result<Vec<ScenarioResult>, ScenarioError> {
    let base = price(product, market, grid, n_paths, &mut PricerRng::from_seed(seed))?;

    scenarios
        .iter()
        .map(|&scenario| {
            let stressed = scenario
                .apply(market)
                .map_err(|source| ScenarioError::Market {
                    scenario: scenario.name(),
                    source,
                })?;
            let pv = price(product, &stressed, grid, n_paths, &mut PricerRng::from_seed(seed))?;
            debug!(scenario = scenario.name(), price = pv, "priced stress scenario");

            Ok(ScenarioResult {
                scenario,
                price: pv,
                pnl_vs_base: pv - base,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use pricer_core::make_time_grid;

    fn market() -> MarketParams {
        MarketParams::new(0.02, array![0.25, 0.30], array![[1.0, 0.5], [0.5, 1.0]]).unwrap()
    }

    fn note() -> AutocallableWorstOf {
        AutocallableWorstOf::new(1.0, vec![0.25, 0.5, 0.75, 1.0], 0.08, 1.0, 0.6, 100.0).unwrap()
    }

    #[test]
    fn test_vol_transforms() {
        let up = vol_up(&market(), 0.1).unwrap();
        let down = vol_down(&market(), 0.1).unwrap();

        assert_relative_eq!(up.vols()[0], 0.275, epsilon = 1e-12);
        assert_relative_eq!(down.vols()[1], 0.27, epsilon = 1e-12);
        assert_eq!(up.corr(), market().corr());
        assert_eq!(up.rate(), 0.02);
    }

    #[test]
    fn test_corr_breakdown() {
        let m = MarketParams::new(0.0, array![0.2, 0.2, 0.2], Array2::eye(3)).unwrap();
        let stressed = corr_breakdown(&m, 0.3).unwrap();

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.3 };
                assert_eq!(stressed.corr()[[i, j]], expected);
            }
        }
    }

    #[test]
    fn test_stress_runner() {
        let grid = make_time_grid(1.0, 52).unwrap();
        let results =
            run_stress_test(&note(), &grid, &market(), &StressScenario::standard(), 4_000, 0)
                .unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].scenario, StressScenario::Base);
        assert_eq!(results[0].pnl_vs_base, 0.0);

        // Short-vol note: more volatility, lower price
        let vol_up = &results[1];
        let vol_down = &results[2];
        assert!(vol_up.price < vol_down.price);
        for r in &results {
            assert!(r.price > 0.0 && r.price < 200.0);
        }
    }

    #[test]
    fn test_invalid_scenario_reports_name() {
        let grid = make_time_grid(1.0, 12).unwrap();
        let result = run_stress_test(
            &note(),
            &grid,
            &market(),
            &[StressScenario::VolDown { bump: 1.5 }],
            100,
            0,
        );
        assert!(matches!(
            result,
            Err(ScenarioError::Market {
                scenario: "vol_down",
                ..
            })
        ));
    }
}
