//! Preset stress scenarios.

use pricer_core::{MarketError, MarketParams};

use super::stress::{corr_breakdown, vol_down, vol_up};

/// Named market stress.
///
/// # Examples
///
/// ```
/// use pricer_risk::scenarios::StressScenario;
///
/// let scenarios = StressScenario::standard();
/// assert_eq!(scenarios[0].name(), "base");
/// assert_eq!(scenarios.len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StressScenario {
    /// Unstressed market
    Base,
    /// All volatilities scaled by `1 + bump`
    VolUp {
        /// Relative volatility increase
        bump: f64,
    },
    /// All volatilities scaled by `1 - bump`
    VolDown {
        /// Relative volatility decrease
        bump: f64,
    },
    /// All pairwise correlations set to `target`
    CorrBreakdown {
        /// Common off-diagonal correlation
        target: f64,
    },
}

impl StressScenario {
    /// Standard desk set: base, vols up and down 20%, zero correlation.
    pub fn standard() -> Vec<Self> {
        vec![
            Self::Base,
            Self::VolUp { bump: 0.2 },
            Self::VolDown { bump: 0.2 },
            Self::CorrBreakdown { target: 0.0 },
        ]
    }

    /// Get short identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::VolUp { .. } => "vol_up",
            Self::VolDown { .. } => "vol_down",
            Self::CorrBreakdown { .. } => "corr_breakdown",
        }
    }

    /// Get description.
    pub fn description(&self) -> String {
        match self {
            Self::Base => "Unstressed market".to_string(),
            Self::VolUp { bump } => format!("Volatilities scaled up by {:.0}%", bump * 100.0),
            Self::VolDown { bump } => format!("Volatilities scaled down by {:.0}%", bump * 100.0),
            Self::CorrBreakdown { target } => format!("All correlations set to {target}"),
        }
    }

    /// Stressed copy of `market`.
    ///
    /// # Errors
    ///
    /// Returns `MarketError` if the stressed parameters are invalid (for
    /// example a volatility scaled to zero).
    pub fn apply(&self, market: &MarketParams) -> Result<MarketParams, MarketError> {
        match *self {
            Self::Base => Ok(market.clone()),
            Self::VolUp { bump } => vol_up(market, bump),
            Self::VolDown { bump } => vol_down(market, bump),
            Self::CorrBreakdown { target } => corr_breakdown(market, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn market() -> MarketParams {
        MarketParams::new(0.02, array![0.25, 0.30], array![[1.0, 0.5], [0.5, 1.0]]).unwrap()
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = StressScenario::standard().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["base", "vol_up", "vol_down", "corr_breakdown"]);
    }

    #[test]
    fn test_description() {
        assert_eq!(
            StressScenario::VolUp { bump: 0.2 }.description(),
            "Volatilities scaled up by 20%"
        );
    }

    #[test]
    fn test_apply() {
        let base = market();
        assert_eq!(StressScenario::Base.apply(&base).unwrap(), base);

        let up = StressScenario::VolUp { bump: 0.2 }.apply(&base).unwrap();
        assert_relative_eq!(up.vols()[1], 0.36, epsilon = 1e-12);

        let flat = StressScenario::CorrBreakdown { target: 0.0 }
            .apply(&base)
            .unwrap();
        assert_eq!(flat.corr()[[0, 1]], 0.0);
    }

    #[test]
    fn test_full_vol_down_rejected() {
        let result = StressScenario::VolDown { bump: 1.0 }.apply(&market());
        assert!(matches!(result, Err(MarketError::InvalidVolatility { .. })));
    }
}
