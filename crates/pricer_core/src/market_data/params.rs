//! Black-Scholes market parameters for a basket of assets.

use ndarray::{Array1, Array2};

use super::correlation::CholeskyFactor;
use super::error::{CorrelationError, MarketError};

/// Tolerance for unit-diagonal and symmetry checks on the correlation matrix.
pub const CORRELATION_TOLERANCE: f64 = 1e-8;

/// Immutable market description: flat rate, per-asset volatility and
/// correlation.
///
/// All fields are validated at construction; derived markets (bumped
/// volatilities, stressed correlation) go through the same checks.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use pricer_core::market_data::MarketParams;
///
/// let market = MarketParams::new(
///     0.02,
///     array![0.25, 0.30],
///     array![[1.0, 0.5], [0.5, 1.0]],
/// ).unwrap();
///
/// assert_eq!(market.n_assets(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MarketParams {
    rate: f64,
    vols: Array1<f64>,
    corr: Array2<f64>,
}

impl MarketParams {
    /// Creates validated market parameters.
    ///
    /// # Arguments
    ///
    /// * `rate` - Continuously compounded risk-free rate (annualised)
    /// * `vols` - Annualised volatility per asset
    /// * `corr` - Asset correlation matrix (n_assets x n_assets)
    ///
    /// # Errors
    ///
    /// Returns `MarketError` if the rate is non-finite, any volatility is
    /// non-positive, the correlation shape disagrees with the asset count,
    /// the diagonal is not unit, the matrix is asymmetric, or an entry lies
    /// outside [-1, 1].
    pub fn new(rate: f64, vols: Array1<f64>, corr: Array2<f64>) -> Result<Self, MarketError> {
        if !rate.is_finite() {
            return Err(MarketError::InvalidRate { rate });
        }

        let n = vols.len();
        if n == 0 {
            return Err(MarketError::NoAssets);
        }

        for (index, &value) in vols.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(MarketError::InvalidVolatility { index, value });
            }
        }

        let (rows, cols) = corr.dim();
        if rows != n || cols != n {
            return Err(MarketError::CorrelationShape {
                rows,
                cols,
                n_assets: n,
            });
        }

        for i in 0..n {
            let value = corr[[i, i]];
            if !((value - 1.0).abs() <= CORRELATION_TOLERANCE) {
                return Err(MarketError::NonUnitDiagonal { index: i, value });
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let upper = corr[[i, j]];
                let lower = corr[[j, i]];
                if !((upper - lower).abs() <= CORRELATION_TOLERANCE) {
                    return Err(MarketError::NotSymmetric { i, j });
                }
                if !(-1.0..=1.0).contains(&upper) {
                    return Err(MarketError::CorrelationOutOfRange { i, j, value: upper });
                }
            }
        }

        Ok(Self { rate, vols, corr })
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Per-asset volatilities.
    #[inline]
    pub fn vols(&self) -> &Array1<f64> {
        &self.vols
    }

    /// Correlation matrix.
    #[inline]
    pub fn corr(&self) -> &Array2<f64> {
        &self.corr
    }

    /// Number of assets in the basket.
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.vols.len()
    }

    /// Cholesky factor of the correlation matrix.
    ///
    /// # Errors
    ///
    /// Returns `CorrelationError::NotPositiveDefinite` if the matrix admits
    /// no factorisation.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CorrelationError> {
        CholeskyFactor::decompose(&self.corr.view())
    }

    /// Copy of this market with a different volatility vector.
    pub fn with_vols(&self, vols: Array1<f64>) -> Result<Self, MarketError> {
        Self::new(self.rate, vols, self.corr.clone())
    }

    /// Copy of this market with a different correlation matrix.
    pub fn with_correlation(&self, corr: Array2<f64>) -> Result<Self, MarketError> {
        Self::new(self.rate, self.vols.clone(), corr)
    }

    /// Copy of this market with a different rate.
    pub fn with_rate(&self, rate: f64) -> Result<Self, MarketError> {
        Self::new(rate, self.vols.clone(), self.corr.clone())
    }

    /// Copy of this market with one asset's volatility shifted by `abs_bump`.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidVolatility` if the shifted volatility is
    /// not positive.
    ///
    /// # Panics
    ///
    /// Panics if `asset` is not a valid asset index.
    pub fn with_bumped_vol(&self, asset: usize, abs_bump: f64) -> Result<Self, MarketError> {
        let mut vols = self.vols.clone();
        vols[asset] += abs_bump;
        self.with_vols(vols)
    }
}
