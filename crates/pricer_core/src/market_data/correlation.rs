//! Cholesky decomposition of correlation matrices.
//!
//! Given `n` independent standard normals `Z`, correlated normals are
//! obtained as `W = L * Z` where `L` is the lower triangular factor of the
//! correlation matrix `C = L * L^T`.
//!
//! ```
//! use ndarray::array;
//! use pricer_core::market_data::CholeskyFactor;
//!
//! let corr = array![[1.0, 0.5], [0.5, 1.0]];
//! let chol = CholeskyFactor::decompose(&corr.view()).unwrap();
//!
//! let mut w = [0.0; 2];
//! chol.transform_into(&[0.5, 0.8], &mut w);
//! assert_eq!(w[0], 0.5);
//! ```

use ndarray::{Array2, ArrayView2};

use super::error::CorrelationError;

/// Lower triangular Cholesky factor of a correlation matrix.
///
/// Used to transform independent standard normals into correlated normals.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    lower: Array2<f64>,
}

impl CholeskyFactor {
    /// Decomposes a symmetric matrix into `L * L^T`.
    ///
    /// # Errors
    ///
    /// Returns `CorrelationError::NotPositiveDefinite` when a pivot is
    /// non-positive or non-finite. A failed decomposition never yields a
    /// partially filled factor.
    pub fn decompose(matrix: &ArrayView2<'_, f64>) -> Result<Self, CorrelationError> {
        let n = matrix.nrows();
        let mut lower = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;
                for k in 0..j {
                    sum += lower[[i, k]] * lower[[j, k]];
                }

                if i == j {
                    let pivot = matrix[[j, j]] - sum;
                    if !(pivot.is_finite() && pivot > 0.0) {
                        return Err(CorrelationError::NotPositiveDefinite { index: j, pivot });
                    }
                    lower[[j, j]] = pivot.sqrt();
                } else {
                    lower[[i, j]] = (matrix[[i, j]] - sum) / lower[[j, j]];
                }
            }
        }

        Ok(Self { lower })
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.lower.nrows()
    }

    /// Lower triangular factor.
    #[inline]
    pub fn lower(&self) -> ArrayView2<'_, f64> {
        self.lower.view()
    }

    /// Writes `L * z` into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `z` or `out` is shorter than [`dim`](Self::dim).
    #[inline]
    pub fn transform_into(&self, z: &[f64], out: &mut [f64]) {
        let n = self.dim();
        assert!(
            z.len() >= n && out.len() >= n,
            "Input length {} / output length {} less than matrix dimension {}",
            z.len(),
            out.len(),
            n
        );

        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..=i {
                sum += self.lower[[i, j]] * z[j];
            }
            out[i] = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_identity_decomposes_to_identity() {
        let eye = Array2::<f64>::eye(3);
        let chol = CholeskyFactor::decompose(&eye.view()).unwrap();
        assert_eq!(chol.lower(), eye.view());
    }

    #[test]
    fn test_two_by_two_factor() {
        let rho = 0.5_f64;
        let corr = array![[1.0, rho], [rho, 1.0]];
        let chol = CholeskyFactor::decompose(&corr.view()).unwrap();

        assert_relative_eq!(chol.lower()[[0, 0]], 1.0);
        assert_relative_eq!(chol.lower()[[1, 0]], rho);
        assert_relative_eq!(chol.lower()[[1, 1]], (1.0 - rho * rho).sqrt(), epsilon = 1e-12);
        assert_eq!(chol.lower()[[0, 1]], 0.0);
    }

    #[test]
    fn test_factor_reconstructs_matrix() {
        let corr = array![[1.0, 0.3, 0.2], [0.3, 1.0, 0.4], [0.2, 0.4, 1.0]];
        let chol = CholeskyFactor::decompose(&corr.view()).unwrap();
        let l = chol.lower();
        let rebuilt = l.dot(&l.t());

        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(rebuilt[[i, j]], corr[[i, j]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_not_positive_definite() {
        // Pairwise correlations that cannot coexist
        let corr = array![[1.0, 0.9, -0.9], [0.9, 1.0, 0.9], [-0.9, 0.9, 1.0]];
        let result = CholeskyFactor::decompose(&corr.view());
        assert!(matches!(
            result,
            Err(CorrelationError::NotPositiveDefinite { index: 2, .. })
        ));
    }

    #[test]
    fn test_perfect_correlation_is_rejected() {
        let corr = array![[1.0, 1.0], [1.0, 1.0]];
        assert!(CholeskyFactor::decompose(&corr.view()).is_err());
    }

    #[test]
    fn test_transform_into() {
        let corr = array![[1.0, 0.6], [0.6, 1.0]];
        let chol = CholeskyFactor::decompose(&corr.view()).unwrap();
        let mut w = [0.0; 2];
        chol.transform_into(&[1.0, 1.0], &mut w);

        assert_relative_eq!(w[0], 1.0);
        assert_relative_eq!(w[1], 0.6 + 0.8, epsilon = 1e-12);
    }
}
