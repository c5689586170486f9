//! Self-financing hedge book.

use ndarray::{Array1, ArrayView1};

/// Position in the underlyings plus a cash account.
///
/// Trades are funded from cash at the supplied levels, so the book is
/// self-financing: rebalancing alone never changes its value.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use pricer_risk::hedging::HedgeBook;
///
/// let mut book = HedgeBook::new(2);
/// let levels = array![1.0, 2.0];
///
/// book.rebalance(array![0.5, -1.0].view(), levels.view());
/// assert_eq!(book.cash(), -(0.5 * 1.0 - 1.0 * 2.0));
/// assert_eq!(book.value(levels.view()), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HedgeBook {
    position: Array1<f64>,
    cash: f64,
}

impl HedgeBook {
    /// Creates a flat book: no position, no cash.
    pub fn new(n_assets: usize) -> Self {
        Self {
            position: Array1::zeros(n_assets),
            cash: 0.0,
        }
    }

    /// Current position per asset.
    #[inline]
    pub fn position(&self) -> ArrayView1<'_, f64> {
        self.position.view()
    }

    /// Current cash balance.
    #[inline]
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Moves the position to `target`, paying `(target - position) · levels`
    /// out of cash.
    ///
    /// # Panics
    ///
    /// Panics if `target` or `levels` does not match the number of assets.
    pub fn rebalance(&mut self, target: ArrayView1<'_, f64>, levels: ArrayView1<'_, f64>) {
        let trade = &target - &self.position;
        self.cash -= trade.dot(&levels);
        self.position.assign(&target);
    }

    /// Accrues cash at a continuously compounded `rate` over `dt`.
    pub fn accrue(&mut self, rate: f64, dt: f64) {
        self.cash *= (rate * dt).exp();
    }

    /// Marks the book at `levels`: `position · levels + cash`.
    pub fn value(&self, levels: ArrayView1<'_, f64>) -> f64 {
        self.position.dot(&levels) + self.cash
    }
}
