//! Worst-of autocallable note.
//!
//! The note observes a basket of normalised asset levels on a discrete
//! schedule. At each observation the worst performer is compared with the
//! autocall barrier; the first breach redeems the note early at notional
//! plus an accrued coupon. Without an early redemption the note pays back
//! full notional at maturity if the worst performer sits at or above the
//! protection barrier, and notional scaled by the worst level otherwise.
//!
//! ## Payoff
//!
//! For observation times `t_k` with grid indices `i_k`:
//! ```text
//! worst(i) = min_a S_a(i)
//!
//! first k with worst(i_k) >= B_call:  N * (1 + c * t_k)   at tau = t_k
//! else worst(T) >= B_prot:            N                   at tau = T
//! else:                               N * worst(T)        at tau = T
//! ```

use ndarray::ArrayView2;

use super::error::{PayoffError, ProductError};

/// Realised redemption of one trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Redemption {
    /// Undiscounted cash amount paid.
    pub payoff: f64,
    /// Time of payment, measured from the product's origin.
    pub tau: f64,
}

/// Worst-of autocallable note on normalised levels.
///
/// Immutable and validated at construction. A product seen from a later
/// date is derived with [`remaining`](Self::remaining), which returns a new
/// instance.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use pricer_models::instruments::AutocallableWorstOf;
///
/// let note = AutocallableWorstOf::new(1.0, vec![0.5, 1.0], 0.06, 1.0, 0.6, 100.0).unwrap();
///
/// // Both assets at their initial level on the first observation: called.
/// let levels = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
/// let r = note.redemption(levels.view(), &[1, 2]).unwrap();
/// assert_eq!(r.tau, 0.5);
/// assert!((r.payoff - 103.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AutocallableWorstOf {
    maturity: f64,
    obs_times: Vec<f64>,
    coupon_rate: f64,
    autocall_barrier: f64,
    protection_barrier: f64,
    notional: f64,
}

impl AutocallableWorstOf {
    /// Creates a validated note.
    ///
    /// # Arguments
    ///
    /// * `maturity` - Final redemption time in years (must be positive)
    /// * `obs_times` - Autocall observation times, strictly increasing in (0, maturity]
    /// * `coupon_rate` - Annualised coupon accrued until an early redemption
    /// * `autocall_barrier` - Early redemption level (must be positive)
    /// * `protection_barrier` - Capital protection level, in (0, autocall_barrier]
    /// * `notional` - Redemption amount (must be positive)
    ///
    /// # Errors
    ///
    /// Returns `ProductError` describing the first violated constraint.
    pub fn new(
        maturity: f64,
        obs_times: Vec<f64>,
        coupon_rate: f64,
        autocall_barrier: f64,
        protection_barrier: f64,
        notional: f64,
    ) -> Result<Self, ProductError> {
        if !(maturity.is_finite() && maturity > 0.0) {
            return Err(ProductError::InvalidMaturity { maturity });
        }

        for (index, &time) in obs_times.iter().enumerate() {
            if !(time > 0.0 && time <= maturity) {
                return Err(ProductError::ObservationOutOfRange { time, maturity });
            }
            if index > 0 && !(time > obs_times[index - 1]) {
                return Err(ProductError::ObservationsNotIncreasing { index });
            }
        }

        if !coupon_rate.is_finite() {
            return Err(ProductError::InvalidCoupon { coupon_rate });
        }

        if !(autocall_barrier.is_finite() && autocall_barrier > 0.0) {
            return Err(ProductError::InvalidBarrier {
                name: "autocall",
                level: autocall_barrier,
            });
        }
        if !(protection_barrier.is_finite() && protection_barrier > 0.0) {
            return Err(ProductError::InvalidBarrier {
                name: "protection",
                level: protection_barrier,
            });
        }
        if protection_barrier > autocall_barrier {
            return Err(ProductError::BarrierOrdering {
                protection: protection_barrier,
                autocall: autocall_barrier,
            });
        }

        if !(notional.is_finite() && notional > 0.0) {
            return Err(ProductError::InvalidNotional { notional });
        }

        Ok(Self {
            maturity,
            obs_times,
            coupon_rate,
            autocall_barrier,
            protection_barrier,
            notional,
        })
    }

    /// Returns the maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the observation schedule.
    #[inline]
    pub fn obs_times(&self) -> &[f64] {
        &self.obs_times
    }

    /// Returns the annualised coupon rate.
    #[inline]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Returns the autocall barrier.
    #[inline]
    pub fn autocall_barrier(&self) -> f64 {
        self.autocall_barrier
    }

    /// Returns the protection barrier.
    #[inline]
    pub fn protection_barrier(&self) -> f64 {
        self.protection_barrier
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// The same note seen from time `now`.
    ///
    /// Maturity and observation times are shifted by `-now`; observations
    /// at or before `now` are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::InvalidMaturity` if `now` is at or past
    /// maturity.
    pub fn remaining(&self, now: f64) -> Result<Self, ProductError> {
        let obs_times = pricer_core::remaining_obs_times(&self.obs_times, now);
        self.rebuild(self.maturity - now, obs_times)
    }

    /// Copy of this note with a different observation schedule.
    ///
    /// # Errors
    ///
    /// Returns `ProductError` if the schedule is invalid for this maturity.
    pub fn with_obs_times(&self, obs_times: Vec<f64>) -> Result<Self, ProductError> {
        self.rebuild(self.maturity, obs_times)
    }

    fn rebuild(&self, maturity: f64, obs_times: Vec<f64>) -> Result<Self, ProductError> {
        Self::new(
            maturity,
            obs_times,
            self.coupon_rate,
            self.autocall_barrier,
            self.protection_barrier,
            self.notional,
        )
    }

    /// Evaluates the redemption of a single trajectory.
    ///
    /// `levels` is indexed `[step, asset]`; `obs_indices[k]` is the step at
    /// which `obs_times()[k]` is observed. Maturity is the final step.
    ///
    /// # Errors
    ///
    /// Returns `PayoffError` if the trajectory has fewer than two assets or
    /// no steps, or if the observation indices do not fit the schedule or
    /// the trajectory.
    pub fn redemption(
        &self,
        levels: ArrayView2<'_, f64>,
        obs_indices: &[usize],
    ) -> Result<Redemption, PayoffError> {
        let (n_steps, n_assets) = levels.dim();
        if n_assets < 2 {
            return Err(PayoffError::TooFewAssets { n_assets });
        }
        if n_steps == 0 {
            return Err(PayoffError::EmptyTrajectory);
        }
        if obs_indices.len() != self.obs_times.len() {
            return Err(PayoffError::ObservationCountMismatch {
                indices: obs_indices.len(),
                observations: self.obs_times.len(),
            });
        }

        let worst_at = |step: usize| levels.row(step).fold(f64::INFINITY, |m, &x| m.min(x));

        for (&step, &time) in obs_indices.iter().zip(&self.obs_times) {
            if step >= n_steps {
                return Err(PayoffError::ObservationIndexOutOfRange {
                    index: step,
                    n_steps,
                });
            }
            if worst_at(step) >= self.autocall_barrier {
                return Ok(Redemption {
                    payoff: self.notional * (1.0 + self.coupon_rate * time),
                    tau: time,
                });
            }
        }

        let worst = worst_at(n_steps - 1);
        let payoff = if worst >= self.protection_barrier {
            self.notional
        } else {
            self.notional * worst
        };

        Ok(Redemption {
            payoff,
            tau: self.maturity,
        })
    }
}
