//! Simulation time grids and observation-date mapping.
//!
//! Grids are measured in years from a time origin of exactly 0.0. The
//! remaining-horizon helpers re-base a grid (and a set of observation
//! times) at an intermediate step so that pricing can restart from a
//! realised state.

use ndarray::{s, Array1};

use super::error::GridError;

/// Tolerance used when filtering observation times against "now".
pub const TIME_TOLERANCE: f64 = 1e-12;

/// Immutable simulation time grid.
///
/// # Invariants
///
/// - At least one point
/// - `times[0] == 0.0` exactly
/// - Strictly increasing
/// - `dt > 0`
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::make_time_grid;
///
/// let grid = make_time_grid(1.0, 252).unwrap();
/// assert_eq!(grid.len(), 253);
/// assert_eq!(grid.times()[0], 0.0);
/// assert_eq!(grid.horizon(), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    times: Array1<f64>,
    dt: f64,
}

impl TimeGrid {
    /// Creates a validated time grid.
    ///
    /// # Errors
    ///
    /// Returns `GridError` if `times` is empty, `dt` is not positive,
    /// `times[0] != 0.0`, or the times are not strictly increasing.
    pub fn new(times: Array1<f64>, dt: f64) -> Result<Self, GridError> {
        if times.is_empty() {
            return Err(GridError::Empty);
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(GridError::InvalidStep { dt });
        }
        if times[0] != 0.0 {
            return Err(GridError::NonZeroOrigin { first: times[0] });
        }
        for i in 1..times.len() {
            if !(times[i] > times[i - 1]) {
                return Err(GridError::NotIncreasing { index: i });
            }
        }

        Ok(Self { times, dt })
    }

    /// Grid time points in years.
    #[inline]
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// Step size in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of grid points (including the origin).
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; a grid holds at least the origin.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Final grid time.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Index of the final grid point.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.times.len() - 1
    }

    /// Sub-grid from step `k` onward, re-based so that `times[k]` becomes 0.
    ///
    /// The step size is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `GridError::StepOutOfRange` if `k` is not a grid index.
    pub fn remaining_from(&self, k: usize) -> Result<Self, GridError> {
        if k >= self.len() {
            return Err(GridError::StepOutOfRange {
                index: k,
                len: self.len(),
            });
        }

        let origin = self.times[k];
        let times = self.times.slice(s![k..]).mapv(|t| t - origin);
        Self::new(times, self.dt)
    }
}

/// Builds a uniform grid from 0 to `maturity` inclusive.
///
/// The grid has `round(maturity * steps_per_year) + 1` points. The final
/// point equals `maturity` exactly.
///
/// # Errors
///
/// - `GridError::InvalidMaturity` if `maturity` is not positive
/// - `GridError::InvalidStepsPerYear` if `steps_per_year` is zero
/// - `GridError::TooFewPoints` if `round(maturity * steps_per_year)` is 0,
///   which would leave a one-point grid
pub fn make_time_grid(maturity: f64, steps_per_year: u32) -> Result<TimeGrid, GridError> {
    if !(maturity.is_finite() && maturity > 0.0) {
        return Err(GridError::InvalidMaturity { maturity });
    }
    if steps_per_year == 0 {
        return Err(GridError::InvalidStepsPerYear);
    }

    let n_points = (maturity * f64::from(steps_per_year)).round() as usize + 1;
    if n_points < 2 {
        return Err(GridError::TooFewPoints {
            got: n_points,
            need: 2,
        });
    }

    let n_steps = n_points - 1;
    let dt = maturity / n_steps as f64;
    let mut times = Array1::from_shape_fn(n_points, |i| i as f64 * dt);
    times[n_steps] = maturity;

    TimeGrid::new(times, dt)
}

/// Maps observation times to the nearest grid indices.
///
/// Ties are broken toward the earlier index: the later index is chosen
/// only when it is strictly closer.
///
/// # Errors
///
/// Returns `GridError` if any time lies outside `[0, horizon]`, the
/// times are not strictly increasing, or two times snap to indices that
/// are not strictly increasing.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{make_time_grid, obs_times_to_indices};
///
/// let grid = make_time_grid(1.0, 4).unwrap();
/// let idx = obs_times_to_indices(&grid, &[0.5, 1.0]).unwrap();
/// assert_eq!(idx, vec![2, 4]);
/// ```
pub fn obs_times_to_indices(grid: &TimeGrid, obs_times: &[f64]) -> Result<Vec<usize>, GridError> {
    let times = grid.times();
    let horizon = grid.horizon();

    for &time in obs_times {
        if !(0.0..=horizon).contains(&time) {
            return Err(GridError::ObservationOutOfRange { time, horizon });
        }
    }
    for index in 1..obs_times.len() {
        if !(obs_times[index] > obs_times[index - 1]) {
            return Err(GridError::ObservationsNotIncreasing { index });
        }
    }

    let mut indices = Vec::with_capacity(obs_times.len());
    for (k, &time) in obs_times.iter().enumerate() {
        // First grid point >= time; exists because time <= horizon.
        let upper = times
            .iter()
            .position(|&t| t >= time)
            .unwrap_or(grid.last_index());
        let lower = upper.saturating_sub(1);

        let grid_index = if (times[upper] - time).abs() < (times[lower] - time).abs() {
            upper
        } else {
            lower
        };

        if let Some(&previous) = indices.last() {
            if grid_index <= previous {
                return Err(GridError::AmbiguousObservationMapping {
                    index: k,
                    grid_index,
                });
            }
        }
        indices.push(grid_index);
    }

    Ok(indices)
}

/// Observation times strictly after `now`, re-based to `now`.
///
/// Times within [`TIME_TOLERANCE`] of `now` are treated as already
/// observed.
pub fn remaining_obs_times(obs_times: &[f64], now: f64) -> Vec<f64> {
    obs_times
        .iter()
        .filter(|&&t| t > now + TIME_TOLERANCE)
        .map(|&t| t - now)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_make_time_grid() {
        let grid = make_time_grid(1.0, 252).unwrap();
        assert_eq!(grid.times()[0], 0.0);
        assert!((grid.horizon() - 1.0).abs() < 1e-12);
        assert_eq!(grid.len(), 253);
        assert_relative_eq!(grid.dt(), 1.0 / 252.0, epsilon = 1e-15);
    }

    #[test]
    fn test_make_time_grid_rejects_bad_inputs() {
        assert!(matches!(
            make_time_grid(0.0, 252),
            Err(GridError::InvalidMaturity { .. })
        ));
        assert!(matches!(
            make_time_grid(-1.0, 252),
            Err(GridError::InvalidMaturity { .. })
        ));
        assert_eq!(make_time_grid(1.0, 0), Err(GridError::InvalidStepsPerYear));
        assert!(matches!(
            make_time_grid(0.001, 252),
            Err(GridError::TooFewPoints { got: 1, need: 2 })
        ));
    }

    #[test]
    fn test_single_step_grid() {
        let grid = make_time_grid(1.0 / 252.0, 252).unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_time_grid_validation() {
        assert_eq!(TimeGrid::new(Array1::from(vec![]), 0.1), Err(GridError::Empty));
        assert!(matches!(
            TimeGrid::new(array![0.0, 0.1], 0.0),
            Err(GridError::InvalidStep { .. })
        ));
        assert!(matches!(
            TimeGrid::new(array![0.1, 0.2], 0.1),
            Err(GridError::NonZeroOrigin { .. })
        ));
        assert_eq!(
            TimeGrid::new(array![0.0, 0.2, 0.2], 0.1),
            Err(GridError::NotIncreasing { index: 2 })
        );
    }

    #[test]
    fn test_obs_times_to_indices_quarterly() {
        let grid = make_time_grid(1.0, 252).unwrap();
        let idx = obs_times_to_indices(&grid, &[0.25, 0.5, 0.75, 1.0]).unwrap();

        assert!((62..65).contains(&idx[0]));
        assert!((125..128).contains(&idx[1]));
        assert!((188..191).contains(&idx[2]));
        assert_eq!(idx[3], 252);
    }

    #[test]
    fn test_obs_tie_goes_to_earlier_index() {
        let grid = TimeGrid::new(array![0.0, 1.0, 2.0], 1.0).unwrap();
        let idx = obs_times_to_indices(&grid, &[0.5, 1.5]).unwrap();
        assert_eq!(idx, vec![0, 1]);
    }

    #[test]
    fn test_obs_strictly_closer_later_index() {
        let grid = TimeGrid::new(array![0.0, 1.0, 2.0], 1.0).unwrap();
        let idx = obs_times_to_indices(&grid, &[0.6, 1.9]).unwrap();
        assert_eq!(idx, vec![1, 2]);
    }

    #[test]
    fn test_obs_out_of_range() {
        let grid = make_time_grid(1.0, 12).unwrap();
        assert!(matches!(
            obs_times_to_indices(&grid, &[0.5, 1.5]),
            Err(GridError::ObservationOutOfRange { .. })
        ));
        assert!(matches!(
            obs_times_to_indices(&grid, &[-0.1]),
            Err(GridError::ObservationOutOfRange { .. })
        ));
    }

    #[test]
    fn test_obs_not_increasing() {
        let grid = make_time_grid(1.0, 12).unwrap();
        assert_eq!(
            obs_times_to_indices(&grid, &[0.5, 0.5]),
            Err(GridError::ObservationsNotIncreasing { index: 1 })
        );
    }

    #[test]
    fn test_obs_ambiguous_mapping() {
        // Monthly grid cannot separate two observations one day apart
        let grid = make_time_grid(1.0, 12).unwrap();
        let result = obs_times_to_indices(&grid, &[0.5, 0.5 + 1.0 / 365.0]);
        assert!(matches!(
            result,
            Err(GridError::AmbiguousObservationMapping { index: 1, .. })
        ));
    }

    #[test]
    fn test_obs_empty_is_empty() {
        let grid = make_time_grid(1.0, 12).unwrap();
        assert!(obs_times_to_indices(&grid, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_remaining_grid() {
        let grid = make_time_grid(1.0, 4).unwrap();
        let rem = grid.remaining_from(1).unwrap();

        assert_eq!(rem.len(), 4);
        assert_eq!(rem.times()[0], 0.0);
        assert_relative_eq!(rem.horizon(), 0.75);
        assert_eq!(rem.dt(), grid.dt());
    }

    #[test]
    fn test_remaining_grid_last_point() {
        let grid = make_time_grid(1.0, 4).unwrap();
        let rem = grid.remaining_from(4).unwrap();
        assert_eq!(rem.len(), 1);
        assert!(matches!(
            grid.remaining_from(5),
            Err(GridError::StepOutOfRange { index: 5, len: 5 })
        ));
    }

    #[test]
    fn test_remaining_obs_times() {
        let rem = remaining_obs_times(&[0.25, 0.5, 0.75, 1.0], 0.5);
        assert_eq!(rem.len(), 2);
        assert_relative_eq!(rem[0], 0.25);
        assert_relative_eq!(rem[1], 0.5);

        assert!(remaining_obs_times(&[0.25], 0.3).is_empty());
    }

    #[test]
    fn test_remaining_maturity_maps_to_last_index() {
        let grid = make_time_grid(1.0, 252).unwrap();
        for k in [0, 1, 100, 250, 251] {
            let now = grid.times()[k];
            let rem_grid = grid.remaining_from(k).unwrap();
            let rem_obs = remaining_obs_times(&[1.0], now);
            let idx = obs_times_to_indices(&rem_grid, &rem_obs).unwrap();
            assert_eq!(idx, vec![rem_grid.last_index()]);
        }
    }

    proptest! {
        #[test]
        fn prop_make_time_grid_is_uniform(maturity in 0.05f64..5.0, spy in 12u32..400) {
            let grid = make_time_grid(maturity, spy).unwrap();
            prop_assert_eq!(grid.times()[0], 0.0);
            prop_assert_eq!(grid.horizon(), maturity);
            for w in grid.times().windows(2) {
                prop_assert!((w[1] - w[0] - grid.dt()).abs() < 1e-12);
            }
        }
    }
}
