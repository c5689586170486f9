//! Tests for bump-and-reprice Greeks.

use super::*;
use crate::mc::{price_from_state, PricingError};
use crate::rng::PricerRng;
use approx::assert_relative_eq;
use ndarray::array;
use pricer_core::{make_time_grid, obs_times_to_indices, MarketParams, TimeGrid};
use pricer_models::AutocallableWorstOf;

fn market() -> MarketParams {
    MarketParams::new(0.02, array![0.25, 0.30], array![[1.0, 0.5], [0.5, 1.0]]).unwrap()
}

fn note() -> AutocallableWorstOf {
    AutocallableWorstOf::new(1.0, vec![0.25, 0.5, 0.75, 1.0], 0.08, 1.0, 0.6, 100.0).unwrap()
}

fn grid() -> TimeGrid {
    make_time_grid(1.0, 52).unwrap()
}

mod delta_tests {
    use super::*;

    #[test]
    fn test_delta_one_finite_value_per_asset() {
        let d = delta(&note(), &market(), &grid(), 2_000, array![1.0, 1.0].view(), 0.01, 0)
            .unwrap();
        assert_eq!(d.len(), 2);
        assert!(d.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_delta_reproducible() {
        let a = delta(&note(), &market(), &grid(), 1_000, array![1.0, 1.0].view(), 0.01, 7)
            .unwrap();
        let b = delta(&note(), &market(), &grid(), 1_000, array![1.0, 1.0].view(), 0.01, 7)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_delta_scales_with_spot_units() {
        let unit = delta(&note(), &market(), &grid(), 1_000, array![1.0, 1.0].view(), 0.01, 3)
            .unwrap();
        let cash = delta(
            &note(),
            &market(),
            &grid(),
            1_000,
            array![100.0, 50.0].view(),
            0.01,
            3,
        )
        .unwrap();

        assert_relative_eq!(cash[0], unit[0] / 100.0, max_relative = 1e-12);
        assert_relative_eq!(cash[1], unit[1] / 50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_bumps_rejected() {
        for bump in [0.0, f64::NAN, -1.0, -2.0] {
            let result = delta(&note(), &market(), &grid(), 100, array![1.0, 1.0].view(), bump, 0);
            assert!(
                matches!(result, Err(PricingError::InvalidBump { .. })),
                "bump {} accepted",
                bump
            );
        }
    }

    #[test]
    fn test_spot_length_mismatch() {
        let result = delta(&note(), &market(), &grid(), 100, array![1.0].view(), 0.01, 0);
        assert!(matches!(result, Err(PricingError::LevelsShape { .. })));
    }

    #[test]
    fn test_price_and_delta_base_matches_price_from_state() {
        let grid = grid();
        let remaining_grid = grid.remaining_from(13).unwrap();
        let product = note().remaining(grid.times()[13]).unwrap();
        let obs = obs_times_to_indices(&remaining_grid, product.obs_times()).unwrap();
        let levels = array![0.95, 1.05];

        let (pv, deltas) = price_and_delta_from_state(
            &product,
            &market(),
            &remaining_grid,
            levels.view(),
            &obs,
            1_000,
            0.01,
            11,
        )
        .unwrap();
        let expected = price_from_state(
            &product,
            &market(),
            &remaining_grid,
            levels.view(),
            &obs,
            1_000,
            &mut PricerRng::from_seed(11),
        )
        .unwrap();

        assert_eq!(pv, expected);
        assert_eq!(deltas.len(), 2);

        let only_deltas = delta_from_state(
            &product,
            &market(),
            &remaining_grid,
            levels.view(),
            &obs,
            1_000,
            0.01,
            11,
        )
        .unwrap();
        assert_eq!(only_deltas, deltas);
    }

    #[test]
    fn test_deep_in_the_money_delta_is_zero() {
        // Every path autocalls at the next observation with or without the bump
        let grid = make_time_grid(0.25, 4).unwrap();
        let product = AutocallableWorstOf::new(0.25, vec![0.25], 0.08, 1.0, 0.6, 100.0).unwrap();
        let levels = array![5.0, 5.0];

        let d = delta_from_state(
            &product,
            &market(),
            &grid,
            levels.view(),
            &[grid.last_index()],
            500,
            0.01,
            0,
        )
        .unwrap();

        assert_eq!(d, vec![0.0, 0.0]);
    }
}

mod vega_tests {
    use super::*;

    #[test]
    fn test_vega_one_finite_value_per_asset() {
        let v = vega(&note(), &market(), &grid(), 2_000, 0.01, 0).unwrap();
        assert_eq!(v.len(), 2);
        assert!(v.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_vega_non_positive_vol_rejected() {
        let result = vega(&note(), &market(), &grid(), 100, -0.25, 0);
        assert!(matches!(
            result,
            Err(PricingError::VolatilityBump { asset: 0, .. })
        ));
    }

    #[test]
    fn test_vega_zero_bump_rejected() {
        let result = vega(&note(), &market(), &grid(), 100, 0.0, 0);
        assert!(matches!(result, Err(PricingError::InvalidBump { .. })));
    }

    #[test]
    fn test_vega_zero_paths_rejected() {
        let result = vega(&note(), &market(), &grid(), 0, 0.01, 0);
        assert!(matches!(
            result,
            Err(PricingError::InvalidPathCount { n_paths: 0 })
        ));
    }
}
