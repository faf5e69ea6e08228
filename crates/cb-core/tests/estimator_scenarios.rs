//! End-to-end estimator scenarios on small, hand-checkable grids.

use cb_common::{Error, Method, Observations};
use cb_core::estimator::{estimate_posterior, unnormalized_posterior, Estimator};
use cb_core::render::Chart;
use cb_core::summary::summarize;
use cb_math::GridSpec;

fn obs(values: &[i64]) -> Observations {
    Observations::from_values(values).expect("valid flips")
}

fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < tol, "index {i}: {a} vs {e}");
    }
}

#[test]
fn reference_sequence_peaks_at_mle() {
    let data = obs(&[1, 1, 1, 0, 1, 1, 0, 1, 1, 1]);
    let mle = data.heads() as f64 / data.len() as f64;

    for method in [Method::Direct, Method::Log] {
        let est = Estimator::new(GridSpec::unit(1000), method)
            .estimate(&data)
            .unwrap();
        let mass = est.mass();

        let total: f64 = mass.iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "{method}: total {total}");

        let peak = mass
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!((est.theta()[peak] - mle).abs() <= 1.0 / 999.0);

        // Unimodal: non-decreasing up to the peak, non-increasing after.
        assert!(mass[..=peak].windows(2).all(|w| w[0] <= w[1]));
        assert!(mass[peak..].windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn empty_data_on_five_points_is_uniform() {
    let grid = GridSpec::unit(5).build();
    assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    let mass = estimate_posterior(&obs(&[]), &grid).unwrap();
    assert_close(&mass, &[0.2; 5], 1e-12);
}

#[test]
fn single_head_on_three_points() {
    let grid = [0.0, 0.5, 1.0];
    let data = obs(&[1]);
    assert_close(&unnormalized_posterior(&data, &grid), &[0.0, 0.5, 1.0], 1e-15);
    assert_close(
        &estimate_posterior(&data, &grid).unwrap(),
        &[0.0, 1.0 / 3.0, 2.0 / 3.0],
        1e-12,
    );
}

#[test]
fn invalid_value_rejected_before_estimation() {
    let err = Observations::from_values(&[1, 0, 2]).unwrap_err();
    match err {
        Error::InvalidObservation { index, value } => {
            assert_eq!(index, 2);
            assert_eq!(value, "2");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(Observations::parse("1 0 x").is_err());
}

#[test]
fn grid_summary_approaches_conjugate_posterior() {
    let data = obs(&[1, 0, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1]);
    let est = Estimator::new(GridSpec::unit(2001), Method::Direct)
        .estimate(&data)
        .unwrap();
    let s = summarize(&est, 0.9).unwrap();

    assert!((s.mean - s.conjugate.mean).abs() < 1e-4);
    assert!((s.credible.lower - s.conjugate.credible.lower).abs() < 1e-3);
    assert!((s.credible.upper - s.conjugate.credible.upper).abs() < 1e-3);
}

#[test]
fn narrow_grid_inside_unit_interval() {
    let spec = GridSpec {
        points: 11,
        lower: 0.6,
        upper: 0.9,
    };
    let est = Estimator::new(spec, Method::Direct)
        .estimate(&Observations::default())
        .unwrap();
    assert_eq!(est.theta().first(), Some(&0.6));
    assert_eq!(est.theta().last(), Some(&0.9));
    let total: f64 = est.mass().iter().sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn grid_reaching_outside_unit_interval_gets_no_mass_there() {
    let spec = GridSpec {
        points: 5,
        lower: -0.5,
        upper: 1.5,
    };
    let est = Estimator::new(spec, Method::Log).estimate(&obs(&[1, 0])).unwrap();
    assert_eq!(est.theta(), &[-0.5, 0.0, 0.5, 1.0, 1.5]);
    assert_close(est.mass(), &[0.0, 0.0, 1.0, 0.0, 0.0], 1e-12);
}

#[test]
fn chart_exposes_estimate_sequences() {
    let est = Estimator::default().estimate(&Observations::default()).unwrap();
    let chart = Chart::posterior(&est);
    assert_eq!(chart.x, est.theta());
    assert_eq!(chart.y, est.mass());
    assert!(chart.grid);
    assert_eq!(chart.color, "blue");
}
