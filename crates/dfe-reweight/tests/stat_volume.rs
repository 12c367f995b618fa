use dfe_reweight::stat::{mean, sample_std_dev, standard_error};
use dfe_reweight::{volume_correction, SetSummary};

#[test]
fn equal_boxes_need_no_correction() {
    assert_eq!(volume_correction(25.0, 25.0), 0.0);
}

#[test]
fn larger_simulation_box_gives_negative_correction() {
    assert_eq!(volume_correction(25.0, 50.0), 3.0 * 0.5_f64.ln());
    assert!(volume_correction(25.0, 50.0) < 0.0);
    assert!(volume_correction(40.0, 25.0) > 0.0);
}

#[test]
fn correction_is_log_volume_ratio() {
    let expected = (25.0_f64.powi(3) / 30.0_f64.powi(3)).ln();
    assert!((volume_correction(25.0, 30.0) - expected).abs() < 1e-12);
}

#[test]
fn reduction_depends_on_count() {
    assert_eq!(SetSummary::from_values(&[]), SetSummary::NoData);
    assert_eq!(SetSummary::from_values(&[]).mean(), None);

    let single = SetSummary::from_values(&[-1.5]);
    assert_eq!(single, SetSummary::Single { mean: -1.5 });
    assert_eq!(single.mean(), Some(-1.5));
    assert_eq!(single.sem(), None);

    let many = SetSummary::from_values(&[1.0, 2.0, 3.0, 4.0]);
    let SetSummary::Estimate { mean, sem, n } = many else {
        panic!("expected an estimate");
    };
    assert_eq!(n, 4);
    assert_eq!(mean, 2.5);
    // ddof = 1 variance is 5/3, so sem = sqrt(5/3) / 2.
    assert!((sem - (5.0_f64 / 3.0).sqrt() / 2.0).abs() < 1e-12);
}

#[test]
fn identical_values_have_zero_sem() {
    let summary = SetSummary::from_values(&[0.7, 0.7]);
    assert_eq!(summary.sem(), Some(0.0));
}

#[test]
fn helpers_are_nan_when_undefined() {
    assert!(mean(&[]).is_nan());
    assert!(sample_std_dev(&[1.0]).is_nan());
    assert!(standard_error(&[1.0]).is_nan());
    assert_eq!(sample_std_dev(&[2.0, 4.0]), 2.0_f64.sqrt());
}
