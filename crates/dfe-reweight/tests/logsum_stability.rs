use dfe_reweight::log_sum_exp;
use proptest::prelude::*;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
}

fn within_ulps(value: f64, expected: f64, ulps: f64) -> bool {
    (value - expected).abs() <= ulps * f64::EPSILON * expected.abs()
}

/// Compensated summation, used as a high-precision reference for long sequences.
fn kahan_sum(terms: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut carry = 0.0_f64;
    for term in terms {
        let y = term - carry;
        let t = sum + y;
        carry = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Offsets below one in steps of 2^-10, so that `offset + d` is exact for the offsets used.
fn dyadic_offsets(n: usize) -> Vec<f64> {
    (0..n).map(|i| -((i % 1024) as f64) / 1024.0).collect()
}

#[test]
fn empty_input_is_negative_infinity() {
    assert_eq!(log_sum_exp(&[]), f64::NEG_INFINITY);
}

#[test]
fn all_impossible_inputs_stay_impossible() {
    assert_eq!(
        log_sum_exp(&[f64::NEG_INFINITY, f64::NEG_INFINITY]),
        f64::NEG_INFINITY
    );
}

#[test]
fn impossible_terms_do_not_contribute() {
    let value = log_sum_exp(&[f64::NEG_INFINITY, 2.0_f64.ln(), f64::NEG_INFINITY]);
    assert!(close(value, 2.0_f64.ln(), 1e-15));
}

#[test]
fn nan_propagates() {
    assert!(log_sum_exp(&[0.0, f64::NAN, 1.0]).is_nan());
    assert!(log_sum_exp(&[f64::NAN]).is_nan());
    assert!(log_sum_exp(&[f64::NEG_INFINITY, f64::NAN]).is_nan());
}

#[test]
fn positive_infinity_dominates() {
    assert_eq!(log_sum_exp(&[0.0, f64::INFINITY]), f64::INFINITY);
}

#[test]
fn large_inputs_do_not_overflow() {
    // ln(e^0 + 2 e^1000) = 1000 + ln(2 + e^-1000), and e^-1000 underflows to zero.
    let value = log_sum_exp(&[0.0, 1000.0, 1000.0]);
    assert!(value.is_finite());
    assert!(close(value, 1000.0 + 2.0_f64.ln(), 1e-15));
}

#[test]
fn tiny_inputs_do_not_underflow() {
    let value = log_sum_exp(&[-1000.0, -1000.0, -1000.0, -1000.0]);
    assert!(close(value, -1000.0 + 4.0_f64.ln(), 1e-15));
}

#[test]
fn many_copies_of_an_extreme_value_add_ln_n() {
    let n = 100_000;
    for x in [700.0, -700.0, 1.0e5, -1.0e5, 1.0e300] {
        let values = vec![x; n];
        let expected = x + (n as f64).ln();
        let value = log_sum_exp(&values);
        assert!(within_ulps(value, expected, 4.0), "{x}: {value} vs {expected}");
    }
}

#[test]
fn long_sequences_match_compensated_reference() {
    let offsets = dyadic_offsets(100_000);
    for base in [700.0, -700.0, 1.0e5] {
        let values: Vec<f64> = offsets.iter().map(|d| base + d).collect();
        // The maximum is `base` itself, so each shifted term is exactly `d`.
        let expected = base + kahan_sum(offsets.iter().map(|d| d.exp())).ln();
        let value = log_sum_exp(&values);
        assert!(within_ulps(value, expected, 16.0), "{base}: {value} vs {expected}");
    }
}

#[test]
fn single_value_is_identity() {
    assert_eq!(log_sum_exp(&[-3.5]), -3.5);
}

proptest! {
    #[test]
    fn matches_reference_at_extreme_offsets(
        values in prop::collection::vec(-40.0f64..40.0, 1..32),
        offset in prop_oneof![Just(0.0f64), Just(800.0), Just(-800.0), Just(1.0e5)],
    ) {
        // The naive sum is exact enough on the unshifted values; the shifted
        // inputs would overflow or underflow a naive evaluation.
        let reference = values.iter().map(|v| v.exp()).sum::<f64>().ln() + offset;
        let shifted: Vec<f64> = values.iter().map(|v| v + offset).collect();
        let value = log_sum_exp(&shifted);
        prop_assert!(value.is_finite());
        prop_assert!(close(value, reference, 1e-12), "{} vs {}", value, reference);
    }

    #[test]
    fn bounded_by_max_and_max_plus_ln_n(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)) {
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let value = log_sum_exp(&values);
        prop_assert!(value >= max);
        prop_assert!(value <= max + (values.len() as f64).ln() + 1e-9 * (1.0 + max.abs()));
    }
}
