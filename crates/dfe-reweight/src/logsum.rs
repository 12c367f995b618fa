/// Computes `ln(sum(exp(x_i)))` without overflow by factoring out the maximum.
///
/// Returns negative infinity for an empty slice or when every value is negative
/// infinity. A NaN anywhere in the input yields NaN, and a positive infinity yields
/// positive infinity.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let mut max = f64::NEG_INFINITY;
    for &value in values {
        if value.is_nan() {
            return f64::NAN;
        }
        if value > max {
            max = value;
        }
    }
    if max == f64::NEG_INFINITY || max == f64::INFINITY {
        return max;
    }
    let sum: f64 = values.iter().map(|&value| (value - max).exp()).sum();
    max + sum.ln()
}
