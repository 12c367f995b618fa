use serde::{Deserialize, Serialize};

/// Reduction of a set's corrected deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum SetSummary {
    /// No folder produced a value.
    NoData,
    /// Exactly one folder produced a value; the standard error is undefined.
    Single {
        /// The single corrected delta.
        mean: f64,
    },
    /// Two or more folders produced values.
    Estimate {
        /// Arithmetic mean of the corrected deltas.
        mean: f64,
        /// Standard error of the mean with Bessel's correction.
        sem: f64,
        /// Number of values reduced.
        n: usize,
    },
}

impl SetSummary {
    /// Reduces the provided values according to their count.
    pub fn from_values(values: &[f64]) -> Self {
        match values {
            [] => SetSummary::NoData,
            [single] => SetSummary::Single { mean: *single },
            _ => SetSummary::Estimate {
                mean: mean(values),
                sem: standard_error(values),
                n: values.len(),
            },
        }
    }

    /// Mean of the set, when at least one value exists.
    pub fn mean(&self) -> Option<f64> {
        match self {
            SetSummary::NoData => None,
            SetSummary::Single { mean } | SetSummary::Estimate { mean, .. } => Some(*mean),
        }
    }

    /// Standard error of the mean, when at least two values exist.
    pub fn sem(&self) -> Option<f64> {
        match self {
            SetSummary::Estimate { sem, .. } => Some(*sem),
            _ => None,
        }
    }
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1); NaN for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let centre = mean(values);
    let squares: f64 = values.iter().map(|value| (value - centre).powi(2)).sum();
    (squares / (values.len() - 1) as f64).sqrt()
}

/// Standard error of the mean, `sample_std_dev / sqrt(n)`.
pub fn standard_error(values: &[f64]) -> f64 {
    sample_std_dev(values) / (values.len() as f64).sqrt()
}
