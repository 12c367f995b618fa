use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logsum::log_sum_exp;
use crate::scan::{scan_samples, ScanStats, StateBuckets};
use crate::weights::{load_weight_table, WeightTableLoad};

/// Reason a folder contributes no value to its set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "detail")]
pub enum SkipReason {
    /// The folder has no weight table.
    MissingWeightTable,
    /// The weight table exists but reading it failed.
    UnreadableWeightTable(String),
    /// No sample log exists anywhere under the folder.
    NoSampleFiles,
    /// No sample was classified into state A.
    StateANotObserved,
    /// No sample was classified into state B.
    StateBNotObserved,
    /// The computed delta is infinite or NaN.
    NonFiniteDelta,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingWeightTable => write!(f, "missing weight table"),
            SkipReason::UnreadableWeightTable(err) => write!(f, "unreadable weight table: {err}"),
            SkipReason::NoSampleFiles => write!(f, "no sample files"),
            SkipReason::StateANotObserved => write!(f, "state A not observed"),
            SkipReason::StateBNotObserved => write!(f, "state B not observed"),
            SkipReason::NonFiniteDelta => write!(f, "non-finite free energy"),
        }
    }
}

/// Result of evaluating a single simulation folder.
#[derive(Debug, Clone, PartialEq)]
pub enum FolderEvaluation {
    /// Both states were observed; `raw` is the uncorrected ΔF/kT and may still be non-finite.
    Delta {
        /// Raw, volume-dependent free-energy difference in units of kT.
        raw: f64,
        /// Scan counters for the folder.
        stats: ScanStats,
    },
    /// The folder cannot produce a delta.
    Insufficient {
        /// Why the folder was rejected.
        reason: SkipReason,
        /// Scan counters, when the scan ran.
        stats: Option<ScanStats>,
    },
}

impl FolderEvaluation {
    fn insufficient(reason: SkipReason, stats: Option<ScanStats>) -> Self {
        FolderEvaluation::Insufficient { reason, stats }
    }

    /// Returns the raw delta when one was computed.
    pub fn raw_delta(&self) -> Option<f64> {
        match self {
            FolderEvaluation::Delta { raw, .. } => Some(*raw),
            FolderEvaluation::Insufficient { .. } => None,
        }
    }
}

/// Computes `-(lse(B) - lse(A))` from filled buckets.
pub fn delta_from_buckets(buckets: &StateBuckets) -> Result<f64, SkipReason> {
    if buckets.a.is_empty() {
        return Err(SkipReason::StateANotObserved);
    }
    if buckets.b.is_empty() {
        return Err(SkipReason::StateBNotObserved);
    }
    let log_total_a = log_sum_exp(&buckets.a);
    let log_total_b = log_sum_exp(&buckets.b);
    Ok(-(log_total_b - log_total_a))
}

/// Loads the folder's weight table, scans its sample logs and reduces them to ΔF/kT.
pub fn evaluate_folder(folder: &Path) -> FolderEvaluation {
    let table = match load_weight_table(folder) {
        WeightTableLoad::Loaded(table) => table,
        WeightTableLoad::Missing => {
            return FolderEvaluation::insufficient(SkipReason::MissingWeightTable, None)
        }
        WeightTableLoad::Unreadable(err) => {
            return FolderEvaluation::insufficient(SkipReason::UnreadableWeightTable(err), None)
        }
    };
    let buckets = scan_samples(folder, &table);
    if buckets.stats.files_found == 0 {
        return FolderEvaluation::insufficient(SkipReason::NoSampleFiles, Some(buckets.stats));
    }
    match delta_from_buckets(&buckets) {
        Ok(raw) => FolderEvaluation::Delta {
            raw,
            stats: buckets.stats,
        },
        Err(reason) => FolderEvaluation::insufficient(reason, Some(buckets.stats)),
    }
}
