#![deny(missing_docs)]
#![doc = "Log-domain reweighting of sampled order parameters into volume-corrected free-energy differences."]

/// Folder enumeration and set membership rules.
pub mod discovery;
/// Set aggregation over a thread pool.
pub mod dispatch;
/// Per-folder ΔF/kT evaluation.
pub mod folder;
/// Numerically stable log-sum-exp.
pub mod logsum;
/// Analysis configuration loading and validation.
pub mod plan;
/// Report assembly helpers.
pub mod report;
/// Recursive sample-log scanning and state classification.
pub mod scan;
/// JSON and YAML serde helpers.
pub mod serde;
/// Mean and standard-error reduction.
pub mod stat;
/// Box-volume normalisation.
pub mod volume;
/// Weight table parsing.
pub mod weights;

pub use discovery::{filter_candidates, list_candidates, matches_rule, CandidateFolder};
pub use dispatch::{aggregate_set, judge_folder, run_analysis, write_report, RunOpts};
pub use folder::{delta_from_buckets, evaluate_folder, FolderEvaluation, SkipReason};
pub use logsum::log_sum_exp;
pub use plan::{load_config, AnalysisConfig, AnalysisSetRule};
pub use report::{AnalysisReport, FolderReport, FolderStatus, SetResult};
pub use scan::{classify, parse_sample_line, scan_samples, ScanStats, State, StateBuckets};
pub use stat::SetSummary;
pub use volume::volume_correction;
pub use weights::{load_weight_table, OrderParameterKey, WeightTable, WeightTableLoad};
