use std::fs;
use std::path::Path;

use dfe_core::errors::DfeError;
use log::info;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::discovery::{filter_candidates, list_candidates, CandidateFolder};
use crate::folder::{evaluate_folder, FolderEvaluation, SkipReason};
use crate::plan::{check_side, AnalysisConfig, AnalysisSetRule};
use crate::report::{AnalysisReport, FolderReport, FolderStatus, SetResult};
use crate::serde::to_json_bytes;
use crate::stat::SetSummary;
use crate::volume::volume_correction;

/// Options governing an analysis run.
#[derive(Debug, Clone)]
pub struct RunOpts {
    /// Number of folders evaluated in parallel.
    pub concurrency: usize,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

fn build_pool(opts: &RunOpts) -> Result<ThreadPool, DfeError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(opts.concurrency.max(1))
        .build()
        .map_err(|err| DfeError::io("dfe.thread_pool", err))
}

/// Turns a folder evaluation into a report entry. A folder is accepted only when its
/// corrected value is finite.
pub fn judge_folder(name: &str, evaluation: FolderEvaluation, correction: f64) -> FolderReport {
    let status = match evaluation {
        FolderEvaluation::Delta { raw, stats } if (raw + correction).is_finite() => {
            FolderStatus::Accepted {
                raw,
                corrected: raw + correction,
                stats,
            }
        }
        FolderEvaluation::Delta { stats, .. } => FolderStatus::Skipped {
            reason: SkipReason::NonFiniteDelta,
            stats: Some(stats),
        },
        FolderEvaluation::Insufficient { reason, stats } => FolderStatus::Skipped { reason, stats },
    };
    match &status {
        FolderStatus::Accepted { raw, corrected, .. } => {
            info!("OK: {name} -> raw dF/kT = {raw:.4}, corrected dF/kT = {corrected:.4}")
        }
        FolderStatus::Skipped { reason, .. } => info!("SKIPPED: {name} ({reason})"),
    }
    FolderReport {
        name: name.to_string(),
        status,
    }
}

fn aggregate_on(
    pool: &ThreadPool,
    rule: &AnalysisSetRule,
    reference_side: f64,
    candidates: &[CandidateFolder],
) -> SetResult {
    let correction = volume_correction(reference_side, rule.box_side);
    let members = filter_candidates(candidates, rule);
    info!(
        "set '{}': box side {} vs reference {}, correction {:.4}, {} candidate folders",
        rule.name,
        rule.box_side,
        reference_side,
        correction,
        members.len()
    );

    let folders: Vec<FolderReport> = pool.install(|| {
        members
            .par_iter()
            .map(|member| judge_folder(&member.name, evaluate_folder(&member.path), correction))
            .collect()
    });

    let values: Vec<f64> = folders.iter().filter_map(FolderReport::corrected).collect();
    let summary = SetSummary::from_values(&values);
    match summary {
        SetSummary::NoData => info!("set '{}': no valid folders", rule.name),
        SetSummary::Single { mean } => {
            info!("set '{}': dF/kT = {mean:.4} from a single folder, no SEM", rule.name)
        }
        SetSummary::Estimate { mean, sem, n } => info!(
            "set '{}': dF/kT = {mean:.4} ± {sem:.4} from {n} of {} folders",
            rule.name,
            members.len()
        ),
    }

    SetResult {
        name: rule.name.clone(),
        box_side: rule.box_side,
        volume_correction: correction,
        candidates: members.len(),
        valid: values.len(),
        summary,
        folders,
    }
}

/// Validates the rule and reference side, then aggregates one analysis set over
/// pre-listed candidate folders.
pub fn aggregate_set(
    rule: &AnalysisSetRule,
    reference_side: f64,
    candidates: &[CandidateFolder],
    opts: &RunOpts,
) -> Result<SetResult, DfeError> {
    check_side("reference_box_side", reference_side)?;
    rule.validate()?;
    let pool = build_pool(opts)?;
    Ok(aggregate_on(&pool, rule, reference_side, candidates))
}

/// Validates the configuration, then aggregates every set over the folders under `root`.
pub fn run_analysis(
    config: &AnalysisConfig,
    root: &Path,
    opts: &RunOpts,
) -> Result<AnalysisReport, DfeError> {
    config.validate()?;
    let candidates = list_candidates(root)?;
    let pool = build_pool(opts)?;
    let sets = config
        .sets
        .iter()
        .map(|rule| aggregate_on(&pool, rule, config.reference_box_side, &candidates))
        .collect();
    AnalysisReport::new(config, root, sets)
}

/// Writes a report as pretty-printed JSON, creating parent directories as needed.
pub fn write_report(report: &AnalysisReport, out: &Path) -> Result<(), DfeError> {
    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| DfeError::io("dfe.report_dir", err))?;
    }
    let bytes = to_json_bytes(report)?;
    fs::write(out, bytes).map_err(|err| DfeError::io("dfe.report_write", err))
}
