use std::fs;
use std::path::{Path, PathBuf};

use dfe_core::errors::{DfeError, ErrorInfo};

use crate::plan::AnalysisSetRule;

/// Prefix shared by every simulation folder under the analysis root.
pub const FOLDER_PREFIX: &str = "bub_";

/// Marker of hybrid-method folders; they never enter a set.
pub const HYBRID_MARKER: &str = "hyb";

/// Entry directly under the analysis root that may belong to a set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CandidateFolder {
    /// File name of the entry.
    pub name: String,
    /// Full path of the entry.
    pub path: PathBuf,
}

/// Returns true when `name` belongs to the set described by `rule`.
pub fn matches_rule(name: &str, rule: &AnalysisSetRule) -> bool {
    if name.contains(HYBRID_MARKER) {
        return false;
    }
    if !name.contains(rule.contains.as_str()) {
        return false;
    }
    match rule.not_contains.as_deref() {
        Some(excluded) => !name.contains(excluded),
        None => true,
    }
}

/// Lists prefixed entries directly under `root`, sorted by name.
pub fn list_candidates(root: &Path) -> Result<Vec<CandidateFolder>, DfeError> {
    let read_error = |err: std::io::Error| {
        DfeError::Io(
            ErrorInfo::new("dfe.root_read", err.to_string())
                .with_context("root", root.display().to_string()),
        )
    };
    let mut candidates = Vec::new();
    for entry in fs::read_dir(root).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if name.starts_with(FOLDER_PREFIX) {
            candidates.push(CandidateFolder {
                name,
                path: entry.path(),
            });
        }
    }
    candidates.sort();
    Ok(candidates)
}

/// Selects the candidates that belong to `rule`, preserving order.
pub fn filter_candidates<'a>(
    candidates: &'a [CandidateFolder],
    rule: &AnalysisSetRule,
) -> Vec<&'a CandidateFolder> {
    candidates
        .iter()
        .filter(|candidate| matches_rule(&candidate.name, rule))
        .collect()
}
