use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use chrono::Utc;
use dfe_core::errors::DfeError;
use dfe_core::provenance::{RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::folder::SkipReason;
use crate::plan::AnalysisConfig;
use crate::scan::ScanStats;
use crate::stat::SetSummary;

/// Schema version of [`AnalysisReport`].
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Accept or skip decision for one folder within one set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "state")]
pub enum FolderStatus {
    /// The folder contributed a corrected delta.
    Accepted {
        /// Uncorrected ΔF/kT.
        raw: f64,
        /// ΔF/kT after the volume correction.
        corrected: f64,
        /// Scan counters.
        stats: ScanStats,
    },
    /// The folder was left out of the aggregate.
    Skipped {
        /// Why the folder was left out.
        reason: SkipReason,
        /// Scan counters, when the scan ran.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stats: Option<ScanStats>,
    },
}

/// Per-folder diagnostic entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderReport {
    /// Folder name relative to the analysis root.
    pub name: String,
    /// Decision taken for the folder.
    pub status: FolderStatus,
}

impl FolderReport {
    /// Corrected delta when the folder was accepted.
    pub fn corrected(&self) -> Option<f64> {
        match &self.status {
            FolderStatus::Accepted { corrected, .. } => Some(*corrected),
            FolderStatus::Skipped { .. } => None,
        }
    }

    /// Skip reason when the folder was rejected.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.status {
            FolderStatus::Skipped { reason, .. } => Some(reason),
            FolderStatus::Accepted { .. } => None,
        }
    }
}

/// Aggregate for one analysis set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetResult {
    /// Set label.
    pub name: String,
    /// Box side the set was simulated in.
    pub box_side: f64,
    /// Additive `ln(V_ref / V_sim)` applied to every folder.
    pub volume_correction: f64,
    /// Number of folders matching the set's naming rule.
    pub candidates: usize,
    /// Number of folders that produced a finite corrected delta.
    pub valid: usize,
    /// Statistical reduction of the corrected deltas.
    pub summary: SetSummary,
    /// Per-folder decisions in name order.
    pub folders: Vec<FolderReport>,
}

impl SetResult {
    /// Mean corrected delta, when any folder was valid.
    pub fn mean(&self) -> Option<f64> {
        self.summary.mean()
    }

    /// Standard error, when at least two folders were valid.
    pub fn sem(&self) -> Option<f64> {
        self.summary.sem()
    }

    /// Renders the human readable summary block for the set.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Set '{}' (box side {})", self.name.to_uppercase(), self.box_side);
        let _ = writeln!(
            out,
            "  volume correction ln(V_ref/V_sim) = {:.4}",
            self.volume_correction
        );
        for folder in &self.folders {
            let _ = match &folder.status {
                FolderStatus::Accepted { raw, corrected, .. } => writeln!(
                    out,
                    "  - OK: {:<12} -> raw dF/kT = {raw:8.4}, corrected dF/kT = {corrected:8.4}",
                    folder.name
                ),
                FolderStatus::Skipped { reason, .. } => {
                    writeln!(out, "  - SKIPPED: {} ({reason})", folder.name)
                }
            };
        }
        let _ = match self.summary {
            SetSummary::NoData => writeln!(out, "  no valid folders; no estimate available"),
            SetSummary::Single { mean } => writeln!(
                out,
                "  dF/kT = {mean:.4} (based on 1 folder, insufficient for SEM)"
            ),
            SetSummary::Estimate { mean, sem, n } => writeln!(
                out,
                "  dF/kT = {mean:.4} ± {sem:.4} (from {n} of {} folders)",
                self.candidates
            ),
        };
        out
    }
}

/// Full report for one run over an analysis root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Reference box side all sets were normalised to.
    pub reference_box_side: f64,
    /// Per-set results in configuration order.
    pub sets: Vec<SetResult>,
    /// Provenance metadata describing the run.
    pub provenance: RunProvenance,
}

impl AnalysisReport {
    /// Assembles a report, stamping provenance for the given root. Fails when the
    /// configuration cannot be hashed.
    pub fn new(
        config: &AnalysisConfig,
        root: &Path,
        sets: Vec<SetResult>,
    ) -> Result<Self, DfeError> {
        Ok(Self {
            reference_box_side: config.reference_box_side,
            sets,
            provenance: provenance(config, root)?,
        })
    }

    /// Looks up a set by name.
    pub fn set(&self, name: &str) -> Option<&SetResult> {
        self.sets.iter().find(|set| set.name == name)
    }
}

fn provenance(config: &AnalysisConfig, root: &Path) -> Result<RunProvenance, DfeError> {
    let mut versions = BTreeMap::new();
    versions.insert(
        "dfe-reweight".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    Ok(RunProvenance {
        config_hash: config.config_hash()?,
        root: root.display().to_string(),
        schema: REPORT_SCHEMA,
        created_at: Utc::now().to_rfc3339(),
        tool_versions: versions,
    })
}
