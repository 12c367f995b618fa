use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use dfe_core::errors::{DfeError, ErrorInfo};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::serde::{from_yaml_slice, to_json_bytes, to_yaml_string};

/// Naming rule and box geometry for one analysis set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSetRule {
    /// Set label used in reports.
    pub name: String,
    /// Substring a folder name must contain.
    pub contains: String,
    /// Substring a folder name must not contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_contains: Option<String>,
    /// Side length of the cubic simulation box used by this set.
    pub box_side: f64,
}

impl AnalysisSetRule {
    /// Creates a rule without an exclusion substring.
    pub fn new(name: impl Into<String>, contains: impl Into<String>, box_side: f64) -> Self {
        Self {
            name: name.into(),
            contains: contains.into(),
            not_contains: None,
            box_side,
        }
    }

    /// Adds an exclusion substring to the rule.
    pub fn excluding(mut self, not_contains: impl Into<String>) -> Self {
        self.not_contains = Some(not_contains.into());
        self
    }
}

/// Analysis configuration: a reference box and the sets to aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Side length of the reference cubic box all sets are normalised to.
    pub reference_box_side: f64,
    /// Analysis sets in reporting order.
    pub sets: Vec<AnalysisSetRule>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference_box_side: 25.0,
            sets: vec![
                AnalysisSetRule::new("ev", "ev", 30.0),
                AnalysisSetRule::new("p", "p", 40.0),
                AnalysisSetRule::new("at", "at", 30.0),
                AnalysisSetRule::new("gc", "gc", 40.0).excluding("gc5"),
                AnalysisSetRule::new("gc5", "gc5", 40.0),
            ],
        }
    }
}

impl AnalysisSetRule {
    /// Rejects a rule whose name, substrings or box side cannot define a set.
    pub fn validate(&self) -> Result<(), DfeError> {
        if self.name.trim().is_empty() {
            return Err(DfeError::config("dfe.config.set_name", "set name is empty"));
        }
        if self.contains.is_empty() {
            return Err(DfeError::Config(
                ErrorInfo::new("dfe.config.contains", "required substring is empty")
                    .with_context("set", self.name.clone()),
            ));
        }
        if matches!(self.not_contains.as_deref(), Some("")) {
            return Err(DfeError::Config(
                ErrorInfo::new("dfe.config.not_contains", "excluded substring is empty")
                    .with_context("set", self.name.clone())
                    .with_hint("omit not_contains instead"),
            ));
        }
        check_side(&self.name, self.box_side)
    }
}

impl AnalysisConfig {
    /// Rejects configurations that cannot produce meaningful corrections.
    pub fn validate(&self) -> Result<(), DfeError> {
        check_side("reference_box_side", self.reference_box_side)?;
        let mut names = BTreeSet::new();
        for rule in &self.sets {
            rule.validate()?;
            if !names.insert(rule.name.as_str()) {
                return Err(DfeError::Config(
                    ErrorInfo::new("dfe.config.duplicate_set", "set name is used twice")
                        .with_context("set", rule.name.clone()),
                ));
            }
        }
        Ok(())
    }

    /// SHA-256 of the configuration's JSON form, as lowercase hex.
    pub fn config_hash(&self) -> Result<String, DfeError> {
        let bytes = to_json_bytes(self)?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }

    /// Produces a YAML representation of the configuration.
    pub fn to_yaml_string(&self) -> Result<String, DfeError> {
        to_yaml_string(self)
    }
}

/// Checks that a box side length is positive and finite.
pub fn check_side(label: &str, side: f64) -> Result<(), DfeError> {
    if side.is_finite() && side > 0.0 {
        return Ok(());
    }
    Err(DfeError::Config(
        ErrorInfo::new("dfe.config.box_side", "box side must be positive and finite")
            .with_context("set", label)
            .with_context("box_side", side.to_string()),
    ))
}

/// Loads and validates an analysis configuration from YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig, DfeError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        DfeError::Io(
            ErrorInfo::new("dfe.config.read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let config: AnalysisConfig = from_yaml_slice(&bytes)?;
    config.validate()?;
    Ok(config)
}
