use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::weights::{OrderParameterKey, WeightTable, KEY_ARITY};

/// File name of the per-sample energy logs.
pub const SAMPLE_FILE_NAME: &str = "energy.dat";

/// Minimum number of whitespace tokens an accepted sample line carries.
pub const MIN_SAMPLE_TOKENS: usize = 13;

/// Index of the first order-parameter token in a sample line.
pub const KEY_OFFSET: usize = 5;

/// Index of the classifier token; it lies inside the key range.
pub const CLASSIFIER_INDEX: usize = 8;

/// Metastable state a sample is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Classifier value zero.
    A,
    /// Classifier value above one.
    B,
}

/// Maps a classifier value to a state. Value one is the transition region and
/// negative values fall outside both states.
pub fn classify(classifier: i64) -> Option<State> {
    match classifier {
        0 => Some(State::A),
        c if c > 1 => Some(State::B),
        _ => None,
    }
}

/// One parsed sample line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Order-parameter bin of the sample.
    pub key: OrderParameterKey,
    /// Classifier value taken from inside the key range.
    pub classifier: i64,
}

/// Parses a sample line, returning `None` for short or non-numeric lines.
pub fn parse_sample_line(line: &str) -> Option<Sample> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_SAMPLE_TOKENS {
        return None;
    }
    let key = OrderParameterKey::parse_tokens(&tokens[KEY_OFFSET..KEY_OFFSET + KEY_ARITY])?;
    let classifier = key.values()[CLASSIFIER_INDEX - KEY_OFFSET];
    Some(Sample { key, classifier })
}

/// Counters describing what happened to every line and file during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Sample files discovered under the folder.
    pub files_found: usize,
    /// Sample files that could not be opened or read to the end.
    pub files_unreadable: usize,
    /// Samples appended to state A.
    pub accepted_a: usize,
    /// Samples appended to state B.
    pub accepted_b: usize,
    /// Lines that were too short or not numeric.
    pub malformed: usize,
    /// Samples whose key is absent from the weight table.
    pub unresolved: usize,
    /// Samples classified into neither state.
    pub excluded: usize,
}

/// Negated log-weights accumulated per state for one folder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateBuckets {
    /// Negated log-weights of state A samples.
    pub a: Vec<f64>,
    /// Negated log-weights of state B samples.
    pub b: Vec<f64>,
    /// Scan diagnostics.
    pub stats: ScanStats,
}

impl StateBuckets {
    /// Resolves a sample against the table and files it into its bucket.
    pub fn push_sample(&mut self, sample: Sample, table: &WeightTable) {
        let Some(log_weight) = table.log_weight(&sample.key) else {
            self.stats.unresolved += 1;
            return;
        };
        match classify(sample.classifier) {
            Some(State::A) => {
                self.a.push(-log_weight);
                self.stats.accepted_a += 1;
            }
            Some(State::B) => {
                self.b.push(-log_weight);
                self.stats.accepted_b += 1;
            }
            None => self.stats.excluded += 1,
        }
    }

    /// Processes every line of a sample log.
    pub fn scan_reader<R: BufRead>(&mut self, reader: R, table: &WeightTable) -> io::Result<()> {
        for line in reader.lines() {
            match parse_sample_line(&line?) {
                Some(sample) => self.push_sample(sample, table),
                None => self.stats.malformed += 1,
            }
        }
        Ok(())
    }
}

/// Lazily yields every sample log under `root`, at any depth.
pub fn sample_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry while walking sample logs: {err}");
                None
            }
        })
        .filter(|entry| entry.file_name() == SAMPLE_FILE_NAME && entry.path().is_file())
        .map(|entry| entry.into_path())
}

/// Scans all sample logs under `root` into state buckets.
pub fn scan_samples(root: &Path, table: &WeightTable) -> StateBuckets {
    let mut buckets = StateBuckets::default();
    for path in sample_files(root) {
        buckets.stats.files_found += 1;
        let result = File::open(&path)
            .and_then(|file| buckets.scan_reader(BufReader::new(file), table));
        if let Err(err) = result {
            warn!("error reading energy file {}: {err}", path.display());
            buckets.stats.files_unreadable += 1;
        }
    }
    debug!("scan of {} finished: {:?}", root.display(), buckets.stats);
    buckets
}
