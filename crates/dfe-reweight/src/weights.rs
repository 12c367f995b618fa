use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Name of the per-folder weight table file.
pub const WEIGHT_FILE_NAME: &str = "wfile.dat";

/// Number of integer components in an order-parameter key.
pub const KEY_ARITY: usize = 8;

const WEIGHT_LINE_TOKENS: usize = KEY_ARITY + 1;

/// Order-parameter bin identifying a microstate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderParameterKey([i64; KEY_ARITY]);

impl OrderParameterKey {
    /// Creates a key from its raw components.
    pub const fn new(values: [i64; KEY_ARITY]) -> Self {
        Self(values)
    }

    /// Returns the raw components of the key.
    pub fn values(&self) -> &[i64; KEY_ARITY] {
        &self.0
    }

    /// Parses exactly [`KEY_ARITY`] integer tokens into a key.
    pub fn parse_tokens(tokens: &[&str]) -> Option<Self> {
        if tokens.len() != KEY_ARITY {
            return None;
        }
        let mut values = [0i64; KEY_ARITY];
        for (slot, token) in values.iter_mut().zip(tokens) {
            *slot = token.parse().ok()?;
        }
        Some(Self(values))
    }
}

/// Converts a raw weight into log space; non-positive weights are impossible states.
pub fn log_weight(weight: f64) -> f64 {
    if weight > 0.0 {
        weight.ln()
    } else {
        f64::NEG_INFINITY
    }
}

/// Log-weights keyed by order-parameter bin for a single folder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    entries: HashMap<OrderParameterKey, f64>,
    skipped_lines: usize,
}

impl WeightTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a raw weight, storing its logarithm. A repeated key overwrites the earlier entry.
    pub fn insert_weight(&mut self, key: OrderParameterKey, weight: f64) {
        self.entries.insert(key, log_weight(weight));
    }

    /// Returns the log-weight recorded for the key.
    pub fn log_weight(&self, key: &OrderParameterKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Number of distinct keys in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no key was parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lines rejected while parsing the source file.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Parses a weight table from any buffered reader, skipping malformed lines.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut table = Self::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_weight_line(&line) {
                Some((key, weight)) => table.insert_weight(key, weight),
                None => table.skipped_lines += 1,
            }
        }
        Ok(table)
    }
}

/// Parses one `k0 .. k7 W` line.
pub fn parse_weight_line(line: &str) -> Option<(OrderParameterKey, f64)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != WEIGHT_LINE_TOKENS {
        return None;
    }
    let key = OrderParameterKey::parse_tokens(&tokens[..KEY_ARITY])?;
    let weight: f64 = tokens[KEY_ARITY].parse().ok()?;
    Some((key, weight))
}

/// Outcome of loading a folder's weight table.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightTableLoad {
    /// The table was parsed.
    Loaded(WeightTable),
    /// No weight file exists in the folder.
    Missing,
    /// The weight file exists but could not be read.
    Unreadable(String),
}

/// Loads `wfile.dat` from the given folder. Only a failed open with `NotFound`
/// counts as a missing table; every other open or read failure is unreadable.
pub fn load_weight_table(folder: &Path) -> WeightTableLoad {
    let path = folder.join(WEIGHT_FILE_NAME);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return WeightTableLoad::Missing,
        Err(err) => {
            warn!("error opening weights file {}: {err}", path.display());
            return WeightTableLoad::Unreadable(err.to_string());
        }
    };
    match WeightTable::from_reader(BufReader::new(file)) {
        Ok(table) => {
            debug!(
                "loaded {} weight entries from {} ({} lines skipped)",
                table.len(),
                path.display(),
                table.skipped_lines()
            );
            WeightTableLoad::Loaded(table)
        }
        Err(err) => {
            warn!("error reading weights file {}: {err}", path.display());
            WeightTableLoad::Unreadable(err.to_string())
        }
    }
}
