use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::MedalLogError;

// `<level id> <seconds>`; anything after the number is ignored.
static RECORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\w ]+) ([0-9]+\.[0-9]+)").expect("record pattern must compile"));

/// Best (lowest) time per level identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestTimes(HashMap<String, f64>);

impl BestTimes {
    /// Records a time, keeping it only if it beats the stored one.
    pub fn record(&mut self, level: &str, seconds: f64) {
        match self.0.get_mut(level) {
            Some(best) => {
                if seconds < *best {
                    *best = seconds;
                }
            }
            None => {
                self.0.insert(level.to_owned(), seconds);
            }
        }
    }

    pub fn get(&self, level: &str) -> Option<f64> {
        self.0.get(level).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Splits one medallog line into level identifier and seconds.
///
/// The identifier is returned exactly as written, surrounding spaces included.
pub fn parse_line(line: &str) -> Option<(&str, f64)> {
    let caps = RECORD_RE.captures(line)?;
    let level = caps.get(1)?.as_str();
    let seconds = caps
        .get(2)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite())?;
    Some((level, seconds))
}

/// Reads every record from `reader`, stopping at the first malformed line.
///
/// Lines are decoded lossily: bytes that are not UTF-8 only matter if they
/// fall inside the level identifier or the time.
pub fn parse_records<R: BufRead>(reader: R) -> Result<BestTimes, MedalLogError> {
    let mut best = BestTimes::default();

    for (index, bytes) in reader.split(b'\n').enumerate() {
        let line_no = index + 1;
        let mut bytes = bytes.map_err(|source| MedalLogError::LineUnreadable {
            line: line_no,
            source,
        })?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let line = String::from_utf8_lossy(&bytes);
        let (level, seconds) = parse_line(&line).ok_or_else(|| MedalLogError::MalformedLine {
            line: line_no,
            content: line.clone().into_owned(),
        })?;
        best.record(level, seconds);
    }

    tracing::debug!(levels = best.len(), "parsed medallog records");
    Ok(best)
}

/// Opens and parses a medallog file.
pub fn read_records(path: &Path) -> Result<BestTimes, MedalLogError> {
    let file = File::open(path).map_err(|source| MedalLogError::LogUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "reading medallog");
    parse_records(BufReader::new(file))
}
