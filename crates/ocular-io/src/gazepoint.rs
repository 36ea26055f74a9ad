//! Gazepoint tracker logs
//!
//! Gazepoint trackers write one delimited row per sample. Only the columns
//! the detectors need are read; all others are ignored. The `USER` column
//! holds free-text annotations sent to the tracker during recording and is
//! used to cut a session into epochs.

use crate::error::{Error, Result};
use ocular_core::GazeSample;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Delimiter of Gazepoint exports
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// One row of a Gazepoint log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazepointRow {
    #[serde(rename = "TIME")]
    pub time: f64,
    #[serde(rename = "FPOGX")]
    pub fpogx: f64,
    #[serde(rename = "FPOGY")]
    pub fpogy: f64,
    #[serde(rename = "FPOGV")]
    pub fpogv: u8,
    #[serde(rename = "FPOGD")]
    pub fpogd: f64,
    #[serde(rename = "FPOGID")]
    pub fpogid: u64,
    #[serde(rename = "BKID")]
    pub bkid: u64,
    #[serde(rename = "BKDUR")]
    pub bkdur: f64,
    #[serde(rename = "USER", default)]
    pub user: String,
}

impl GazepointRow {
    pub fn to_sample(&self) -> GazeSample {
        GazeSample {
            time: self.time,
            pog_x: self.fpogx,
            pog_y: self.fpogy,
            pog_valid: self.fpogv != 0,
            fixation_duration: self.fpogd,
            fixation_id: self.fpogid,
            blink_id: self.bkid,
            blink_duration: self.bkdur,
        }
    }
}

impl From<&GazepointRow> for GazeSample {
    fn from(row: &GazepointRow) -> Self {
        row.to_sample()
    }
}

/// Rows of one recording session, or of one epoch cut from it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GazepointSession {
    rows: Vec<GazepointRow>,
}

impl GazepointSession {
    pub fn new(rows: Vec<GazepointRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[GazepointRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert to the detector input type
    pub fn samples(&self) -> Vec<GazeSample> {
        self.rows.iter().map(GazeSample::from).collect()
    }

    /// Annotation of the first row, if any
    pub fn annotation(&self) -> Option<&str> {
        self.rows.first().map(|row| row.user.as_str())
    }

    /// Split into maximal runs of rows sharing one `USER` value
    pub fn annotated_runs(&self) -> impl Iterator<Item = &[GazepointRow]> + '_ {
        self.rows.chunk_by(|a, b| a.user == b.user)
    }
}

impl From<Vec<GazepointRow>> for GazepointSession {
    fn from(rows: Vec<GazepointRow>) -> Self {
        Self::new(rows)
    }
}

/// Deserialize rows from any reader with a header line
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> Result<GazepointSession> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<GazepointRow>, csv::Error>>()?;
    Ok(GazepointSession::new(rows))
}

/// Load a single log file
pub fn load(path: impl AsRef<Path>, delimiter: u8) -> Result<GazepointSession> {
    let path = path.as_ref();
    let session = read_rows(std::fs::File::open(path)?, delimiter)?;
    debug!(path = %path.display(), rows = session.len(), "loaded gazepoint log");
    Ok(session)
}

/// Load a session split over numbered files
///
/// `name_format` must contain one `{}` placeholder, replaced by the block
/// numbers `0..n_blocks`.
pub fn load_blocks(
    dir: impl AsRef<Path>,
    name_format: &str,
    n_blocks: usize,
    delimiter: u8,
) -> Result<Vec<GazepointSession>> {
    if !name_format.contains("{}") {
        return Err(Error::InvalidParameter(format!(
            "block name format {name_format:?} has no {{}} placeholder"
        )));
    }

    let dir = dir.as_ref();
    (0..n_blocks)
        .map(|block| load(dir.join(name_format.replacen("{}", &block.to_string(), 1)), delimiter))
        .collect()
}

/// Cut sessions into epochs by their `USER` annotation
///
/// Every maximal run of equal `USER` values whose text contains
/// `annotation` becomes one epoch. Epochs keep session order.
pub fn epoch(sessions: &[GazepointSession], annotation: &str) -> Vec<GazepointSession> {
    let epochs: Vec<GazepointSession> = sessions
        .iter()
        .flat_map(|session| session.annotated_runs())
        .filter(|run| run[0].user.contains(annotation))
        .map(|run| GazepointSession::new(run.to_vec()))
        .collect();
    debug!(annotation, epochs = epochs.len(), "epoched sessions");
    epochs
}

/// Load a session and cut it into epochs
///
/// With `n_blocks` of `None`, `name_format` names a single file.
pub fn load_and_epoch(
    dir: impl AsRef<Path>,
    name_format: &str,
    annotation: &str,
    delimiter: u8,
    n_blocks: Option<usize>,
) -> Result<Vec<GazepointSession>> {
    let sessions = match n_blocks {
        Some(n) => load_blocks(dir, name_format, n, delimiter)?,
        None => vec![load(dir.as_ref().join(name_format), delimiter)?],
    };
    Ok(epoch(&sessions, annotation))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
TIME\tFPOGX\tFPOGY\tFPOGS\tFPOGD\tFPOGID\tFPOGV\tBKID\tBKDUR\tUSER
0.000\t0.50\t0.40\t0.000\t0.000\t1\t1\t0\t0.000\tSTART_reading
0.016\t0.52\t0.41\t0.000\t0.016\t1\t1\t0\t0.000\tSTART_reading
0.033\t0.10\t0.90\t0.033\t0.000\t2\t0\t1\t0.000\tSTART_reading
0.050\t0.11\t0.90\t0.033\t0.016\t2\t1\t0\t0.120\tSTOP
0.066\t0.30\t0.30\t0.066\t0.000\t3\t1\t0\t0.000\tSTART_scanning
";

    #[test]
    fn test_read_rows_maps_columns() {
        let session = read_rows(LOG.as_bytes(), b'\t').unwrap();
        assert_eq!(session.len(), 5);

        let samples = session.samples();
        assert_eq!(samples[2].fixation_id, 2);
        assert!(!samples[2].pog_valid);
        assert_eq!(samples[2].blink_id, 1);
        assert_eq!(samples[3].blink_duration, 0.12);
        assert_eq!(session.annotation(), Some("START_reading"));
    }

    #[test]
    fn test_user_column_is_optional() {
        let log = "TIME,FPOGX,FPOGY,FPOGV,FPOGD,FPOGID,BKID,BKDUR\n1.0,0.5,0.5,1,0.0,7,0,0.0\n";
        let session = read_rows(log.as_bytes(), b',').unwrap();
        assert_eq!(session.rows()[0].user, "");
        assert_eq!(session.rows()[0].fpogid, 7);
    }

    #[test]
    fn test_missing_required_column() {
        let log = "TIME,FPOGX,FPOGY\n1.0,0.5,0.5\n";
        assert!(matches!(read_rows(log.as_bytes(), b','), Err(Error::Csv(_))));
    }

    #[test]
    fn test_epoch_keeps_matching_runs() {
        let session = read_rows(LOG.as_bytes(), b'\t').unwrap();
        let epochs = epoch(&[session.clone(), session], "START");

        // Two matching runs per session
        assert_eq!(epochs.len(), 4);
        assert_eq!(epochs[0].len(), 3);
        assert_eq!(epochs[1].annotation(), Some("START_scanning"));
        assert!(epoch(&epochs, "STOP").is_empty());
    }

    #[test]
    fn test_block_format_needs_placeholder() {
        let result = load_blocks(".", "tracker_data_log.tsv", 2, DEFAULT_DELIMITER);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}
