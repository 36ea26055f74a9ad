//! Two-channel EOG recordings from delimited text files

use crate::error::{Error, Result};
use ocular_core::EogSignals;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Owned vertical and horizontal EOG channels of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EogRecording {
    vertical: Vec<f64>,
    horizontal: Vec<f64>,
}

impl EogRecording {
    pub fn new(vertical: Vec<f64>, horizontal: Vec<f64>) -> Result<Self> {
        EogSignals::new(&vertical, &horizontal)?;
        Ok(Self {
            vertical,
            horizontal,
        })
    }

    pub fn vertical(&self) -> &[f64] {
        &self.vertical
    }

    pub fn horizontal(&self) -> &[f64] {
        &self.horizontal
    }

    pub fn len(&self) -> usize {
        self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty()
    }

    /// Borrow both channels as detector input
    pub fn signals(&self) -> Result<EogSignals<'_>> {
        Ok(EogSignals::new(&self.vertical, &self.horizontal)?)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

fn parse_field(record: &csv::StringRecord, index: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse().map_err(|_| Error::InvalidValue {
        column: column.to_string(),
        row,
        value: raw.to_string(),
    })
}

/// Read two named numeric columns from any reader with a header line
pub fn read_eog<R: Read>(
    reader: R,
    delimiter: u8,
    vertical_column: &str,
    horizontal_column: &str,
) -> Result<EogRecording> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let v_index = column_index(&headers, vertical_column)?;
    let h_index = column_index(&headers, horizontal_column)?;

    let mut vertical = Vec::new();
    let mut horizontal = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        vertical.push(parse_field(&record, v_index, vertical_column, row)?);
        horizontal.push(parse_field(&record, h_index, horizontal_column, row)?);
    }

    EogRecording::new(vertical, horizontal)
}

/// Load two named numeric columns from a file
pub fn load_eog(
    path: impl AsRef<Path>,
    delimiter: u8,
    vertical_column: &str,
    horizontal_column: &str,
) -> Result<EogRecording> {
    let path = path.as_ref();
    let recording = read_eog(
        std::fs::File::open(path)?,
        delimiter,
        vertical_column,
        horizontal_column,
    )?;
    debug!(path = %path.display(), samples = recording.len(), "loaded EOG recording");
    Ok(recording)
}
