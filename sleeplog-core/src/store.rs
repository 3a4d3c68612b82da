//! CSV-backed record store
//!
//! The whole file is read on [`RecordStore::load`] and rewritten on
//! [`RecordStore::save`]. The first row is a header and is skipped on load
//! whatever its text.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SleepLogError};
use crate::types::{format_bedtime, format_date, BEDTIME_FORMAT, DATE_FORMAT};
use crate::SleepRecord;

/// Header row written at the top of every data file
pub const HEADER: [&str; 3] = ["date", "weekday", "bedtime"];

/// Persistent store for sleep records
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the data file exists yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every stored record in file order.
    ///
    /// A missing file is an empty store. A row whose date or bedtime does not
    /// parse, or that has fewer than three fields, fails the whole load.
    pub fn load(&self) -> Result<Vec<SleepRecord>> {
        if !self.exists() {
            debug!("No data file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            records.push(parse_row(&row, line)?);
        }

        debug!(
            "Loaded {} record(s) from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Overwrite the data file with a header and one row per record.
    pub fn save(&self, records: &[SleepRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(HEADER)?;
        for record in records {
            writer.write_record([
                format_date(record.date),
                record.weekday.clone(),
                format_bedtime(record.bedtime),
            ])?;
        }
        writer.flush()?;

        debug!(
            "Saved {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn parse_row(row: &csv::StringRecord, line: u64) -> Result<SleepRecord> {
    let malformed = |reason: String| SleepLogError::MalformedRecord { line, reason };

    if row.len() < HEADER.len() {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            row.len()
        )));
    }

    let date = chrono::NaiveDate::parse_from_str(&row[0], DATE_FORMAT)
        .map_err(|_| malformed(format!("invalid date '{}'", &row[0])))?;
    let bedtime = chrono::NaiveTime::parse_from_str(&row[2], BEDTIME_FORMAT)
        .map_err(|_| malformed(format!("invalid bedtime '{}'", &row[2])))?;

    Ok(SleepRecord {
        date,
        weekday: row[1].to_string(),
        bedtime,
    })
}
