//! Sleep log operations on top of the record store
//!
//! [`SleepLog`] holds the in-memory record set and is handed to every
//! command handler. Each mutation rewrites the data file and then reloads
//! it, so the in-memory view always matches what is on disk.

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::error::{Result, SleepLogError};
use crate::store::RecordStore;
use crate::SleepRecord;

/// Loaded sleep records plus the store they came from
#[derive(Debug)]
pub struct SleepLog {
    store: RecordStore,
    records: Vec<SleepRecord>,
}

impl SleepLog {
    /// Load every record from `store`.
    pub fn open(store: RecordStore) -> Result<Self> {
        let records = store.load()?;
        Ok(Self { store, records })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Records in storage order
    pub fn records(&self) -> &[SleepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record `bedtime` for `today`, replacing any record already stored for that date.
    pub fn add(&mut self, today: NaiveDate, bedtime: NaiveTime) -> Result<SleepRecord> {
        let record = SleepRecord::new(today, bedtime);
        let updated = replace_day(&self.records, record.clone());

        self.store.save(&updated)?;
        self.reload()?;

        info!("Recorded bedtime {} for {}", record.bedtime_string(), record.date_string());
        Ok(record)
    }

    /// Records stored for `date`
    pub fn matching(&self, date: NaiveDate) -> Vec<&SleepRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }

    /// Remove every record for `date`, returning how many were removed.
    ///
    /// Fails with [`SleepLogError::RecordNotFound`] without touching the file
    /// when nothing matches.
    pub fn delete(&mut self, date: NaiveDate) -> Result<usize> {
        let (remaining, removed) = remove_day(&self.records, date);
        if removed == 0 {
            return Err(SleepLogError::RecordNotFound(date));
        }

        self.store.save(&remaining)?;
        self.reload()?;

        info!("Deleted {} record(s) for {}", removed, date);
        Ok(removed)
    }

    /// Records newest first
    pub fn history(&self) -> Vec<&SleepRecord> {
        let mut sorted: Vec<&SleepRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Records oldest first
    pub fn chronological(&self) -> Vec<&SleepRecord> {
        let mut sorted: Vec<&SleepRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| r.date);
        sorted
    }

    fn reload(&mut self) -> Result<()> {
        self.records = self.store.load()?;
        Ok(())
    }
}

/// Drop any record sharing `record`'s date and append `record` at the end.
pub fn replace_day(records: &[SleepRecord], record: SleepRecord) -> Vec<SleepRecord> {
    let mut updated: Vec<SleepRecord> = records
        .iter()
        .filter(|r| r.date != record.date)
        .cloned()
        .collect();
    updated.push(record);
    updated
}

/// Records whose date differs from `date`, in their original order, and the
/// number of records dropped.
pub fn remove_day(records: &[SleepRecord], date: NaiveDate) -> (Vec<SleepRecord>, usize) {
    let remaining: Vec<SleepRecord> = records.iter().filter(|r| r.date != date).cloned().collect();
    let removed = records.len() - remaining.len();
    (remaining, removed)
}
