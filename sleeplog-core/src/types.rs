//! Core types and data structures for SleepLog

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SleepLogError};

/// Format used for dates in the data file and on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for bedtimes in the data file and on the command line
pub const BEDTIME_FORMAT: &str = "%H:%M";

/// One night of sleep: the calendar date it was logged for and the bedtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepRecord {
    /// Calendar date, no time component
    pub date: NaiveDate,
    /// Weekday name captured at write time
    pub weekday: String,
    /// Time-of-day the user went to sleep
    #[serde(with = "bedtime_serde")]
    pub bedtime: NaiveTime,
}

impl SleepRecord {
    /// Create a record, deriving the weekday label from `date`.
    pub fn new(date: NaiveDate, bedtime: NaiveTime) -> Self {
        Self {
            date,
            weekday: weekday_label(date),
            bedtime,
        }
    }

    /// Date rendered as `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }

    /// Bedtime rendered as `HH:MM`
    pub fn bedtime_string(&self) -> String {
        format_bedtime(self.bedtime)
    }
}

/// English weekday name for a date, e.g. `Monday`.
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date. Surrounding whitespace is ignored.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| SleepLogError::InvalidDate(trimmed.to_string()))
}

/// Parse an `HH:MM` bedtime. Surrounding whitespace is ignored.
pub fn parse_bedtime(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, BEDTIME_FORMAT)
        .map_err(|_| SleepLogError::InvalidBedtime(trimmed.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_bedtime(bedtime: NaiveTime) -> String {
    bedtime.format(BEDTIME_FORMAT).to_string()
}

// Bedtimes are minute precision, so JSON uses HH:MM rather than chrono's HH:MM:SS.
mod bedtime_serde {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bedtime: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_bedtime(*bedtime))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let raw = String::deserialize(deserializer)?;
        super::parse_bedtime(&raw).map_err(|e| D::Error::custom(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_label() {
        assert_eq!(weekday_label(date(2024, 1, 1)), "Monday");
        assert_eq!(weekday_label(date(2024, 1, 7)), "Sunday");
    }

    #[test]
    fn test_new_record_derives_weekday() {
        let record = SleepRecord::new(date(2024, 2, 29), parse_bedtime("23:15").unwrap());
        assert_eq!(record.weekday, "Thursday");
        assert_eq!(record.date_string(), "2024-02-29");
        assert_eq!(record.bedtime_string(), "23:15");
    }

    #[test]
    fn test_parse_bedtime() {
        assert_eq!(
            parse_bedtime(" 23:45 ").unwrap(),
            NaiveTime::from_hms_opt(23, 45, 0).unwrap()
        );
        assert_eq!(
            parse_bedtime("0:05").unwrap(),
            NaiveTime::from_hms_opt(0, 5, 0).unwrap()
        );

        assert!(parse_bedtime("24:00").is_err());
        assert!(parse_bedtime("23:60").is_err());
        assert!(parse_bedtime("late").is_err());
        assert!(parse_bedtime("").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-02").unwrap(), date(2024, 1, 2));

        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("01/02/2024").is_err());

        match parse_date("yesterday") {
            Err(SleepLogError::InvalidDate(raw)) => assert_eq!(raw, "yesterday"),
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_record_json_shape() {
        let record = SleepRecord::new(date(2024, 1, 1), parse_bedtime("23:15").unwrap());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["weekday"], "Monday");
        assert_eq!(json["bedtime"], "23:15");

        let parsed: SleepRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
