//! Error types for the SleepLog system

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for SleepLog operations
#[derive(Error, Debug)]
pub enum SleepLogError {
    /// A stored row could not be parsed
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// Date input not in `YYYY-MM-DD` form
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Bedtime input not in `HH:MM` form
    #[error("Invalid bedtime '{0}' (expected HH:MM)")]
    InvalidBedtime(String),

    /// No record stored for the requested date
    #[error("No record found for {0}")]
    RecordNotFound(NaiveDate),

    /// CSV reader/writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SleepLog operations
pub type Result<T> = std::result::Result<T, SleepLogError>;

impl From<csv::Error> for SleepLogError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return SleepLogError::Csv(err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => SleepLogError::Io(io),
            other => SleepLogError::Csv(format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SleepLogError = io_err.into();

        match err {
            SleepLogError::Io(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_csv_io_error_unwraps_to_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SleepLogError = csv::Error::from(io_err).into();
        assert!(matches!(err, SleepLogError::Io(_)));
    }

    #[test]
    fn test_error_display() {
        let err = SleepLogError::MalformedRecord {
            line: 3,
            reason: "bad time".to_string(),
        };
        assert_eq!(format!("{}", err), "Malformed record on line 3: bad time");

        let err = SleepLogError::InvalidBedtime("25:99".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid bedtime '25:99' (expected HH:MM)"
        );

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = SleepLogError::RecordNotFound(date);
        assert_eq!(format!("{}", err), "No record found for 2024-01-01");
    }
}
