//! Bedtime trend series
//!
//! Turns records into plot points: x is the record date, y is the bedtime
//! placed on the Unix epoch date so that only the time-of-day varies.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::SleepRecord;

/// Date every bedtime is anchored to on the y axis
pub const EPOCH_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    Some(date) => date,
    None => panic!("invalid epoch date"),
};

/// One plotted night
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BedtimePoint {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_bedtime")]
    pub bedtime: NaiveTime,
    /// Bedtime on [`EPOCH_DATE`]
    pub plotted: NaiveDateTime,
}

impl BedtimePoint {
    /// Minutes since midnight on the y axis
    pub fn minutes(&self) -> u32 {
        self.bedtime.hour() * 60 + self.bedtime.minute()
    }
}

/// Ascending series plus the padded x range
#[derive(Debug, Clone, Serialize)]
pub struct BedtimeSeries {
    pub points: Vec<BedtimePoint>,
    /// Half a day before the first date
    pub x_start: NaiveDateTime,
    /// Half a day after the last date
    pub x_end: NaiveDateTime,
}

impl BedtimeSeries {
    /// Build the series; `None` when there is nothing to plot.
    pub fn from_records<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SleepRecord>,
    {
        let mut points: Vec<BedtimePoint> = records
            .into_iter()
            .map(|r| BedtimePoint {
                date: r.date,
                bedtime: r.bedtime,
                plotted: EPOCH_DATE.and_time(r.bedtime),
            })
            .collect();
        points.sort_by_key(|p| p.date);

        let first = points.first()?.date;
        let last = points.last()?.date;
        let half_day = Duration::hours(12);

        Some(Self {
            x_start: first.and_time(NaiveTime::MIN) - half_day,
            x_end: last.and_time(NaiveTime::MIN) + half_day,
            points,
        })
    }

    /// Earliest and latest bedtime in minutes since midnight
    pub fn minute_range(&self) -> (u32, u32) {
        let min = self.points.iter().map(|p| p.minutes()).min().unwrap_or(0);
        let max = self.points.iter().map(|p| p.minutes()).max().unwrap_or(0);
        (min, max)
    }

    /// Width of the x range in hours
    pub fn span_hours(&self) -> i64 {
        (self.x_end - self.x_start).num_hours()
    }

    /// Hours from the start of the x range to `date` at midnight
    pub fn offset_hours(&self, date: NaiveDate) -> i64 {
        (date.and_time(NaiveTime::MIN) - self.x_start).num_hours()
    }
}

fn serialize_bedtime<S>(bedtime: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&crate::types::format_bedtime(*bedtime))
}
