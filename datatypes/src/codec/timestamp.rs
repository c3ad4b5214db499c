use crate::error;
use crate::primitives::TimeInstance;
use crate::util::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Converts timestamps to and from their textual representation.
///
/// The text codec delegates every timestamp it prints or parses to an
/// implementation of this trait.
pub trait TimestampFormat {
    fn format_timestamp(&self, t: TimeInstance) -> String;

    fn parse_timestamp(&self, text: &str) -> Result<TimeInstance>;
}

/// ISO 8601 style timestamps `YYYY-MM-DD HH:MM:SS[.ffffff]+HH[:MM]`, printed at a fixed UTC offset.
///
/// Parsing accepts a space or `T` between date and time, optional fractional
/// seconds, an optional offset (`Z`, `+HH`, `+HH:MM`, `+HHMM`) and plain dates.
/// Timestamps without an offset are read in the configured offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct IsoTimestampFormat {
    offset: FixedOffset,
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

impl IsoTimestampFormat {
    /// Prints timestamps at `offset_minutes` east of UTC.
    ///
    /// # Errors
    ///
    /// Fails if the offset is not within a day.
    ///
    pub fn with_offset_minutes(offset_minutes: i32) -> Result<Self> {
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| error::Error::InvalidArgument {
                details: format!("the UTC offset of {offset_minutes} minutes is out of range"),
            })?;
        Ok(Self { offset })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    fn format_offset(&self) -> String {
        let seconds = self.offset.local_minus_utc();
        let sign = if seconds < 0 { '-' } else { '+' };
        let minutes = seconds.unsigned_abs() / 60;
        let (hours, minutes) = (minutes / 60, minutes % 60);

        if minutes == 0 {
            format!("{sign}{hours:02}")
        } else {
            format!("{sign}{hours:02}:{minutes:02}")
        }
    }
}

fn parse_local(text: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

impl Default for IsoTimestampFormat {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl TryFrom<i32> for IsoTimestampFormat {
    type Error = error::Error;

    fn try_from(offset_minutes: i32) -> Result<Self> {
        Self::with_offset_minutes(offset_minutes)
    }
}

impl From<IsoTimestampFormat> for i32 {
    fn from(format: IsoTimestampFormat) -> Self {
        format.offset_minutes()
    }
}

impl TimestampFormat for IsoTimestampFormat {
    fn format_timestamp(&self, t: TimeInstance) -> String {
        let Some(date_time) = t.as_date_time() else {
            return t.inner().to_string();
        };
        let local = date_time.with_timezone(&self.offset);

        let mut text = local.format("%Y-%m-%d %H:%M:%S").to_string();
        let micros = local.nanosecond() / 1_000;
        if micros != 0 {
            let fraction = format!("{micros:06}");
            text.push('.');
            text.push_str(fraction.trim_end_matches('0'));
        }
        text.push_str(&self.format_offset());
        text
    }

    fn parse_timestamp(&self, text: &str) -> Result<TimeInstance> {
        let text = text.trim();

        if let Some(date_time) = OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(text, format).ok())
        {
            return TimeInstance::try_from(date_time.to_utc());
        }

        let local = parse_local(text).ok_or_else(|| error::Error::InvalidArgument {
            details: format!("\"{text}\" is not a valid timestamp"),
        })?;
        let date_time = self
            .offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| error::Error::InvalidArgument {
                details: format!("\"{text}\" is not representable at offset {}", self.offset),
            })?;
        TimeInstance::try_from(date_time.to_utc())
    }
}
