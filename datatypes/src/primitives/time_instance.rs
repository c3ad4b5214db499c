use crate::error;
use crate::util::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::ops::Sub;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// A point in time in microseconds since the Unix epoch (UTC).
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(C)]
pub struct TimeInstance(i64);

impl TimeInstance {
    /// `-4713-11-24T00:00:00Z`
    pub const MIN: Self = Self(-210_866_889_600_000_000);
    /// `+262142-12-31T23:59:59.999999Z`
    pub const MAX: Self = Self(8_210_266_876_799_999_999);

    /// Creates a time instance from microseconds since the Unix epoch.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::TimeInstance;
    ///
    /// assert_eq!(TimeInstance::from_micros(42).unwrap().inner(), 42);
    /// TimeInstance::from_micros(i64::MAX).unwrap_err();
    /// ```
    pub fn from_micros(micros: i64) -> Result<Self> {
        ensure!(
            micros >= Self::MIN.0 && micros <= Self::MAX.0,
            error::TimeInstanceOutOfBounds {
                min: Self::MIN,
                max: Self::MAX,
                is: micros,
            }
        );
        Ok(Self(micros))
    }

    pub const fn from_micros_unchecked(micros: i64) -> Self {
        Self(micros)
    }

    pub fn inner(self) -> i64 {
        self.0
    }

    pub fn as_date_time(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.0)
    }

    /// Moves the instance by `delta`, failing if the result leaves the supported range.
    pub fn checked_shift(self, delta: chrono::Duration) -> Result<Self> {
        let micros = delta.num_microseconds().ok_or_else(|| error::Error::InvalidArgument {
            details: format!("duration {delta} exceeds the microsecond range"),
        })?;
        let shifted = self.0.checked_add(micros).ok_or_else(|| error::Error::InvalidArgument {
            details: format!("shifting {} by {delta} overflows", self.0),
        })?;
        Self::from_micros(shifted)
    }
}

/// Signed elapsed seconds from `t1` to `t2`.
///
/// # Examples
///
/// ```
/// use chronobox_datatypes::primitives::{TimeInstance, time_diff_seconds};
///
/// let t1 = TimeInstance::from_micros(0).unwrap();
/// let t2 = TimeInstance::from_micros(1_500_000).unwrap();
///
/// assert_eq!(time_diff_seconds(t1, t2), 1.5);
/// assert_eq!(time_diff_seconds(t2, t1), -1.5);
/// ```
pub fn time_diff_seconds(t1: TimeInstance, t2: TimeInstance) -> f64 {
    (t2.0 - t1.0) as f64 / MICROS_PER_SECOND
}

impl Sub for TimeInstance {
    type Output = chrono::Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        chrono::Duration::microseconds(self.0 - rhs.0)
    }
}

impl TryFrom<i64> for TimeInstance {
    type Error = error::Error;

    fn try_from(micros: i64) -> Result<Self> {
        Self::from_micros(micros)
    }
}

impl From<TimeInstance> for i64 {
    fn from(time_instance: TimeInstance) -> Self {
        time_instance.0
    }
}

impl TryFrom<DateTime<Utc>> for TimeInstance {
    type Error = error::Error;

    fn try_from(date_time: DateTime<Utc>) -> Result<Self> {
        Self::from_micros(date_time.timestamp_micros())
    }
}
