//! Time related utils.

use std::fmt;
use std::str::FromStr;

use chrono::TimeZone;
use chrono::Utc;

use crate::Error;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format time into ISO8601: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Build a datetime from unix seconds.
pub fn from_timestamp(secs: i64) -> crate::Result<DateTime> {
    Utc.timestamp_opt(secs, 0).single().ok_or_else(|| {
        Error::validation_failure("expires", format!("{secs} is not a valid unix timestamp"))
    })
}

/// Unit accepted by [`expires_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// One second.
    Second,
    /// Sixty seconds.
    Minute,
    /// 3600 seconds.
    Hour,
    /// 86400 seconds.
    Day,
}

impl TimeUnit {
    /// Length of this unit in seconds.
    pub fn as_secs(&self) -> i64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 60 * 60,
            TimeUnit::Day => 24 * 60 * 60,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" => Ok(TimeUnit::Second),
            "minute" | "minutes" => Ok(TimeUnit::Minute),
            "hour" | "hours" => Ok(TimeUnit::Hour),
            "day" | "days" => Ok(TimeUnit::Day),
            v => Err(Error::validation_failure(
                "unit",
                format!("unknown time unit: {v}"),
            )),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Second => write!(f, "second"),
            TimeUnit::Minute => write!(f, "minute"),
            TimeUnit::Hour => write!(f, "hour"),
            TimeUnit::Day => write!(f, "day"),
        }
    }
}

/// Unix seconds `amount` units after `now`.
///
/// Returns a validation failure on `expires` if the result doesn't fit in an `i64`.
pub fn expires_in_from(now: DateTime, amount: i64, unit: TimeUnit) -> crate::Result<i64> {
    amount
        .checked_mul(unit.as_secs())
        .and_then(|secs| now.timestamp().checked_add(secs))
        .ok_or_else(|| {
            Error::validation_failure("expires", format!("{amount} {unit}s is out of range"))
        })
}

/// Unix seconds `amount` units from now.
///
/// ```
/// use urlsign_core::time::{expires_in, TimeUnit};
///
/// let expires_at = expires_in(2, TimeUnit::Hour)?;
/// # Ok::<(), urlsign_core::Error>(())
/// ```
pub fn expires_in(amount: i64, unit: TimeUnit) -> crate::Result<i64> {
    expires_in_from(now(), amount, unit)
}
