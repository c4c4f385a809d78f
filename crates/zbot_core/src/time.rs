//! Community time conventions.
//!
//! Account creation dates are stored as POSIX timestamps in seconds (floating
//! point). Calendar computations such as anniversaries happen in the
//! community's fixed timezone.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Timezone in which community calendar dates are interpreted.
pub const COMMUNITY_TIMEZONE: Tz = chrono_tz::Europe::Paris;

/// Convert a datetime to the stored POSIX timestamp representation.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use zbot_core::to_timestamp;
///
/// let dt = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(to_timestamp(&dt), 1_577_836_800.0);
/// ```
pub fn to_timestamp<Z: TimeZone>(dt: &DateTime<Z>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_micros()) / 1_000_000.0
}

/// Convert a stored POSIX timestamp back to a UTC datetime.
///
/// Returns `None` for timestamps outside chrono's representable range.
pub fn from_timestamp(timestamp: f64) -> Option<DateTime<Utc>> {
    let secs = timestamp.floor();
    let micros = ((timestamp - secs) * 1_000_000.0).round() as i64;
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt + chrono::Duration::microseconds(micros))
}

/// Midnight at the start of `date` in the community timezone.
///
/// Falls back to the earliest valid instant of the day when midnight does not
/// exist locally.
pub fn local_midnight(date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    COMMUNITY_TIMEZONE
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            COMMUNITY_TIMEZONE
                .from_local_datetime(&(midnight + chrono::Duration::hours(1)))
                .earliest()
        })
}
