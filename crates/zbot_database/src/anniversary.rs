//! Account anniversaries.
//!
//! Accounts are bucketed by the number of whole years between their creation
//! day and a reference date. Year `n` covers the local day, in the community
//! timezone, that falls `n` years before the reference date. Windows are
//! walked backwards from year 1 until they precede the oldest possible
//! account, so the number of queries is bounded by the account age range.
//!
//! Both window bounds are strict: an account created exactly at local
//! midnight falls in no bucket.

use crate::{AccountSummary, DatabaseResult};
use async_trait::async_trait;
use chrono::{DateTime, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use zbot_core::{COMMUNITY_TIMEZONE, local_midnight, to_timestamp};

/// Source of accounts by creation time.
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Accounts whose creation timestamp lies strictly between `lower` and
    /// `upper` (POSIX seconds).
    async fn accounts_created_between(
        &self,
        lower: f64,
        upper: f64,
    ) -> DatabaseResult<Vec<AccountSummary>>;
}

/// One local day, `years` years before the reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnniversaryWindow {
    /// Whole years elapsed since an account created in this window
    pub years: u32,
    /// Local midnight starting the day
    pub start: DateTime<Tz>,
    /// Local midnight starting the next day
    pub end: DateTime<Tz>,
}

/// Iterator over anniversary windows, most recent first.
#[derive(Debug, Clone)]
pub struct AnniversaryWindows {
    reference_date: NaiveDate,
    min_creation: DateTime<Utc>,
    years: u32,
    done: bool,
}

impl Iterator for AnniversaryWindows {
    type Item = AnniversaryWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let window = self.window(self.years);
        match window {
            Some(window) if window.start.with_timezone(&Utc) >= self.min_creation => {
                self.years += 1;
                Some(window)
            }
            _ => {
                self.done = true;
                None
            }
        }
    }
}

impl AnniversaryWindows {
    fn window(&self, years: u32) -> Option<AnniversaryWindow> {
        // Offset from the reference date, not chained from the previous window.
        // A Feb 29 reference clamps to Feb 28 in common years and returns to
        // Feb 29 in leap years, where stepping back one year at a time would
        // stay on Feb 28 forever.
        let day = self
            .reference_date
            .checked_sub_months(Months::new(years.checked_mul(12)?))?;
        Some(AnniversaryWindow {
            years,
            start: local_midnight(day)?,
            end: local_midnight(day.succ_opt()?)?,
        })
    }
}

/// Windows from year 1 back to the last one starting at or after `min_creation`.
///
/// The reference date is read as a calendar date in the community timezone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use zbot_database::anniversary_windows;
///
/// let reference = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
/// let oldest = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
/// let years: Vec<u32> = anniversary_windows(&reference, oldest).map(|w| w.years).collect();
/// assert_eq!(years, vec![1, 2, 3]);
/// ```
pub fn anniversary_windows<Z: TimeZone>(
    reference_date: &DateTime<Z>,
    min_creation: DateTime<Utc>,
) -> AnniversaryWindows {
    AnniversaryWindows {
        reference_date: reference_date.with_timezone(&COMMUNITY_TIMEZONE).date_naive(),
        min_creation,
        years: 1,
        done: false,
    }
}

/// Bucket account ids by years since creation.
///
/// Years without any account are absent from the returned map.
#[instrument(skip(source, reference_date))]
pub async fn account_anniversaries<S, Z>(
    source: &S,
    reference_date: &DateTime<Z>,
    min_account_creation_date: DateTime<Utc>,
) -> DatabaseResult<BTreeMap<u32, Vec<i64>>>
where
    S: AccountSource + ?Sized,
    Z: TimeZone,
{
    let windows: Vec<AnniversaryWindow> =
        anniversary_windows(reference_date, min_account_creation_date).collect();

    let mut account_anniversaries: BTreeMap<u32, Vec<i64>> = BTreeMap::new();
    let mut display_names = Vec::new();
    for window in windows {
        let accounts = source
            .accounts_created_between(to_timestamp(&window.start), to_timestamp(&window.end))
            .await?;
        for account in accounts {
            account_anniversaries
                .entry(window.years)
                .or_default()
                .push(account.id);
            display_names.push(account.display_name);
        }
    }
    debug!(
        "Found {} account anniversaries: {}",
        account_anniversaries.values().map(Vec::len).sum::<usize>(),
        display_names.join(", ")
    );
    Ok(account_anniversaries)
}
