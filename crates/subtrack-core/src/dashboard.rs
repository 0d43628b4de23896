//! Dashboard aggregation over renewal dates.
//!
//! Uses its own three-bucket, 30-day banding. It does not share the
//! five-band scheme in [`crate::status`]; the two are kept as they are.

use chrono::NaiveDate;

use crate::models::DashboardStats;
use crate::status::RenewalDate;

/// Horizon (inclusive) for `upcoming_renewals`, in days.
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Count renewal dates into dashboard buckets.
///
/// Unparsable dates count toward `total_subscriptions` only.
pub fn aggregate<'a, I>(renewal_dates: I, today: NaiveDate) -> DashboardStats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats = DashboardStats::default();

    for raw in renewal_dates {
        stats.total_subscriptions += 1;

        match RenewalDate::parse(raw).days_from(today) {
            Some(d) if d < 0 => stats.expired_subscriptions += 1,
            Some(0) => stats.renewals_due_today += 1,
            Some(d) if d <= UPCOMING_WINDOW_DAYS => stats.upcoming_renewals += 1,
            Some(_) => {}
            None => {}
        }
    }

    stats
}
