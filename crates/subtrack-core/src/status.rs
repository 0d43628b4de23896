//! Subscription status derivation.
//!
//! The renewal date is the single input. Status is recomputed on every read
//! and snapshotted on writes; the read-time value is the one callers see.

use chrono::NaiveDate;

use crate::models::SubscriptionStatus;

/// Format of `paid_date` and `renewal_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound (inclusive) of the `Expiring Soon` band, in days.
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Upper bound (inclusive) of the `Active` band, in days.
pub const ACTIVE_DAYS: i64 = 90;

/// Outcome of parsing a stored renewal date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewalDate {
    Parsed(NaiveDate),
    Invalid(String),
}

impl RenewalDate {
    /// Strict `YYYY-M-D` parse: four-digit year, one or two digit month and
    /// day, ASCII digits only. chrono alone tolerates whitespace and signs.
    pub fn parse(raw: &str) -> Self {
        if !has_date_shape(raw) {
            return RenewalDate::Invalid(raw.to_string());
        }
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => RenewalDate::Parsed(date),
            Err(_) => RenewalDate::Invalid(raw.to_string()),
        }
    }

    /// Whole days from `today` until renewal; negative once past.
    pub fn days_from(&self, today: NaiveDate) -> Option<i64> {
        match self {
            RenewalDate::Parsed(date) => Some((*date - today).num_days()),
            RenewalDate::Invalid(_) => None,
        }
    }
}

fn has_date_shape(raw: &str) -> bool {
    let mut fields = raw.split('-');
    let digits = |field: Option<&str>, len: std::ops::RangeInclusive<usize>| {
        field.is_some_and(|f| len.contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit()))
    };
    digits(fields.next(), 4..=4)
        && digits(fields.next(), 1..=2)
        && digits(fields.next(), 1..=2)
        && fields.next().is_none()
}

/// Status band for a renewal `days` away from today.
pub fn status_for_offset(days: i64) -> SubscriptionStatus {
    match days {
        d if d < 0 => SubscriptionStatus::Expired,
        0 => SubscriptionStatus::ExpiringToday,
        d if d <= EXPIRING_SOON_DAYS => SubscriptionStatus::ExpiringSoon,
        d if d <= ACTIVE_DAYS => SubscriptionStatus::Active,
        _ => SubscriptionStatus::Upcoming,
    }
}

/// Derive the status of a parsed renewal date.
///
/// An unparsable date yields `Active`, so a bad record stays visible
/// instead of failing the request.
pub fn calculate_status(renewal: &RenewalDate, today: NaiveDate) -> SubscriptionStatus {
    match renewal.days_from(today) {
        Some(days) => status_for_offset(days),
        None => SubscriptionStatus::Active,
    }
}

/// Parse and derive in one step.
pub fn status_for_renewal_date(raw: &str, today: NaiveDate) -> SubscriptionStatus {
    calculate_status(&RenewalDate::parse(raw), today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn status_at(offset: i64) -> SubscriptionStatus {
        let renewal = (today() + Duration::days(offset)).format(DATE_FORMAT).to_string();
        status_for_renewal_date(&renewal, today())
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(status_at(-1), SubscriptionStatus::Expired);
        assert_eq!(status_at(0), SubscriptionStatus::ExpiringToday);
        assert_eq!(status_at(1), SubscriptionStatus::ExpiringSoon);
        assert_eq!(status_at(30), SubscriptionStatus::ExpiringSoon);
        assert_eq!(status_at(31), SubscriptionStatus::Active);
        assert_eq!(status_at(90), SubscriptionStatus::Active);
        assert_eq!(status_at(91), SubscriptionStatus::Upcoming);
    }

    #[test]
    fn far_past_and_future() {
        assert_eq!(status_at(-3650), SubscriptionStatus::Expired);
        assert_eq!(status_at(3650), SubscriptionStatus::Upcoming);
    }

    #[test]
    fn malformed_dates_default_to_active() {
        for raw in [
            "garbage",
            "",
            "2025-13-01",
            "2025-02-30",
            "15/06/2025",
            "2025-06-15T00:00:00",
            " 2025-06-20",
            "\t2025-06-20",
            "+2025-06-20",
            "2025-06- 20",
            "2025-06-20 ",
            "02025-06-20",
            "2025-+6-20",
        ] {
            assert_eq!(
                status_for_renewal_date(raw, today()),
                SubscriptionStatus::Active,
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn parse_exposes_invalid_variant() {
        assert_eq!(
            RenewalDate::parse("nope"),
            RenewalDate::Invalid("nope".to_string())
        );
        assert_eq!(RenewalDate::parse("nope").days_from(today()), None);
        assert_eq!(RenewalDate::parse("2025-06-20").days_from(today()), Some(5));
    }

    #[test]
    fn single_digit_month_and_day_parse() {
        assert_eq!(
            RenewalDate::parse("2025-6-20"),
            RenewalDate::Parsed(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap())
        );
        assert_eq!(status_for_renewal_date("2025-7-1", today()), SubscriptionStatus::ExpiringSoon);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let renewal = RenewalDate::parse("2025-07-01");
        let first = calculate_status(&renewal, today());
        for _ in 0..10 {
            assert_eq!(calculate_status(&renewal, today()), first);
        }
    }

    #[test]
    fn leap_day_is_a_valid_date() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert_eq!(
            status_for_renewal_date("2024-02-29", today),
            SubscriptionStatus::ExpiringSoon
        );
    }
}
