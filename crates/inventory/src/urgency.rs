use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Urgency bucket derived from days-to-expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Urgency {
    /// Expired, expiring today, or expiring tomorrow.
    Urgent,
    /// Exactly two days left.
    Soon,
    /// More than two days left.
    Ok,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Urgent => "URGENT",
            Urgency::Soon => "SOON",
            Urgency::Ok => "OK",
        }
    }

    /// Whether the item should be used up soon (anything but `Ok`).
    pub fn is_expiring(&self) -> bool {
        !matches!(self, Urgency::Ok)
    }
}

impl core::fmt::Display for Urgency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days from `today` until `expiry` (negative once expired).
///
/// Both values are calendar dates, so the difference is already an integer
/// and no rounding is involved.
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Classify an expiry date relative to `today`.
///
/// - `<= 1` day left: [`Urgency::Urgent`]
/// - exactly 2: [`Urgency::Soon`]
/// - more: [`Urgency::Ok`]
pub fn classify(expiry: NaiveDate, today: NaiveDate) -> Urgency {
    match days_until(expiry, today) {
        d if d <= 1 => Urgency::Urgent,
        2 => Urgency::Soon,
        _ => Urgency::Ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn plus(days: u64) -> NaiveDate {
        today().checked_add_days(Days::new(days)).unwrap()
    }

    fn minus(days: u64) -> NaiveDate {
        today().checked_sub_days(Days::new(days)).unwrap()
    }

    #[test]
    fn boundaries() {
        assert_eq!(classify(minus(5), today()), Urgency::Urgent);
        assert_eq!(classify(today(), today()), Urgency::Urgent);
        assert_eq!(classify(plus(1), today()), Urgency::Urgent);
        assert_eq!(classify(plus(2), today()), Urgency::Soon);
        assert_eq!(classify(plus(3), today()), Urgency::Ok);
        assert_eq!(classify(plus(365), today()), Urgency::Ok);
    }

    #[test]
    fn two_days_is_soon_across_month_end() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(days_until(expiry, today), 2);
        assert_eq!(classify(expiry, today), Urgency::Soon);
    }

    #[test]
    fn days_until_is_negative_when_expired() {
        assert_eq!(days_until(minus(3), today()), -3);
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Urgency::Soon).unwrap(), "\"SOON\"");
        assert_eq!(Urgency::Urgent.to_string(), "URGENT");
        assert!(Urgency::Soon.is_expiring());
        assert!(!Urgency::Ok.is_expiring());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: exactly two days left is always SOON.
            #[test]
            fn two_days_left_is_always_soon(start in -100_000i64..100_000) {
                let base = NaiveDate::from_num_days_from_ce_opt(730_000 + start as i32).unwrap();
                let expiry = base.checked_add_days(Days::new(2)).unwrap();
                prop_assert_eq!(classify(expiry, base), Urgency::Soon);
            }

            /// Property: anything up to tomorrow (including the past) is URGENT.
            #[test]
            fn up_to_tomorrow_is_urgent(offset in -3_650i64..=1) {
                let expiry = today() + chrono::Duration::days(offset);
                prop_assert_eq!(classify(expiry, today()), Urgency::Urgent);
            }

            /// Property: classification is monotone in days left.
            #[test]
            fn later_expiry_is_never_more_urgent(a in -50i64..50, b in -50i64..50) {
                let (early, late) = if a <= b { (a, b) } else { (b, a) };
                let e = classify(today() + chrono::Duration::days(early), today());
                let l = classify(today() + chrono::Duration::days(late), today());
                prop_assert!(e <= l);
            }
        }
    }
}
