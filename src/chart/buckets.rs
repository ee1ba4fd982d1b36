use std::fmt::Display;

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};

use crate::tracker::task::Snapshot;

/// Age brackets of a task's history, in the order they are stacked (farthest past first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    NineMonthsPlus,
    SixToNineMonths,
    ThreeToSixMonths,
    LastThreeMonths,
}

impl AgeBucket {
    pub const STACK_ORDER: [AgeBucket; 4] = [
        AgeBucket::NineMonthsPlus,
        AgeBucket::SixToNineMonths,
        AgeBucket::ThreeToSixMonths,
        AgeBucket::LastThreeMonths,
    ];

    /// Months are approximated as 30 days.
    fn contains(&self, moment: NaiveDateTime, now: NaiveDateTime) -> bool {
        let t3 = now - Duration::days(90);
        let t6 = now - Duration::days(180);
        let t9 = now - Duration::days(270);
        match self {
            AgeBucket::LastThreeMonths => t3 <= moment && moment <= now,
            AgeBucket::ThreeToSixMonths => t6 <= moment && moment < t3,
            AgeBucket::SixToNineMonths => t9 <= moment && moment < t6,
            AgeBucket::NineMonthsPlus => moment < t9,
        }
    }
}

impl Display for AgeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgeBucket::NineMonthsPlus => write!(f, "9+ months"),
            AgeBucket::SixToNineMonths => write!(f, "6-9 months"),
            AgeBucket::ThreeToSixMonths => write!(f, "3-6 months"),
            AgeBucket::LastThreeMonths => write!(f, "0-3 months"),
        }
    }
}

/// Totals of a task as seen in each age bracket. Values are raw totals, not deltas, so they don't
/// have to add up to the current currency of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buckets {
    pub last_three_months: u64,
    pub three_to_six_months: u64,
    pub six_to_nine_months: u64,
    pub nine_months_plus: u64,
}

impl Buckets {
    pub fn get(&self, bucket: AgeBucket) -> u64 {
        match bucket {
            AgeBucket::LastThreeMonths => self.last_three_months,
            AgeBucket::ThreeToSixMonths => self.three_to_six_months,
            AgeBucket::SixToNineMonths => self.six_to_nine_months,
            AgeBucket::NineMonthsPlus => self.nine_months_plus,
        }
    }

    fn set(&mut self, bucket: AgeBucket, value: u64) {
        match bucket {
            AgeBucket::LastThreeMonths => self.last_three_months = value,
            AgeBucket::ThreeToSixMonths => self.three_to_six_months = value,
            AgeBucket::SixToNineMonths => self.six_to_nine_months = value,
            AgeBucket::NineMonthsPlus => self.nine_months_plus = value,
        }
    }

    /// Values in stacking order.
    pub fn stacked(&self) -> impl Iterator<Item = (AgeBucket, u64)> + '_ {
        AgeBucket::STACK_ORDER
            .into_iter()
            .map(move |v| (v, self.get(v)))
    }
}

/// Every bracket takes the total of the newest snapshot that falls into it, or 0 if there is none.
/// History may come in any order. Fails on the first malformed timestamp.
pub fn bucket_history(history: &[Snapshot], now: NaiveDateTime) -> Result<Buckets> {
    let mut moments = history
        .iter()
        .map(|v| Ok((v.moment()?, v.total_currency)))
        .collect::<Result<Vec<_>>>()?;
    moments.sort_by(|a, b| b.0.cmp(&a.0));

    let mut buckets = Buckets::default();
    for bucket in AgeBucket::STACK_ORDER {
        if let Some((_, total)) = moments.iter().find(|(moment, _)| bucket.contains(*moment, now)) {
            buckets.set(bucket, *total);
        }
    }
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

    use super::{bucket_history, AgeBucket, Buckets};
    use crate::tracker::task::Snapshot;

    const NOW: NaiveDateTime = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    );

    fn days_ago(total: u64, days: i64) -> Snapshot {
        Snapshot::new(total, NOW - Duration::days(days))
    }

    #[test]
    fn empty_history_is_zero() {
        assert_eq!(bucket_history(&[], NOW).unwrap(), Buckets::default());
    }

    #[test]
    fn single_snapshot_now() {
        let buckets = bucket_history(&[Snapshot::new(7, NOW)], NOW).unwrap();
        assert_eq!(
            buckets,
            Buckets {
                last_three_months: 7,
                ..Default::default()
            }
        );
    }

    #[test]
    fn old_history_only_fills_last_bracket() {
        let history = [days_ago(12, 300), days_ago(8, 400), days_ago(3, 500)];
        let buckets = bucket_history(&history, NOW).unwrap();

        assert_eq!(buckets.last_three_months, 0);
        assert_eq!(buckets.three_to_six_months, 0);
        assert_eq!(buckets.six_to_nine_months, 0);
        assert_eq!(buckets.nine_months_plus, 12);
    }

    #[test]
    fn newest_snapshot_in_each_bracket_wins() {
        let history = [
            days_ago(20, 1),
            days_ago(18, 60),
            days_ago(15, 100),
            days_ago(11, 170),
            days_ago(9, 200),
            days_ago(4, 280),
            days_ago(1, 365),
        ];
        let buckets = bucket_history(&history, NOW).unwrap();

        assert_eq!(
            buckets,
            Buckets {
                last_three_months: 20,
                three_to_six_months: 15,
                six_to_nine_months: 9,
                nine_months_plus: 4,
            }
        );
    }

    #[test]
    fn history_order_does_not_matter() {
        let mut history = vec![days_ago(20, 1), days_ago(15, 100), days_ago(4, 280)];
        let expected = bucket_history(&history, NOW).unwrap();
        history.reverse();
        assert_eq!(bucket_history(&history, NOW).unwrap(), expected);
    }

    #[test]
    fn boundaries() {
        // Exactly 90 days old still counts as recent, exactly 270 days old is 6-9 months.
        let history = [days_ago(5, 90), days_ago(2, 270)];
        let buckets = bucket_history(&history, NOW).unwrap();
        assert_eq!(buckets.last_three_months, 5);
        assert_eq!(buckets.six_to_nine_months, 2);
        assert_eq!(buckets.nine_months_plus, 0);
    }

    #[test]
    fn future_snapshots_are_ignored() {
        let history = [Snapshot::new(9, NOW + Duration::days(1))];
        assert_eq!(bucket_history(&history, NOW).unwrap(), Buckets::default());
    }

    #[test]
    fn malformed_timestamp_fails() {
        let history = [
            days_ago(3, 1),
            Snapshot {
                total_currency: 1,
                timestamp: "not a date".into(),
            },
        ];
        assert!(bucket_history(&history, NOW).is_err());
    }

    #[test]
    fn stacked_order_is_farthest_first() {
        let buckets = Buckets {
            last_three_months: 1,
            three_to_six_months: 2,
            six_to_nine_months: 3,
            nine_months_plus: 4,
        };
        let stacked = buckets.stacked().collect::<Vec<_>>();
        assert_eq!(
            stacked,
            vec![
                (AgeBucket::NineMonthsPlus, 4),
                (AgeBucket::SixToNineMonths, 3),
                (AgeBucket::ThreeToSixMonths, 2),
                (AgeBucket::LastThreeMonths, 1),
            ]
        );
    }
}
