//! Weekly revenue/expense buckets for the financial view.
//!
//! Weeks start on Monday 00:00 UTC and are labelled with their ISO week
//! number, so the same data yields the same buckets regardless of locale.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use atelier_common::Task;

/// Hours subtracted from "now" before taking the work-week number.
const WORK_WEEK_OFFSET_HOURS: i64 = 11;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub label: String,
    pub week_start: NaiveDate,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Sum revenue and expenses of `tasks` into `week_count` consecutive weeks
/// ending with the week of `now`.
///
/// Returns an empty vector when `week_count <= 0`.
pub fn aggregate_by_week(tasks: &[Task], week_count: i64, now: DateTime<Utc>) -> Vec<WeekBucket> {
    let Some(window_start) = window_start(week_count, now) else {
        return Vec::new();
    };

    let mut buckets = Vec::new();
    let mut week_start = window_start;
    for _ in 0..week_count {
        let Some(week_end) = week_start.checked_add_signed(Duration::weeks(1)) else {
            break;
        };

        let (revenue, expenses) = tasks
            .iter()
            .filter(|t| t.date_created >= week_start && t.date_created < week_end)
            .fold((0.0, 0.0), |(rev, exp), t| (rev + t.revenue(), exp + t.expenses()));

        let start_date = week_start.date_naive();
        buckets.push(WeekBucket {
            label: format!("Week {}", start_date.iso_week().week()),
            week_start: start_date,
            revenue,
            expenses,
            profit: revenue - expenses,
        });

        week_start = week_end;
    }

    buckets
}

/// Half-open `[start, end)` range covered by `week_count` weeks ending with the week of `now`.
pub fn window(week_count: i64, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = window_start(week_count, now)?;
    let end = start.checked_add_signed(Duration::try_weeks(week_count)?)?;
    Some((start, end))
}

fn window_start(week_count: i64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if week_count <= 0 {
        return None;
    }
    let back = Duration::try_weeks(week_count - 1)?;
    let anchor = now.checked_sub_signed(back)?;
    start_of_week(anchor)
}

/// Monday 00:00 UTC of the week containing `at`.
fn start_of_week(at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let date = at.date_naive();
    let offset = i64::from(date.weekday().num_days_from_monday());
    let monday = date.checked_sub_signed(Duration::days(offset))?;
    Some(monday.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Lenient parse of a user-entered week count. Anything non-numeric counts as zero weeks.
pub fn parse_week_count(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// ISO week number shown as the current work week. Shifted back 11 hours so that
/// early Monday still reports the previous week.
pub fn current_work_week(now: DateTime<Utc>) -> u32 {
    (now - Duration::hours(WORK_WEEK_OFFSET_HOURS))
        .iso_week()
        .week()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_common::IssueStatus;
    use chrono::TimeZone;

    /// Wednesday of ISO week 11.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 15, 0, 0).unwrap()
    }

    fn task(
        id: i64,
        created: DateTime<Utc>,
        received: f64,
        pm: f64,
        am: f64,
        designer: f64,
    ) -> Task {
        Task {
            id,
            status: IssueStatus::Done,
            designer: Some("mira".to_string()),
            project: "Website".to_string(),
            summary: String::new(),
            date_created: created,
            date_updated: None,
            date_started_by_designer: None,
            date_finished_by_designer: None,
            date_finished: None,
            received_from_client: received,
            send_to_project_manager: pm,
            send_to_account_manager: am,
            send_to_designer: designer,
        }
    }

    #[test]
    fn empty_tasks_give_zeroed_buckets() {
        let buckets = aggregate_by_week(&[], 4, now());
        assert_eq!(buckets.len(), 4);
        for bucket in &buckets {
            assert_eq!(bucket.revenue, 0.0);
            assert_eq!(bucket.expenses, 0.0);
            assert_eq!(bucket.profit, 0.0);
        }
    }

    #[test]
    fn buckets_are_consecutive_mondays_ending_with_current_week() {
        let buckets = aggregate_by_week(&[], 4, now());
        let starts: Vec<NaiveDate> = buckets.iter().map(|b| b.week_start).collect();
        assert_eq!(
            starts,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 19).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 26).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            ]
        );
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Week 8", "Week 9", "Week 10", "Week 11"]);
    }

    #[test]
    fn task_lands_only_in_its_bucket() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let tasks = vec![task(1, created, 100.0, 10.0, 20.0, 30.0)];
        let buckets = aggregate_by_week(&tasks, 4, now());

        assert_eq!(buckets[2].revenue, 100.0);
        assert_eq!(buckets[2].expenses, 60.0);
        assert_eq!(buckets[2].profit, 40.0);
        for (i, bucket) in buckets.iter().enumerate() {
            if i != 2 {
                assert_eq!(bucket.revenue, 0.0, "bucket {i}");
                assert_eq!(bucket.expenses, 0.0, "bucket {i}");
            }
        }
    }

    #[test]
    fn week_boundaries_are_half_open() {
        let monday = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
        let before_window = Utc.with_ymd_and_hms(2024, 2, 18, 23, 59, 59).unwrap();
        let tasks = vec![
            task(1, monday, 50.0, 0.0, 0.0, 0.0),
            task(2, before_window, 999.0, 0.0, 0.0, 0.0),
        ];
        let buckets = aggregate_by_week(&tasks, 4, now());
        assert_eq!(buckets[2].revenue, 0.0);
        assert_eq!(buckets[3].revenue, 50.0);
        let total: f64 = buckets.iter().map(|b| b.revenue).sum();
        assert_eq!(total, 50.0);
    }

    #[test]
    fn negative_profit_is_kept() {
        let created = Utc.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap();
        let buckets = aggregate_by_week(&[task(1, created, 10.0, 5.0, 5.0, 5.0)], 1, now());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].profit, -5.0);
    }

    #[test]
    fn non_positive_week_count_gives_no_buckets() {
        assert!(aggregate_by_week(&[], 0, now()).is_empty());
        assert!(aggregate_by_week(&[], -3, now()).is_empty());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let tasks = vec![task(1, created, 100.0, 10.0, 20.0, 30.0)];
        let first = aggregate_by_week(&tasks, 8, now());
        let second = aggregate_by_week(&tasks, 8, now());
        assert_eq!(first, second);
        assert_eq!(tasks[0].received_from_client, 100.0);
    }

    #[test]
    fn window_matches_buckets() {
        let (start, end) = window(4, now()).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 19, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap());
        assert!(window(0, now()).is_none());
    }

    #[test]
    fn parse_week_count_is_lenient() {
        assert_eq!(parse_week_count("8"), 8);
        assert_eq!(parse_week_count(" 12 "), 12);
        assert_eq!(parse_week_count("eight"), 0);
        assert_eq!(parse_week_count(""), 0);
        assert_eq!(parse_week_count("-2"), -2);
    }

    #[test]
    fn work_week_rolls_over_late_on_monday() {
        let early_monday = Utc.with_ymd_and_hms(2024, 3, 11, 8, 0, 0).unwrap();
        let late_monday = Utc.with_ymd_and_hms(2024, 3, 11, 12, 0, 0).unwrap();
        assert_eq!(current_work_week(early_monday), 10);
        assert_eq!(current_work_week(late_monday), 11);
    }
}
