use crate::models::{LogEntry, MonthlyCount, MonthlySummary};
use chrono::{Datelike, Local, Months, NaiveDate};
use std::collections::HashMap;

pub fn monthly_summary(logs: &[LogEntry], habit: &str) -> Option<MonthlySummary> {
    monthly_summary_at(Local::now().date_naive(), logs, habit)
}

/// Completion counts for `habit` over two months ago, last month and this
/// month, oldest first. `None` means the user has no logs at all, which is
/// not the same as three zero counts.
pub fn monthly_summary_at(today: NaiveDate, logs: &[LogEntry], habit: &str) -> Option<MonthlySummary> {
    if logs.is_empty() {
        return None;
    }

    let current_start = today.with_day(1)?;
    let window_start = current_start.checked_sub_months(Months::new(2))?;
    let window_end = current_start.checked_add_months(Months::new(1))?;
    let last_start = current_start.checked_sub_months(Months::new(1))?;

    let mut counts: HashMap<(i32, u32), u64> = HashMap::new();
    for log in logs
        .iter()
        .filter(|log| log.habit == habit)
        .filter(|log| log.date >= window_start && log.date < window_end)
    {
        *counts.entry(month_key(log.date)).or_default() += 1;
    }

    Some([window_start, last_start, current_start].map(|start| MonthlyCount {
        label: start.format("%b %Y").to_string(),
        month: start.format("%Y-%m").to_string(),
        count: counts.get(&month_key(start)).copied().unwrap_or(0),
    }))
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(habit: &str, date: NaiveDate) -> LogEntry {
        LogEntry {
            username: "ana".to_string(),
            habit: habit.to_string(),
            date,
        }
    }

    fn pairs(summary: &MonthlySummary) -> Vec<(&str, u64)> {
        summary.iter().map(|m| (m.label.as_str(), m.count)).collect()
    }

    #[test]
    fn counts_each_month_in_the_window() {
        let today = day(2025, 7, 15);
        let logs = vec![
            log("Read", day(2025, 5, 10)),
            log("Read", day(2025, 6, 1)),
            log("Read", day(2025, 6, 20)),
            log("Read", day(2025, 7, 1)),
            log("Read", day(2025, 7, 15)),
        ];

        let summary = monthly_summary_at(today, &logs, "Read").expect("summary");
        assert_eq!(pairs(&summary), vec![("May 2025", 1), ("Jun 2025", 2), ("Jul 2025", 2)]);
        assert_eq!(summary[0].month, "2025-05");
        assert_eq!(summary[2].month, "2025-07");
    }

    #[test]
    fn no_logs_means_no_data() {
        assert!(monthly_summary_at(day(2025, 7, 15), &[], "Read").is_none());
    }

    #[test]
    fn other_habits_only_gives_zero_counts() {
        let logs = vec![log("Exercise", day(2025, 7, 2)), log("Exercise", day(2025, 6, 2))];

        let summary = monthly_summary_at(day(2025, 7, 15), &logs, "Read").expect("summary");
        assert_eq!(pairs(&summary), vec![("May 2025", 0), ("Jun 2025", 0), ("Jul 2025", 0)]);
    }

    #[test]
    fn window_end_is_exclusive_and_start_inclusive() {
        let logs = vec![
            log("Read", day(2025, 4, 30)),
            log("Read", day(2025, 5, 1)),
            log("Read", day(2025, 7, 31)),
            log("Read", day(2025, 8, 1)),
        ];

        let summary = monthly_summary_at(day(2025, 7, 15), &logs, "Read").expect("summary");
        assert_eq!(pairs(&summary), vec![("May 2025", 1), ("Jun 2025", 0), ("Jul 2025", 1)]);
    }

    #[test]
    fn window_crosses_year_boundary() {
        let logs = vec![
            log("Read", day(2024, 11, 30)),
            log("Read", day(2024, 12, 24)),
            log("Read", day(2025, 1, 31)),
        ];

        let summary = monthly_summary_at(day(2025, 1, 31), &logs, "Read").expect("summary");
        assert_eq!(pairs(&summary), vec![("Nov 2024", 1), ("Dec 2024", 1), ("Jan 2025", 1)]);
    }

    #[test]
    fn duplicate_rows_each_count() {
        let logs = vec![log("Read", day(2025, 7, 3)), log("Read", day(2025, 7, 3))];

        let summary = monthly_summary_at(day(2025, 7, 15), &logs, "Read").expect("summary");
        assert_eq!(summary[2].count, 2);
    }

    #[test]
    fn always_three_months_oldest_first() {
        let logs = vec![log("Read", day(2025, 3, 3))];
        for month in 1..=12 {
            let today = day(2025, month, 28);
            let summary = monthly_summary_at(today, &logs, "Read").expect("summary");
            assert_eq!(summary.len(), 3);
            assert!(summary[0].month < summary[1].month);
            assert!(summary[1].month < summary[2].month);
            assert_eq!(summary[2].month, today.format("%Y-%m").to_string());
        }
    }
}
