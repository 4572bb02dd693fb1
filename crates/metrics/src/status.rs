use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use atelier_common::Task;

use crate::weekly;

/// Count tasks per status label.
pub fn count_by_status<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        *counts.entry(task.status.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Tasks created inside the window covered by `weekly::aggregate_by_week` for the same arguments.
pub fn tasks_in_window(tasks: &[Task], week_count: i64, now: DateTime<Utc>) -> Vec<&Task> {
    match weekly::window(week_count, now) {
        Some((start, end)) => tasks
            .iter()
            .filter(|t| t.date_created >= start && t.date_created < end)
            .collect(),
        None => Vec::new(),
    }
}
