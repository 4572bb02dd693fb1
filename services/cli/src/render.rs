use std::collections::BTreeMap;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use atelier_common::Comment;
use atelier_metrics::{DesignerWithMetrics, WeekBucket};
use atelier_state::{FetchStatus, Loadable, Preferences};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// One-line description of a view that did not load.
pub fn failure<T>(view: &str, slot: &Loadable<T>) -> Option<String> {
    match slot.status {
        FetchStatus::Failed => Some(format!(
            "{view}: {}",
            slot.error.as_deref().unwrap_or("request failed")
        )),
        _ => None,
    }
}

pub fn designers(rows: &[DesignerWithMetrics]) -> Table {
    let mut t = table(vec![
        "Username",
        "Email",
        "Completed",
        "In progress",
        "Median (h)",
        "Status",
    ]);
    for row in rows {
        t.add_row(vec![
            Cell::new(&row.designer.username),
            Cell::new(&row.designer.email),
            Cell::new(row.metrics.completed),
            Cell::new(row.metrics.in_progress),
            Cell::new(format!("{:.1}", row.metrics.median_hours)),
            Cell::new(if row.is_busy() { "Busy" } else { "Free" }),
        ]);
    }
    t
}

pub fn top_designers(rows: &[DesignerWithMetrics]) -> Table {
    let mut t = table(vec!["#", "Username", "Median (h)", "Completed"]);
    for (rank, row) in rows.iter().enumerate() {
        let median = if row.metrics.has_median() {
            format!("{:.1}", row.metrics.median_hours)
        } else {
            "-".to_string()
        };
        t.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&row.designer.username),
            Cell::new(median),
            Cell::new(row.metrics.completed),
        ]);
    }
    t
}

pub fn comments(rows: &[Comment]) -> Table {
    let mut t = table(vec!["Date", "Author", "Project", "Message"]);
    for row in rows {
        t.add_row(vec![
            Cell::new(row.date_created.format("%Y-%m-%d %H:%M")),
            Cell::new(&row.designer.username),
            Cell::new(&row.issue),
            Cell::new(&row.message),
        ]);
    }
    t
}

pub fn weekly(buckets: &[WeekBucket]) -> Table {
    let mut t = table(vec!["Week", "Starts", "Revenue", "Expenses", "Profit"]);
    for bucket in buckets {
        t.add_row(vec![
            Cell::new(&bucket.label),
            Cell::new(bucket.week_start),
            Cell::new(money(bucket.revenue)),
            Cell::new(money(bucket.expenses)),
            Cell::new(money(bucket.profit)),
        ]);
    }
    t
}

pub fn status_distribution(counts: &BTreeMap<String, usize>) -> Table {
    let mut t = table(vec!["Status", "Tasks"]);
    for (status, count) in counts {
        t.add_row(vec![Cell::new(status), Cell::new(count)]);
    }
    t
}

pub fn preferences(prefs: &Preferences) -> Table {
    let mut t = table(vec!["Preference", "Value"]);
    t.add_row(vec!["theme", prefs.theme.as_str()]);
    t.add_row(vec!["language", prefs.locale.as_str()]);
    t
}
