use serde::{Deserialize, Serialize};

use atelier_common::{DesignIssue, Designer, IssueStatus};

/// Per-designer figures derived from the embedded issue list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DesignerMetrics {
    pub completed: usize,
    pub in_progress: usize,
    /// Done issues carrying both timestamps; the size of the median set.
    pub timed_completed: usize,
    /// Median of `|finished − started|` over timed Done issues, in hours. 0 when there are none.
    pub median_hours: f64,
}

impl DesignerMetrics {
    /// Whether `median_hours` was computed from at least one timed issue.
    pub fn has_median(&self) -> bool {
        self.timed_completed > 0
    }
}

/// A fetched designer paired with metrics derived for that fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignerWithMetrics {
    #[serde(flatten)]
    pub designer: Designer,
    #[serde(flatten)]
    pub metrics: DesignerMetrics,
}

impl DesignerWithMetrics {
    pub fn is_busy(&self) -> bool {
        self.metrics.in_progress > 0
    }
}

/// Compute completion counts and median turnaround for one designer.
///
/// Done issues missing either timestamp are left out of the median set but
/// still count as completed.
pub fn derive_metrics(issues: &[DesignIssue]) -> DesignerMetrics {
    let completed = issues
        .iter()
        .filter(|i| i.status == IssueStatus::Done)
        .count();
    let in_progress = issues
        .iter()
        .filter(|i| i.status == IssueStatus::InProgress)
        .count();

    let mut durations: Vec<f64> = issues
        .iter()
        .filter(|i| i.status == IssueStatus::Done)
        .filter_map(completion_hours)
        .collect();
    durations.sort_by(f64::total_cmp);

    DesignerMetrics {
        completed,
        in_progress,
        timed_completed: durations.len(),
        median_hours: median(&durations),
    }
}

/// Attach freshly derived metrics to every designer of a fetched page.
pub fn with_metrics(designers: Vec<Designer>) -> Vec<DesignerWithMetrics> {
    designers
        .into_iter()
        .map(|designer| {
            let metrics = derive_metrics(&designer.issues);
            DesignerWithMetrics { designer, metrics }
        })
        .collect()
}

/// Absolute hours between start and finish, if both are present.
pub fn completion_hours(issue: &DesignIssue) -> Option<f64> {
    let started = issue.date_started_by_designer?;
    let finished = issue.date_finished_by_designer?;
    let millis = (finished - started).num_milliseconds();
    Some((millis as f64 / 3_600_000.0).abs())
}

/// Median of a sorted-ascending slice. Returns 0 for empty input.
fn median(sorted: &[f64]) -> f64 {
    let len = sorted.len();
    if len == 0 {
        return 0.0;
    }
    let mid = len / 2;
    if len % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
