use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::designer::DesignerWithMetrics;

/// Ordering of the top-designers view. Applied locally; never re-fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TopDesignerSort {
    /// Fastest median turnaround first.
    #[default]
    MedianTime,
    /// Most completed issues first.
    TotalTasksCompleted,
}

impl TopDesignerSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MedianTime => "medianTime",
            Self::TotalTasksCompleted => "totalTasksCompleted",
        }
    }
}

impl FromStr for TopDesignerSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "medianTime" => Ok(Self::MedianTime),
            "totalTasksCompleted" => Ok(Self::TotalTasksCompleted),
            _ => Err(format!("unknown top designer sort: {value}")),
        }
    }
}

/// Stable in-place ranking.
///
/// By median time, designers without a single timed completed issue have no
/// median and go last.
pub fn rank_top_designers(designers: &mut [DesignerWithMetrics], sort: TopDesignerSort) {
    match sort {
        TopDesignerSort::MedianTime => designers.sort_by(compare_median),
        TopDesignerSort::TotalTasksCompleted => {
            designers.sort_by(|a, b| b.metrics.completed.cmp(&a.metrics.completed))
        }
    }
}

fn compare_median(a: &DesignerWithMetrics, b: &DesignerWithMetrics) -> Ordering {
    let key = |d: &DesignerWithMetrics| d.metrics.has_median().then_some(d.metrics.median_hours);
    match (key(a), key(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
