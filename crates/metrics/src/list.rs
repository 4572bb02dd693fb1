//! Pagination, ordering and local filtering of the designer list.
//!
//! Ordering by `sort_by` happens on the server and requires a re-fetch. The
//! local comparator and status predicate only reshape the page already held.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::designer::DesignerWithMetrics;

pub const DEFAULT_SORT_FIELD: &str = "username";

/// Page bound used when no page size is configured.
pub const LEGACY_PAGE_CEILING: u32 = 16;

const DESCENDING_MARKER: char = '-';

/// Whether a state change invalidates the page currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refetch {
    Required,
    NotRequired,
}

/// Server-side ordering, rendered as `field` or `-field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            descending: false,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "{DESCENDING_MARKER}{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let (field, descending) = match value.strip_prefix(DESCENDING_MARKER) {
            Some(rest) => (rest, true),
            None => (value, false),
        };
        if field.is_empty() {
            return Err(format!("invalid sort key: {value:?}"));
        }
        Ok(Self {
            field: field.to_string(),
            descending,
        })
    }
}

/// Local re-ordering of the fetched page by a derived metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalComparator {
    MostCompleted,
    LeastCompleted,
    MostInProgress,
    LeastInProgress,
}

impl LocalComparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MostCompleted => "totalTasksCompleted",
            Self::LeastCompleted => "-totalTasksCompleted",
            Self::MostInProgress => "inProgressTasks",
            Self::LeastInProgress => "-inProgressTasks",
        }
    }

    fn compare(&self, a: &DesignerWithMetrics, b: &DesignerWithMetrics) -> Ordering {
        match self {
            Self::MostCompleted => b.metrics.completed.cmp(&a.metrics.completed),
            Self::LeastCompleted => a.metrics.completed.cmp(&b.metrics.completed),
            Self::MostInProgress => b.metrics.in_progress.cmp(&a.metrics.in_progress),
            Self::LeastInProgress => a.metrics.in_progress.cmp(&b.metrics.in_progress),
        }
    }
}

impl FromStr for LocalComparator {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "totalTasksCompleted" => Ok(Self::MostCompleted),
            "-totalTasksCompleted" => Ok(Self::LeastCompleted),
            "inProgressTasks" => Ok(Self::MostInProgress),
            "-inProgressTasks" => Ok(Self::LeastInProgress),
            _ => Err(format!("unknown local comparator: {value}")),
        }
    }
}

/// Free/Busy classification of a designer by in-progress work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusPredicate {
    Free,
    Busy,
}

impl StatusPredicate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Busy => "Busy",
        }
    }

    pub fn matches(&self, designer: &DesignerWithMetrics) -> bool {
        match self {
            Self::Free => !designer.is_busy(),
            Self::Busy => designer.is_busy(),
        }
    }
}

impl FromStr for StatusPredicate {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Free" => Ok(Self::Free),
            "Busy" => Ok(Self::Busy),
            _ => Err(format!("unknown status predicate: {value}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignerListState {
    /// 1-indexed; never clamped here.
    pub page: u32,
    pub sort_by: SortKey,
    pub local_comparator: Option<LocalComparator>,
    pub status_predicate: Option<StatusPredicate>,
}

impl Default for DesignerListState {
    fn default() -> Self {
        Self {
            page: 1,
            sort_by: SortKey::default(),
            local_comparator: None,
            status_predicate: None,
        }
    }
}

impl DesignerListState {
    pub fn set_page(&mut self, page: u32) -> Refetch {
        self.page = page;
        Refetch::Required
    }

    /// Always asks for a re-fetch, even when the key is unchanged.
    pub fn set_sort_by(&mut self, sort_by: SortKey) -> Refetch {
        self.sort_by = sort_by;
        Refetch::Required
    }

    /// Apply a value from the single combined filter selector.
    ///
    /// Comparator values set the local comparator, `Free`/`Busy` set the
    /// status predicate, and the other field is cleared. `None`, empty, or
    /// unrecognised values clear both.
    pub fn set_status_filter(&mut self, value: Option<&str>) -> Refetch {
        let value = value.map(str::trim).unwrap_or_default();
        self.local_comparator = value.parse().ok();
        self.status_predicate = value.parse().ok();
        Refetch::NotRequired
    }

    pub fn set_local_comparator(&mut self, comparator: Option<LocalComparator>) -> Refetch {
        self.local_comparator = comparator;
        Refetch::NotRequired
    }

    pub fn set_status_predicate(&mut self, predicate: Option<StatusPredicate>) -> Refetch {
        self.status_predicate = predicate;
        Refetch::NotRequired
    }

    /// The fetched page after local ordering, then status filtering.
    pub fn visible_designers(&self, designers: &[DesignerWithMetrics]) -> Vec<DesignerWithMetrics> {
        let mut visible = designers.to_vec();
        if let Some(comparator) = self.local_comparator {
            visible.sort_by(|a, b| comparator.compare(a, b));
        }
        if let Some(predicate) = self.status_predicate {
            visible.retain(|d| predicate.matches(d));
        }
        visible
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_forward(&self, page_count: u32) -> bool {
        self.page < page_count
    }
}

/// Number of designer pages.
///
/// Derived from the server-reported `total` when a page size is known;
/// otherwise the legacy fixed ceiling. Never less than one.
pub fn page_count(total: Option<u64>, page_size: Option<u32>) -> u32 {
    match (total, page_size) {
        (Some(total), Some(size)) if size > 0 => {
            let pages = total.div_ceil(u64::from(size)).max(1);
            u32::try_from(pages).unwrap_or(u32::MAX)
        }
        _ => LEGACY_PAGE_CEILING,
    }
}
