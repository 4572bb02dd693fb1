pub mod comments;
pub mod designer;
pub mod list;
pub mod ranking;
pub mod status;
pub mod weekly;

pub use comments::enrich_comments;
pub use designer::{derive_metrics, with_metrics, DesignerMetrics, DesignerWithMetrics};
pub use list::{page_count, DesignerListState, LocalComparator, Refetch, SortKey, StatusPredicate};
pub use ranking::{rank_top_designers, TopDesignerSort};
pub use status::{count_by_status, tasks_in_window};
pub use weekly::{aggregate_by_week, current_work_week, parse_week_count, WeekBucket};
