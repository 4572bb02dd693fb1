use clap::{Parser, Subcommand};

use atelier_metrics::{SortKey, TopDesignerSort};
use atelier_state::{Locale, Theme};

#[derive(Parser, Debug)]
#[command(name = "atelier")]
#[command(about = "Designer performance, task revenue and activity dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One page of designers with derived metrics
    Designers {
        /// 1-indexed page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Server-side ordering, e.g. `username`, `-email`
        #[arg(short, long, default_value = "username", allow_hyphen_values = true)]
        sort: SortKey,

        /// Local filter: Free, Busy, totalTasksCompleted, -totalTasksCompleted,
        /// inProgressTasks or -inProgressTasks
        #[arg(short, long, allow_hyphen_values = true)]
        filter: Option<String>,
    },

    /// Designers ranked by turnaround or throughput
    Top {
        /// medianTime or totalTasksCompleted
        #[arg(short, long, default_value = "medianTime")]
        sort: TopDesignerSort,

        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Latest comments with project names resolved
    Comments {
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Weekly revenue, expenses and profit plus status distribution
    Tasks {
        /// Number of weeks; non-numeric input yields an empty report
        #[arg(short, long, default_value = "8")]
        weeks: String,
    },

    /// Every view loaded concurrently
    Overview {
        #[arg(short, long, default_value = "8")]
        weeks: String,
    },

    /// Show or change persisted preferences
    Prefs {
        #[arg(long, conflicts_with = "toggle_theme")]
        theme: Option<Theme>,

        #[arg(long)]
        toggle_theme: bool,

        #[arg(long)]
        locale: Option<Locale>,
    },
}
