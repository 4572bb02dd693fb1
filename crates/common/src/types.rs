use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status shared by design issues and tasks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueStatus {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "New" => Ok(Self::New),
            "In Progress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            _ => Err(format!("unknown issue status: {value}")),
        }
    }
}

/// An issue as embedded in a designer record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignIssue {
    pub id: i64,
    pub key: String,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub date_started_by_designer: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_finished_by_designer: Option<DateTime<Utc>>,
    pub status: IssueStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Designer {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub issues: Vec<DesignIssue>,
}

/// The richer issue variant served by the issue endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub status: IssueStatus,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub summary: String,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub date_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_started_by_designer: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_finished_by_designer: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_finished: Option<DateTime<Utc>>,
    #[serde(default)]
    pub received_from_client: f64,
    #[serde(default)]
    pub send_to_project_manager: f64,
    #[serde(default)]
    pub send_to_account_manager: f64,
    #[serde(default)]
    pub send_to_designer: f64,
}

impl Task {
    pub fn revenue(&self) -> f64 {
        self.received_from_client
    }

    pub fn expenses(&self) -> f64 {
        self.send_to_project_manager + self.send_to_account_manager + self.send_to_designer
    }

    pub fn profit(&self) -> f64 {
        self.revenue() - self.expenses()
    }
}

/// Designer snapshot embedded in a comment at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentAuthor {
    #[serde(default)]
    pub avatar: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    /// Composite issue key such as `DSGN-42`; rewritten to a project name by enrichment.
    pub issue: String,
    pub designer: CommentAuthor,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub key: String,
}

/// Paginated list envelope. `count` is absent on limit-only queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            count: None,
        }
    }
}
