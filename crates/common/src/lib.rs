pub mod error;
pub mod types;

pub use error::{AtelierError, AtelierResult};
pub use types::{Comment, CommentAuthor, DesignIssue, Designer, IssueStatus, Page, Project, Task};
