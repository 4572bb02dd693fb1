use atelier_common::{Comment, Project};

/// Separator between the project key and the issue number in `WEB-12`.
const ISSUE_KEY_SEPARATOR: char = '-';

/// Replace each comment's raw issue key with the name of the project it belongs to.
///
/// The project key is the part of the issue key before the first `-`. The
/// first project with a matching key wins; unmatched comments keep the raw key.
pub fn enrich_comments(comments: Vec<Comment>, projects: &[Project]) -> Vec<Comment> {
    comments
        .into_iter()
        .map(|mut comment| {
            let prefix = project_key(&comment.issue);
            if let Some(project) = projects.iter().find(|p| p.key == prefix) {
                comment.issue = project.name.clone();
            }
            comment
        })
        .collect()
}

fn project_key(issue_key: &str) -> &str {
    issue_key
        .split_once(ISSUE_KEY_SEPARATOR)
        .map_or(issue_key, |(prefix, _)| prefix)
}
