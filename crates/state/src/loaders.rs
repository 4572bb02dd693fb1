//! Fetch-and-dispatch flows, one per view.
//!
//! Each loader takes a request generation from the store, fetches through a
//! [`ResourceSource`], and dispatches either the loaded data or the failure.
//! Failures are recorded on the view and also returned to the caller.

use atelier_client::ResourceSource;
use atelier_common::error::AtelierResult;
use atelier_common::AtelierError;
use atelier_metrics::enrich_comments;

use crate::store::{Action, Effect, Store, View};

/// Designers fetched for the top-designers ranking.
pub const TOP_DESIGNER_LIMIT: u32 = 10;
/// Latest comments shown in the activity feed.
pub const COMMENT_LIMIT: u32 = 10;

fn fail(store: &Store, view: View, generation: u64, err: AtelierError) -> AtelierError {
    tracing::error!(view = view.as_str(), generation, error = %err, "load failed");
    store.dispatch(Action::FetchFailed {
        view,
        generation,
        message: err.to_string(),
    });
    err
}

/// Fetch the designer page selected by the current list state.
pub async fn load_designers(store: &Store, source: &dyn ResourceSource) -> AtelierResult<()> {
    let list = store.snapshot().designers.list;
    let ordering = list.sort_by.to_string();
    let generation = store.begin_fetch(View::Designers);
    tracing::info!(page = list.page, ordering = %ordering, generation, "loading designers");

    match source.fetch_designers(list.page, &ordering).await {
        Ok(page) => {
            tracing::info!(count = page.results.len(), total = ?page.count, "designers loaded");
            store.dispatch(Action::DesignersLoaded { generation, page });
            Ok(())
        }
        Err(e) => Err(fail(store, View::Designers, generation, e.into())),
    }
}

pub async fn load_top_designers(
    store: &Store,
    source: &dyn ResourceSource,
    limit: u32,
) -> AtelierResult<()> {
    let generation = store.begin_fetch(View::TopDesigners);
    tracing::info!(limit, generation, "loading top designers");

    match source.fetch_top_designers(limit).await {
        Ok(designers) => {
            tracing::info!(count = designers.len(), "top designers loaded");
            store.dispatch(Action::TopDesignersLoaded {
                generation,
                designers,
            });
            Ok(())
        }
        Err(e) => Err(fail(store, View::TopDesigners, generation, e.into())),
    }
}

/// Projects first, then the newest comments, enriched with project names.
///
/// A project fetch failure fails the comments view; comments are not
/// requested in that case.
pub async fn load_comments(
    store: &Store,
    source: &dyn ResourceSource,
    limit: u32,
) -> AtelierResult<()> {
    let generation = store.begin_fetch(View::Comments);
    tracing::info!(limit, generation, "loading comments");

    let projects = match source.fetch_projects().await {
        Ok(projects) => projects,
        Err(e) => return Err(fail(store, View::Comments, generation, e.into())),
    };
    tracing::debug!(count = projects.len(), "projects loaded");

    match source.fetch_comments(limit).await {
        Ok(comments) => {
            let comments = enrich_comments(comments, &projects);
            tracing::info!(count = comments.len(), "comments loaded");
            store.dispatch(Action::CommentsLoaded {
                generation,
                comments,
                projects,
            });
            Ok(())
        }
        Err(e) => Err(fail(store, View::Comments, generation, e.into())),
    }
}

pub async fn load_tasks(store: &Store, source: &dyn ResourceSource) -> AtelierResult<()> {
    let generation = store.begin_fetch(View::Tasks);
    tracing::info!(generation, "loading tasks");

    match source.fetch_tasks().await {
        Ok(tasks) => {
            tracing::info!(count = tasks.len(), "tasks loaded");
            store.dispatch(Action::TasksLoaded { generation, tasks });
            Ok(())
        }
        Err(e) => Err(fail(store, View::Tasks, generation, e.into())),
    }
}

/// Reload one view with the default limits.
pub async fn load_view(
    store: &Store,
    source: &dyn ResourceSource,
    view: View,
) -> AtelierResult<()> {
    match view {
        View::Designers => load_designers(store, source).await,
        View::TopDesigners => load_top_designers(store, source, TOP_DESIGNER_LIMIT).await,
        View::Comments => load_comments(store, source, COMMENT_LIMIT).await,
        View::Tasks => load_tasks(store, source).await,
    }
}

/// Dispatch `action` and run the re-fetch it asks for, if any.
pub async fn dispatch_and_load(
    store: &Store,
    source: &dyn ResourceSource,
    action: Action,
) -> AtelierResult<Effect> {
    let effect = store.dispatch(action);
    if let Effect::Refetch(view) = effect {
        load_view(store, source, view).await?;
    }
    Ok(effect)
}

/// Load every view concurrently. One view failing leaves the others intact;
/// the number of failed views is returned.
pub async fn load_all(store: &Store, source: &dyn ResourceSource) -> usize {
    let (designers, top, comments, tasks) = tokio::join!(
        load_designers(store, source),
        load_top_designers(store, source, TOP_DESIGNER_LIMIT),
        load_comments(store, source, COMMENT_LIMIT),
        load_tasks(store, source),
    );

    let failed = [designers, top, comments, tasks]
        .iter()
        .filter(|r| r.is_err())
        .count();
    tracing::info!(failed, "dashboard load finished");
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadable::FetchStatus;
    use async_trait::async_trait;
    use atelier_client::ClientError;
    use atelier_common::{Comment, CommentAuthor, Designer, IssueStatus, Page, Project, Task};
    use atelier_metrics::SortKey;
    use chrono::{TimeZone, Utc};
    use reqwest::StatusCode;
    use std::sync::{Arc, Mutex};

    // ── Mock ResourceSource ─────────────────────────────────────

    #[derive(Default)]
    struct MockSource {
        fail_tasks: bool,
        fail_projects: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockSource {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn server_error() -> ClientError {
        ClientError::HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }
    }

    fn designer(id: i64) -> Designer {
        Designer {
            id,
            username: format!("designer{id}"),
            avatar: String::new(),
            email: format!("designer{id}@example.com"),
            issues: Vec::new(),
        }
    }

    fn comment(id: i64, issue: &str) -> Comment {
        Comment {
            id,
            issue: issue.to_string(),
            designer: CommentAuthor {
                avatar: String::new(),
                username: "anna".to_string(),
            },
            date_created: Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap(),
            message: "looks good".to_string(),
        }
    }

    fn task(id: i64) -> Task {
        let created = Utc.with_ymd_and_hms(2024, 3, 11, 10, 0, 0).unwrap();
        Task {
            id,
            status: IssueStatus::New,
            designer: None,
            project: "Web".to_string(),
            summary: "landing page".to_string(),
            date_created: created,
            date_updated: None,
            date_started_by_designer: None,
            date_finished_by_designer: None,
            date_finished: None,
            received_from_client: 100.0,
            send_to_project_manager: 10.0,
            send_to_account_manager: 20.0,
            send_to_designer: 30.0,
        }
    }

    #[async_trait]
    impl ResourceSource for MockSource {
        async fn fetch_designers(
            &self,
            page: u32,
            ordering: &str,
        ) -> Result<Page<Designer>, ClientError> {
            self.record(format!("designers page={page} ordering={ordering}"));
            Ok(Page {
                results: vec![designer(1), designer(2)],
                count: Some(2),
            })
        }

        async fn fetch_top_designers(&self, limit: u32) -> Result<Vec<Designer>, ClientError> {
            self.record(format!("top limit={limit}"));
            Ok(vec![designer(3)])
        }

        async fn fetch_tasks(&self) -> Result<Vec<Task>, ClientError> {
            self.record("tasks".to_string());
            if self.fail_tasks {
                return Err(server_error());
            }
            Ok(vec![task(1), task(2)])
        }

        async fn fetch_comments(&self, limit: u32) -> Result<Vec<Comment>, ClientError> {
            self.record(format!("comments limit={limit}"));
            Ok(vec![comment(1, "WEB-12"), comment(2, "ZZZ-1")])
        }

        async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError> {
            self.record("projects".to_string());
            if self.fail_projects {
                return Err(server_error());
            }
            Ok(vec![Project {
                id: 1,
                name: "Website".to_string(),
                key: "WEB".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn designers_use_list_state_for_query() {
        let store = Store::default();
        let source = MockSource::default();
        store.dispatch(Action::SetPage(3));
        store.dispatch(Action::SetSortBy("-email".parse::<SortKey>().unwrap()));

        load_designers(&store, &source).await.unwrap();

        assert_eq!(source.calls(), vec!["designers page=3 ordering=-email"]);
        let state = store.snapshot();
        assert_eq!(state.designers.page.status, FetchStatus::Succeeded);
        assert_eq!(state.designers.page.data.len(), 2);
    }

    #[tokio::test]
    async fn comments_are_enriched_after_projects() {
        let store = Store::default();
        let source = MockSource::default();

        load_comments(&store, &source, 10).await.unwrap();

        assert_eq!(source.calls(), vec!["projects", "comments limit=10"]);
        let state = store.snapshot();
        let issues: Vec<_> = state
            .comments
            .comments
            .data
            .iter()
            .map(|c| c.issue.as_str())
            .collect();
        assert_eq!(issues, vec!["Website", "ZZZ-1"]);
        assert_eq!(state.comments.projects.len(), 1);
    }

    #[tokio::test]
    async fn project_failure_fails_comments_without_fetching_them() {
        let store = Store::default();
        let source = MockSource {
            fail_projects: true,
            ..MockSource::default()
        };

        let err = load_comments(&store, &source, 10).await.unwrap_err();

        assert!(matches!(err, AtelierError::Network(_)));
        assert_eq!(source.calls(), vec!["projects"]);
        let state = store.snapshot();
        assert_eq!(state.comments.comments.status, FetchStatus::Failed);
        assert!(state
            .comments
            .comments
            .error
            .as_deref()
            .unwrap()
            .contains("500"));
    }

    #[tokio::test]
    async fn load_all_isolates_failures() {
        let store = Store::default();
        let source = MockSource {
            fail_tasks: true,
            ..MockSource::default()
        };

        let failed = load_all(&store, &source).await;

        assert_eq!(failed, 1);
        let state = store.snapshot();
        assert_eq!(state.tasks.tasks.status, FetchStatus::Failed);
        assert_eq!(state.designers.page.status, FetchStatus::Succeeded);
        assert_eq!(state.top_designers.designers.status, FetchStatus::Succeeded);
        assert_eq!(state.comments.comments.status, FetchStatus::Succeeded);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_retried() {
        let store = Store::default();
        let source = MockSource {
            fail_tasks: true,
            ..MockSource::default()
        };

        assert!(load_tasks(&store, &source).await.is_err());
        assert_eq!(source.calls(), vec!["tasks"]);
    }

    #[tokio::test]
    async fn sort_change_triggers_refetch_but_filter_does_not() {
        let store = Store::default();
        let source = MockSource::default();

        let effect = dispatch_and_load(
            &store,
            &source,
            Action::SetSortBy("-username".parse().unwrap()),
        )
        .await
        .unwrap();
        assert_eq!(effect, Effect::Refetch(View::Designers));
        assert_eq!(source.calls(), vec!["designers page=1 ordering=-username"]);

        let effect = dispatch_and_load(
            &store,
            &source,
            Action::SetStatusFilter(Some("Free".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(effect, Effect::None);
        assert_eq!(source.calls().len(), 1);
    }
}
