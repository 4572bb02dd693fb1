//! Application state container.
//!
//! State changes only through [`reduce`]; the [`Store`] wraps it with request
//! generations and broadcasts every new snapshot to subscribers.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::watch;

use atelier_common::{Comment, Designer, Page, Project, Task};
use atelier_metrics::{
    rank_top_designers, with_metrics, DesignerListState, DesignerWithMetrics, LocalComparator,
    Refetch, SortKey, StatusPredicate, TopDesignerSort,
};

use crate::loadable::Loadable;
use crate::preferences::{Locale, Preferences, Theme};

/// Default number of weeks shown in the financial view.
pub const DEFAULT_WEEK_COUNT: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    Designers,
    TopDesigners,
    Comments,
    Tasks,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Designers => "designers",
            Self::TopDesigners => "top_designers",
            Self::Comments => "comments",
            Self::Tasks => "tasks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DesignersView {
    pub list: DesignerListState,
    pub page: Loadable<Vec<DesignerWithMetrics>>,
    /// Server-reported total across all pages.
    pub total: Option<u64>,
}

impl DesignersView {
    pub fn visible(&self) -> Vec<DesignerWithMetrics> {
        self.list.visible_designers(&self.page.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TopDesignersView {
    pub sort: TopDesignerSort,
    pub designers: Loadable<Vec<DesignerWithMetrics>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CommentsView {
    pub comments: Loadable<Vec<Comment>>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasksView {
    pub tasks: Loadable<Vec<Task>>,
    pub week_count: i64,
}

impl Default for TasksView {
    fn default() -> Self {
        Self {
            tasks: Loadable::default(),
            week_count: DEFAULT_WEEK_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AppState {
    pub designers: DesignersView,
    pub top_designers: TopDesignersView,
    pub comments: CommentsView,
    pub tasks: TasksView,
    pub preferences: Preferences,
}

#[derive(Debug, Clone)]
pub enum Action {
    FetchStarted {
        view: View,
        generation: u64,
    },
    FetchFailed {
        view: View,
        generation: u64,
        message: String,
    },
    DesignersLoaded {
        generation: u64,
        page: Page<Designer>,
    },
    TopDesignersLoaded {
        generation: u64,
        designers: Vec<Designer>,
    },
    /// Comments already enriched against `projects`.
    CommentsLoaded {
        generation: u64,
        comments: Vec<Comment>,
        projects: Vec<Project>,
    },
    TasksLoaded {
        generation: u64,
        tasks: Vec<Task>,
    },
    SetPage(u32),
    SetSortBy(SortKey),
    SetStatusFilter(Option<String>),
    SetLocalComparator(Option<LocalComparator>),
    SetStatusPredicate(Option<StatusPredicate>),
    SortTopDesigners(TopDesignerSort),
    SetWeekCount(i64),
    SetTheme(Theme),
    ToggleTheme,
    SetLocale(Locale),
}

/// Follow-up work requested by a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Refetch(View),
    PersistPreferences,
}

impl From<Refetch> for Effect {
    fn from(refetch: Refetch) -> Self {
        match refetch {
            Refetch::Required => Effect::Refetch(View::Designers),
            Refetch::NotRequired => Effect::None,
        }
    }
}

/// Apply one action to the state.
pub fn reduce(state: &mut AppState, action: Action) -> Effect {
    match action {
        Action::FetchStarted { view, generation } => {
            match view {
                View::Designers => state.designers.page.begin(generation),
                View::TopDesigners => state.top_designers.designers.begin(generation),
                View::Comments => state.comments.comments.begin(generation),
                View::Tasks => state.tasks.tasks.begin(generation),
            }
            Effect::None
        }
        Action::FetchFailed {
            view,
            generation,
            message,
        } => {
            let accepted = match view {
                View::Designers => state.designers.page.fail(generation, message),
                View::TopDesigners => state.top_designers.designers.fail(generation, message),
                View::Comments => state.comments.comments.fail(generation, message),
                View::Tasks => state.tasks.tasks.fail(generation, message),
            };
            log_stale(view, generation, accepted);
            Effect::None
        }
        Action::DesignersLoaded { generation, page } => {
            let view = &mut state.designers;
            let accepted = view.page.succeed(generation, with_metrics(page.results));
            if accepted {
                view.total = page.count;
            }
            log_stale(View::Designers, generation, accepted);
            Effect::None
        }
        Action::TopDesignersLoaded {
            generation,
            designers,
        } => {
            let mut ranked = with_metrics(designers);
            rank_top_designers(&mut ranked, state.top_designers.sort);
            let accepted = state.top_designers.designers.succeed(generation, ranked);
            log_stale(View::TopDesigners, generation, accepted);
            Effect::None
        }
        Action::CommentsLoaded {
            generation,
            comments,
            projects,
        } => {
            let accepted = state.comments.comments.succeed(generation, comments);
            if accepted {
                state.comments.projects = projects;
            }
            log_stale(View::Comments, generation, accepted);
            Effect::None
        }
        Action::TasksLoaded { generation, tasks } => {
            let accepted = state.tasks.tasks.succeed(generation, tasks);
            log_stale(View::Tasks, generation, accepted);
            Effect::None
        }
        Action::SetPage(page) => state.designers.list.set_page(page).into(),
        Action::SetSortBy(sort_by) => state.designers.list.set_sort_by(sort_by).into(),
        Action::SetStatusFilter(value) => state
            .designers
            .list
            .set_status_filter(value.as_deref())
            .into(),
        Action::SetLocalComparator(comparator) => state
            .designers
            .list
            .set_local_comparator(comparator)
            .into(),
        Action::SetStatusPredicate(predicate) => state
            .designers
            .list
            .set_status_predicate(predicate)
            .into(),
        Action::SortTopDesigners(sort) => {
            state.top_designers.sort = sort;
            rank_top_designers(&mut state.top_designers.designers.data, sort);
            Effect::None
        }
        Action::SetWeekCount(weeks) => {
            state.tasks.week_count = weeks;
            Effect::None
        }
        Action::SetTheme(theme) => {
            state.preferences.theme = theme;
            Effect::PersistPreferences
        }
        Action::ToggleTheme => {
            state.preferences.theme = state.preferences.theme.toggled();
            Effect::PersistPreferences
        }
        Action::SetLocale(locale) => {
            state.preferences.locale = locale;
            Effect::PersistPreferences
        }
    }
}

fn log_stale(view: View, generation: u64, accepted: bool) {
    if !accepted {
        tracing::debug!(view = view.as_str(), generation, "discarding stale response");
    }
}

struct Inner {
    state: AppState,
    next_generation: u64,
}

/// Shared owner of [`AppState`].
///
/// Cheap to share behind a reference across concurrently running loaders; the
/// lock is never held across an await point.
pub struct Store {
    inner: Mutex<Inner>,
    tx: watch::Sender<AppState>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (tx, _rx) = watch::channel(initial.clone());
        Self {
            inner: Mutex::new(Inner {
                state: initial,
                next_generation: 0,
            }),
            tx,
        }
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self::new(AppState {
            preferences,
            ..AppState::default()
        })
    }

    pub fn snapshot(&self) -> AppState {
        self.lock().state.clone()
    }

    /// Receive every state published after a dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }

    pub fn dispatch(&self, action: Action) -> Effect {
        let mut inner = self.lock();
        let effect = reduce(&mut inner.state, action);
        self.tx.send_replace(inner.state.clone());
        effect
    }

    /// Issue a new request generation for `view` and mark it loading.
    pub fn begin_fetch(&self, view: View) -> u64 {
        let mut inner = self.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;
        reduce(&mut inner.state, Action::FetchStarted { view, generation });
        self.tx.send_replace(inner.state.clone());
        generation
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
