use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Data for one view plus the status of the fetch that produced it.
///
/// Completions are accepted only for the most recently started request, so a
/// slow response to a superseded request cannot overwrite newer data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Loadable<T> {
    pub data: T,
    pub status: FetchStatus,
    pub error: Option<String>,
    #[serde(skip)]
    latest_generation: u64,
}

impl<T> Loadable<T> {
    /// Mark a new request as in flight. Previous data stays until it completes.
    pub fn begin(&mut self, generation: u64) {
        self.latest_generation = generation;
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    /// Returns `false` and leaves the slot untouched when `generation` is stale.
    pub fn succeed(&mut self, generation: u64, data: T) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.data = data;
        self.status = FetchStatus::Succeeded;
        self.error = None;
        true
    }

    /// Returns `false` and leaves the slot untouched when `generation` is stale.
    pub fn fail(&mut self, generation: u64, message: String) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.status = FetchStatus::Failed;
        self.error = Some(message);
        true
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest_generation
    }
}
