pub mod loadable;
pub mod loaders;
pub mod preferences;
pub mod store;

pub use loadable::{FetchStatus, Loadable};
pub use preferences::{Locale, PreferenceFile, Preferences, Theme};
pub use loaders::{dispatch_and_load, load_all, load_view};
pub use store::{reduce, Action, AppState, Effect, Store, View};
