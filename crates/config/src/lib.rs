pub mod env;
pub mod tracing_init;

pub use env::{ApiConfig, AppConfig};
pub use tracing_init::init_tracing;
