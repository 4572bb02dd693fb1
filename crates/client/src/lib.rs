pub mod client;
pub mod query;
pub mod source;

pub use client::{ClientError, ResourceClient};
pub use source::ResourceSource;
