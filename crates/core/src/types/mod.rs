//! Shared type definitions.

mod app;
mod id;
mod resolution;

pub use app::{AppSummary, ProductId, SearchCandidate};
pub use id::AppId;
pub use resolution::Resolution;
