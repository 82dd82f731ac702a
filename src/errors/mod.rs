//! Error types for the catalog API.

pub mod types;

pub use types::{ApiError, ApiResult, RepositoryError, RepositoryResult};
