//! Convenience re-exports for common clause-builder usage

// Builder and its clause types
pub use crate::query_builder::{
    ClauseObservation, Dialect, JoinType, Keyword, QueryBuilder, RenderedQuery, SortOrder,
};

// Execution seam
pub use crate::executor::QueryExecutor;

// Error types
pub use crate::errors::QueryError;

// Validation
pub use crate::validation::{ValidatedTableName, ValidationError};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde_json::{json, Value};
