//! Clause Builder - core query construction for chainsql
//!
//! This crate turns a chain of clause calls into a parameterized SQL string
//! for `?` (MySQL) or `$N` (PostgreSQL) placeholders, plus the argument list
//! that goes with it. It has no database driver of its own: running a query
//! goes through the [`QueryExecutor`] trait.

pub mod errors;
pub mod executor;
pub mod prelude;
pub mod query_builder;
pub mod validation;

pub use errors::{ExecutionError, QueryError};
pub use executor::QueryExecutor;
pub use query_builder::{
    ClauseObservation, Dialect, Fragment, JoinType, Keyword, QueryBuilder, RenderedQuery,
    SortOrder,
};
pub use validation::{ValidatedTableName, ValidationError};
