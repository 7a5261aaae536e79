//! # chainsql
//!
//! A fluent query builder that renders parameterized SQL for MySQL (`?`)
//! and PostgreSQL (`$1`, `$2`, ...) and runs it through sqlx.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chainsql::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         Driver::Postgres,
//!         "localhost".to_string(), 5432, "shop".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         5, 30,
//!     );
//!
//!     let db = ChainSql::connect_postgres(&config).await?;
//!
//!     let rows = db
//!         .table("orders")?
//!         .select(["id", "total"])
//!         .where_eq("status", "paid")
//!         .order_by("id", "desc")
//!         .rows_query()
//!         .await?;
//!
//!     println!("Fetched {} orders", rows.len());
//!     Ok(())
//! }
//! ```
//!
//! Builders render without a database too:
//!
//! ```rust
//! use chainsql::QueryBuilder;
//!
//! let mut query = QueryBuilder::mysql("users")
//!     .select(["id", "name"])
//!     .where_eq("id", 1);
//! assert_eq!(query.to_query_string().unwrap(), " SELECT id,name FROM users WHERE id=?");
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod executor;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::{ChainSql, dialect_for};
pub use errors::ChainSqlError;
pub use executor::{MySqlExecutor, PgExecutor, StringBinding};

// Re-export centralized config
pub use config::{AppConfig, BuilderConfig, DatabaseConfig, Driver};

// Re-export the core builder crate
pub use clause_builder;
pub use clause_builder::{Dialect, JoinType, QueryBuilder, QueryError, QueryExecutor, SortOrder};

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
