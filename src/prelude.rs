//! Convenience re-exports for common chainsql usage
//!
//! # Example
//!
//! ```rust
//! use chainsql::prelude::*;
//!
//! let mut query = QueryBuilder::postgres("users").where_eq("id", json!(1));
//! assert_eq!(query.to_query_string().unwrap(), " WHERE id=$1");
//! ```

// Core chainsql components
pub use crate::core::ChainSql;
pub use crate::errors::ChainSqlError;
pub use crate::executor::{MySqlExecutor, PgExecutor, StringBinding};

// Re-export centralized config
pub use config::{AppConfig, BuilderConfig, DatabaseConfig, Driver};

// Re-export the builder prelude
pub use clause_builder::prelude::*;

// Common external dependencies
pub use anyhow;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{MySqlPool, PgPool, Row};
