//! Error types for the chainsql crate
//!
//! This module contains all error types that can be returned by chainsql operations.

use clause_builder::{QueryError, ValidationError};
use config::{ConfigError, Driver};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainSqlError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid table name: {0}")]
    InvalidTableName(#[from] ValidationError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Configured driver is {found}, expected {expected}")]
    DriverMismatch { expected: Driver, found: Driver },
}
