//! Core chainsql functionality
//!
//! This module contains the [`ChainSql`] entry point: it owns an executor
//! and hands out query builders bound to it.

use std::time::Duration;

use clause_builder::{Dialect, QueryBuilder, QueryError, QueryExecutor, ValidatedTableName};
use config::{BuilderConfig, DatabaseConfig, Driver};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::postgres::PgPoolOptions;

use crate::errors::ChainSqlError;
use crate::executor::{MySqlExecutor, PgExecutor, StringBinding};

/// Placeholder dialect spoken by a driver
pub fn dialect_for(driver: Driver) -> Dialect {
    match driver {
        Driver::Mysql => Dialect::Positional,
        Driver::Postgres => Dialect::Numbered,
    }
}

/// Entry point that creates query builders bound to one executor
pub struct ChainSql<E> {
    executor: E,
    dialect: Dialect,
    builder_config: BuilderConfig,
}

impl ChainSql<MySqlExecutor> {
    /// Connect to MySQL with the given configuration
    pub async fn connect_mysql(config: &DatabaseConfig) -> Result<Self, ChainSqlError> {
        ensure_driver(config, Driver::Mysql)?;
        config.validate()?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .connect(&config.connection_string())
            .await?;

        tracing::debug!(host = %config.host, database = %config.database, "connected to mysql");
        let executor = MySqlExecutor::new(pool).with_string_binding(string_binding(config));
        Ok(Self::new(executor, dialect_for(Driver::Mysql)))
    }
}

impl ChainSql<PgExecutor> {
    /// Connect to PostgreSQL with the given configuration
    pub async fn connect_postgres(config: &DatabaseConfig) -> Result<Self, ChainSqlError> {
        ensure_driver(config, Driver::Postgres)?;
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .connect(&config.connection_string())
            .await?;

        tracing::debug!(host = %config.host, database = %config.database, "connected to postgres");
        let executor = PgExecutor::new(pool).with_string_binding(string_binding(config));
        Ok(Self::new(executor, dialect_for(Driver::Postgres)))
    }
}

fn string_binding(config: &DatabaseConfig) -> StringBinding {
    if config.infer_string_types {
        StringBinding::Inferred
    } else {
        StringBinding::Text
    }
}

fn ensure_driver(config: &DatabaseConfig, expected: Driver) -> Result<(), ChainSqlError> {
    if config.driver != expected {
        return Err(ChainSqlError::DriverMismatch {
            expected,
            found: config.driver,
        });
    }
    Ok(())
}

impl<E: QueryExecutor> ChainSql<E> {
    /// Wrap any executor; `dialect` must match what the executor's database expects
    pub fn new(executor: E, dialect: Dialect) -> Self {
        Self {
            executor,
            dialect,
            builder_config: BuilderConfig::default(),
        }
    }

    pub fn with_builder_config(mut self, builder_config: BuilderConfig) -> Self {
        self.builder_config = builder_config;
        self
    }

    /// Start a query on `table_name`
    pub fn table(&self, table_name: &str) -> Result<QueryBuilder<&E>, ChainSqlError> {
        let table_name = if self.builder_config.validate_table_names {
            ValidatedTableName::new(table_name)?.into_string()
        } else {
            table_name.to_string()
        };

        Ok(QueryBuilder::new(table_name, self.dialect).with_executor(&self.executor))
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), ChainSqlError> {
        self.executor
            .fetch_rows("SELECT 1", &[])
            .await
            .map_err(QueryError::execution)?;
        Ok(())
    }
}
