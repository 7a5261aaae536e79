//! Execution capability consumed by query builders
//!
//! The builder only renders SQL. Running it is delegated to a
//! [`QueryExecutor`], which driver adapters implement outside this crate.

use async_trait::async_trait;
use serde_json::Value;

/// The two ways a rendered query can be run
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Handle to at most one row.
    ///
    /// Driver errors are carried by the handle itself rather than reported
    /// at dispatch.
    type Row: Send;

    /// Zero or more rows
    type Rows: Send;

    /// Failure reported when fetching a row set
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute `sql` expecting at most one row
    async fn fetch_row(&self, sql: &str, args: &[Value]) -> Self::Row;

    /// Execute `sql` expecting a row set
    async fn fetch_rows(&self, sql: &str, args: &[Value]) -> Result<Self::Rows, Self::Error>;
}

#[async_trait]
impl<'a, E> QueryExecutor for &'a E
where
    E: QueryExecutor + ?Sized,
{
    type Row = E::Row;
    type Rows = E::Rows;
    type Error = E::Error;

    async fn fetch_row(&self, sql: &str, args: &[Value]) -> Self::Row {
        (**self).fetch_row(sql, args).await
    }

    async fn fetch_rows(&self, sql: &str, args: &[Value]) -> Result<Self::Rows, Self::Error> {
        (**self).fetch_rows(sql, args).await
    }
}
