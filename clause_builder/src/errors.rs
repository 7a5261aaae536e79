use thiserror::Error;

use crate::query_builder::Keyword;

/// Boxed error coming back from a [`QueryExecutor`](crate::QueryExecutor)
pub type ExecutionError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Expected {expected} column args but got {got} values")]
    ArityMismatch { expected: usize, got: usize },

    #[error("{0} clause has no column/value pairs")]
    EmptyAssignments(Keyword),

    #[error("{0} clause has no column")]
    MissingColumn(Keyword),

    #[error("Query execution error: {0}")]
    Execution(#[source] ExecutionError),
}

impl QueryError {
    /// Wrap an executor failure
    pub fn execution<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        QueryError::Execution(Box::new(err))
    }
}
