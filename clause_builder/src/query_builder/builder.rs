//! Fluent query builder
//!
//! Every clause method appends one [`ClauseObservation`] and hands the
//! builder back. Rendering walks the whole sequence from the start each time.

use serde::Serialize;
use serde_json::Value;

use crate::errors::QueryError;
use crate::executor::QueryExecutor;
use crate::query_builder::dialect::{Dialect, PlaceholderCursor};
use crate::query_builder::keyword::Keyword;
use crate::query_builder::observation::ClauseObservation;

/// Full SQL text with its arguments in clause-then-column order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Query builder for a single table and dialect.
///
/// `E` is the execution capability; a builder created with
/// [`QueryBuilder::new`] is detached (`()`) and can only render.
#[derive(Debug, Clone)]
pub struct QueryBuilder<E = ()> {
    pub(crate) observations: Vec<ClauseObservation>,
    pub(crate) dialect: Dialect,
    pub(crate) table_name: String,
    pub(crate) args: Vec<Value>,
    pub(crate) occurrences: usize,
    executor: E,
}

impl QueryBuilder<()> {
    pub fn new(table_name: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            observations: Vec::new(),
            dialect,
            table_name: table_name.into(),
            args: Vec::new(),
            occurrences: 0,
            executor: (),
        }
    }

    /// Builder using `?` placeholders
    pub fn mysql(table_name: impl Into<String>) -> Self {
        Self::new(table_name, Dialect::Positional)
    }

    /// Builder using `$N` placeholders
    pub fn postgres(table_name: impl Into<String>) -> Self {
        Self::new(table_name, Dialect::Numbered)
    }
}

impl<E> QueryBuilder<E> {
    /// Bind the builder to an executor, keeping every clause added so far
    pub fn with_executor<X>(self, executor: X) -> QueryBuilder<X> {
        QueryBuilder {
            observations: self.observations,
            dialect: self.dialect,
            table_name: self.table_name,
            args: self.args,
            occurrences: self.occurrences,
            executor,
        }
    }

    /// Add an INSERT for the given column/value pairs
    pub fn insert<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.assignments(Keyword::Insert, pairs)
    }

    /// Add an UPDATE ... SET for the given column/value pairs
    pub fn update<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.assignments(Keyword::Update, pairs)
    }

    fn assignments<I, K, V>(self, keyword: Keyword, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) = pairs
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .unzip();

        let observation = self
            .observation(keyword)
            .with_columns(columns)
            .with_values(values);
        self.push(observation)
    }

    /// Add `column=<value>`, as WHERE the first time and AND afterwards
    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let observation = self
            .observation(Keyword::Where)
            .with_column(column)
            .with_value(value);
        self.push(observation)
    }

    /// Add `OR column=<value>`
    pub fn or_where(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let observation = self
            .observation(Keyword::Or)
            .with_column(column)
            .with_value(value);
        self.push(observation)
    }

    /// Add `column LIKE <pattern>`, prefixed with WHERE or AND
    pub fn where_like(self, column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        let observation = self
            .observation(Keyword::Like)
            .with_column(column)
            .with_value(pattern);
        self.push(observation)
    }

    /// Add `ORDER BY column direction`; the direction is written as given
    pub fn order_by(self, column: impl Into<String>, direction: impl AsRef<str>) -> Self {
        let observation = self
            .observation(Keyword::OrderBy)
            .with_column(column)
            .with_value(direction.as_ref());
        self.push(observation)
    }

    /// Add `SELECT columns FROM table`; columns may be any SQL expression
    pub fn select<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let observation = self.observation(Keyword::Select).with_columns(columns);
        self.push(observation)
    }

    /// Add `<JOIN_TYPE> JOIN target ON condition`
    pub fn join(
        self,
        join_type: impl AsRef<str>,
        target: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        let condition: String = condition.into();
        let observation = self
            .observation(Keyword::join(join_type.as_ref()))
            .with_column(target)
            .with_value(condition);
        self.push(observation)
    }

    /// Add `DELETE FROM table`
    pub fn delete(self) -> Self {
        let observation = self.observation(Keyword::Delete);
        self.push(observation)
    }

    /// Add `LIMIT <n>` with `n` bound as an argument
    pub fn limit(self, limit: u64) -> Self {
        let observation = self.observation(Keyword::Limit).with_value(limit);
        self.push(observation)
    }

    /// Add `OFFSET <n>` with `n` bound as an argument
    pub fn offset(self, offset: u64) -> Self {
        let observation = self.observation(Keyword::Offset).with_value(offset);
        self.push(observation)
    }

    /// Append a hand-built observation.
    ///
    /// WHERE and LIKE observations still take part in occurrence counting.
    pub fn push(mut self, observation: ClauseObservation) -> Self {
        let observation = if observation.keyword().counts_occurrence() {
            self.occurrences += 1;
            observation.with_occurrence(self.occurrences)
        } else {
            observation
        };
        self.observations.push(observation);
        self
    }

    fn observation(&self, keyword: Keyword) -> ClauseObservation {
        ClauseObservation::new(keyword, self.dialect, self.table_name.as_str())
    }

    /// Render the full query without touching the collected arguments
    pub fn build(&self) -> Result<RenderedQuery, QueryError> {
        let mut cursor = PlaceholderCursor::new();
        let mut rendered = RenderedQuery::default();

        for observation in &self.observations {
            let fragment = observation.render(&mut cursor)?;
            rendered.sql.push_str(&fragment.sql);
            rendered.args.extend(fragment.args);
        }

        tracing::debug!(
            table = %self.table_name,
            clauses = self.observations.len(),
            placeholders = cursor.issued(),
            "rendered query"
        );

        Ok(rendered)
    }

    /// Render the full query and keep its arguments for [`args`](Self::args)
    pub fn to_query_string(&mut self) -> Result<String, QueryError> {
        self.args.clear();
        let rendered = self.build()?;
        self.args = rendered.args;
        Ok(rendered.sql)
    }

    /// Arguments collected by the most recent [`to_query_string`](Self::to_query_string)
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Placeholders the current sequence renders to
    pub fn placeholder_count(&self) -> usize {
        self.observations
            .iter()
            .map(ClauseObservation::placeholder_count)
            .sum()
    }

    pub fn observations(&self) -> &[ClauseObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

impl<E: QueryExecutor> QueryBuilder<E> {
    /// Render and run the query expecting at most one row
    pub async fn row_query(&mut self) -> Result<E::Row, QueryError> {
        let sql = self.to_query_string()?;
        Ok(self.executor.fetch_row(&sql, &self.args).await)
    }

    /// Render and run the query expecting a row set
    pub async fn rows_query(&mut self) -> Result<E::Rows, QueryError> {
        let sql = self.to_query_string()?;
        self.executor
            .fetch_rows(&sql, &self.args)
            .await
            .map_err(QueryError::execution)
    }
}
