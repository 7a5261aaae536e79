//! Clause observations
//!
//! A [`ClauseObservation`] records one clause of a query and knows how to
//! render itself into a SQL fragment plus the values it binds.

use serde_json::Value;

use crate::errors::QueryError;
use crate::query_builder::dialect::{Dialect, PlaceholderCursor};
use crate::query_builder::keyword::{ClauseCategory, Keyword};

/// Rendered SQL for one clause together with its bound values.
///
/// Non-empty fragments always start with a single space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub args: Vec<Value>,
}

/// One clause of a query
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseObservation {
    keyword: Keyword,
    dialect: Dialect,
    table_name: String,
    columns: Vec<String>,
    values: Vec<Value>,
    occurrence: usize,
}

impl ClauseObservation {
    pub fn new(keyword: Keyword, dialect: Dialect, table_name: impl Into<String>) -> Self {
        Self {
            keyword,
            dialect,
            table_name: table_name.into(),
            columns: Vec::new(),
            values: Vec::new(),
            occurrence: 0,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Record the WHERE/LIKE occurrence this clause was appended at.
    ///
    /// A WHERE after the first one is stored as AND.
    pub(crate) fn with_occurrence(mut self, occurrence: usize) -> Self {
        self.occurrence = occurrence;
        if self.keyword == Keyword::Where && occurrence > 1 {
            self.keyword = Keyword::And;
        }
        self
    }

    pub fn keyword(&self) -> &Keyword {
        &self.keyword
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn occurrence(&self) -> usize {
        self.occurrence
    }

    pub fn takes_placeholder(&self) -> bool {
        self.keyword.takes_placeholder()
    }

    /// Number of placeholders this clause emits when rendered
    pub fn placeholder_count(&self) -> usize {
        match self.keyword.category() {
            ClauseCategory::Base if self.takes_placeholder() => self.columns.len(),
            ClauseCategory::Conditional | ClauseCategory::Paging => 1,
            _ => 0,
        }
    }

    /// Render this clause, drawing placeholder ordinals from `cursor`
    pub fn render(&self, cursor: &mut PlaceholderCursor) -> Result<Fragment, QueryError> {
        let fragment = match self.keyword.category() {
            ClauseCategory::Base => self.render_base(cursor)?,
            ClauseCategory::Join => self.render_join(),
            ClauseCategory::Conditional => self.render_conditional(cursor)?,
            ClauseCategory::Paging => self.render_paging(cursor)?,
            ClauseCategory::FreeForm => self.render_free_form(),
        };

        #[cfg(feature = "debug-logging")]
        tracing::trace!(
            keyword = %self.keyword,
            sql = %fragment.sql,
            args = fragment.args.len(),
            "rendered clause"
        );

        Ok(fragment)
    }

    fn render_base(&self, cursor: &mut PlaceholderCursor) -> Result<Fragment, QueryError> {
        match self.keyword {
            Keyword::Insert => {
                self.check_assignments()?;
                let mut placeholders = String::new();
                for i in 0..self.columns.len() {
                    if i > 0 {
                        placeholders.push(',');
                    }
                    cursor.write_next(self.dialect, &mut placeholders);
                }
                Ok(Fragment {
                    sql: format!(
                        " INSERT INTO {} ({}) VALUES ({})",
                        self.table_name,
                        self.columns.join(","),
                        placeholders
                    ),
                    args: self.values.clone(),
                })
            }
            Keyword::Update => {
                self.check_assignments()?;
                let mut assignments = String::new();
                for (i, column) in self.columns.iter().enumerate() {
                    if i > 0 {
                        assignments.push(',');
                    }
                    assignments.push_str(column);
                    assignments.push('=');
                    cursor.write_next(self.dialect, &mut assignments);
                }
                Ok(Fragment {
                    sql: format!(" UPDATE {} SET {}", self.table_name, assignments),
                    args: self.values.clone(),
                })
            }
            Keyword::Select => {
                let columns = if self.columns.is_empty() {
                    "*".to_string()
                } else {
                    self.columns.join(",")
                };
                Ok(Fragment {
                    sql: format!(" SELECT {} FROM {}", columns, self.table_name),
                    args: Vec::new(),
                })
            }
            _ => Ok(Fragment {
                sql: format!(" DELETE FROM {}", self.table_name),
                args: Vec::new(),
            }),
        }
    }

    fn check_assignments(&self) -> Result<(), QueryError> {
        if self.columns.len() != self.values.len() {
            return Err(QueryError::ArityMismatch {
                expected: self.columns.len(),
                got: self.values.len(),
            });
        }
        if self.columns.is_empty() {
            return Err(QueryError::EmptyAssignments(self.keyword.clone()));
        }
        Ok(())
    }

    /// The join target sits in the column slot; without one the builder's
    /// own table is joined.
    fn render_join(&self) -> Fragment {
        let target = self.column().unwrap_or(self.table_name.as_str());
        let condition = self.values.first().map(inline_value).unwrap_or_default();

        Fragment {
            sql: format!(" {} {} ON {}", self.keyword, target, condition),
            args: Vec::new(),
        }
    }

    fn render_conditional(&self, cursor: &mut PlaceholderCursor) -> Result<Fragment, QueryError> {
        let column = self
            .column()
            .ok_or_else(|| QueryError::MissingColumn(self.keyword.clone()))?;
        let value = self.single_value()?;

        let mut sql = String::with_capacity(column.len() + 16);
        sql.push(' ');
        if self.keyword == Keyword::Like {
            sql.push_str(if self.occurrence > 1 { "AND " } else { "WHERE " });
            sql.push_str(column);
            sql.push_str(" LIKE ");
        } else {
            sql.push_str(&self.keyword.to_sql());
            sql.push(' ');
            sql.push_str(column);
            sql.push('=');
        }
        cursor.write_next(self.dialect, &mut sql);

        Ok(Fragment {
            sql,
            args: vec![value.clone()],
        })
    }

    fn render_paging(&self, cursor: &mut PlaceholderCursor) -> Result<Fragment, QueryError> {
        let value = self.single_value()?;
        let mut sql = format!(" {} ", self.keyword);
        cursor.write_next(self.dialect, &mut sql);

        Ok(Fragment {
            sql,
            args: vec![value.clone()],
        })
    }

    fn render_free_form(&self) -> Fragment {
        let parts: Vec<String> = self
            .columns
            .first()
            .cloned()
            .into_iter()
            .chain(self.values.first().map(inline_value))
            .collect();

        if parts.is_empty() {
            return Fragment::default();
        }

        Fragment {
            sql: format!(" {} {}", self.keyword, parts.join(" ")),
            args: Vec::new(),
        }
    }

    /// First column, treating a blank one as absent
    fn column(&self) -> Option<&str> {
        self.columns
            .first()
            .map(String::as_str)
            .filter(|column| !column.trim().is_empty())
    }

    fn single_value(&self) -> Result<&Value, QueryError> {
        self.values.first().ok_or(QueryError::ArityMismatch {
            expected: 1,
            got: 0,
        })
    }
}

/// Text of a value that is written into the SQL itself; strings go in unquoted
fn inline_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_alone(observation: &ClauseObservation) -> Result<Fragment, QueryError> {
        observation.render(&mut PlaceholderCursor::new())
    }

    #[test]
    fn test_update_numbers_each_column() {
        let observation = ClauseObservation::new(Keyword::Update, Dialect::Numbered, "users")
            .with_columns(["name", "email"])
            .with_values([json!("ann"), json!("ann@example.com")]);

        let fragment = render_alone(&observation).unwrap();
        assert_eq!(fragment.sql, " UPDATE users SET name=$1,email=$2");
        assert_eq!(fragment.args, vec![json!("ann"), json!("ann@example.com")]);
    }

    #[test]
    fn test_insert_arity_mismatch() {
        let observation =
            ClauseObservation::new(Keyword::Insert, Dialect::Positional, "users").with_column("a");

        let err = render_alone(&observation).unwrap_err();
        assert!(matches!(err, QueryError::ArityMismatch { expected: 1, got: 0 }));
        assert_eq!(err.to_string(), "Expected 1 column args but got 0 values");
    }

    #[test]
    fn test_update_without_pairs() {
        let observation = ClauseObservation::new(Keyword::Update, Dialect::Positional, "users");
        let err = render_alone(&observation).unwrap_err();
        assert!(matches!(err, QueryError::EmptyAssignments(Keyword::Update)));
    }

    #[test]
    fn test_select_without_columns_selects_all() {
        let observation = ClauseObservation::new(Keyword::Select, Dialect::Positional, "users");
        assert_eq!(render_alone(&observation).unwrap().sql, " SELECT * FROM users");
    }

    #[test]
    fn test_join_without_target_uses_own_table() {
        let observation = ClauseObservation::new(Keyword::join("inner"), Dialect::Positional, "t")
            .with_value("t.parent_id=t.id");
        assert_eq!(
            render_alone(&observation).unwrap().sql,
            " INNER JOIN t ON t.parent_id=t.id"
        );
    }

    #[test]
    fn test_where_promotion_happens_at_append() {
        let observation = ClauseObservation::new(Keyword::Where, Dialect::Positional, "t")
            .with_column("a")
            .with_value(1)
            .with_occurrence(2);
        assert_eq!(observation.keyword(), &Keyword::And);

        // Rendering leaves the observation as it was
        let first = render_alone(&observation).unwrap();
        let second = render_alone(&observation).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.sql, " AND a=?");
    }

    #[test]
    fn test_like_keeps_its_keyword() {
        let observation = ClauseObservation::new(Keyword::Like, Dialect::Numbered, "t")
            .with_column("name")
            .with_value("%ann%")
            .with_occurrence(3);
        assert_eq!(observation.keyword(), &Keyword::Like);
        assert_eq!(render_alone(&observation).unwrap().sql, " AND name LIKE $1");
    }

    #[test]
    fn test_conditional_without_column() {
        let observation =
            ClauseObservation::new(Keyword::Or, Dialect::Positional, "t").with_value(1);
        assert!(matches!(
            render_alone(&observation),
            Err(QueryError::MissingColumn(Keyword::Or))
        ));
    }

    #[test]
    fn test_order_by_without_parts_renders_nothing() {
        let observation = ClauseObservation::new(Keyword::OrderBy, Dialect::Positional, "t");
        assert_eq!(render_alone(&observation).unwrap(), Fragment::default());
    }

    #[test]
    fn test_order_by_inlines_non_string_value() {
        let observation = ClauseObservation::new(Keyword::OrderBy, Dialect::Positional, "t")
            .with_column("score")
            .with_value(2);
        assert_eq!(render_alone(&observation).unwrap().sql, " ORDER BY score 2");
    }

    #[test]
    fn test_placeholder_count_matches_render() {
        let observation = ClauseObservation::new(Keyword::Insert, Dialect::Numbered, "t")
            .with_columns(["a", "b", "c"])
            .with_values([1, 2, 3]);
        let mut cursor = PlaceholderCursor::new();
        observation.render(&mut cursor).unwrap();
        assert_eq!(observation.placeholder_count(), cursor.issued());
    }
}
