//! sqlx adapters for the query executor capability
//!
//! [`MySqlExecutor`] and [`PgExecutor`] run rendered queries on a sqlx pool,
//! binding the builder's JSON arguments to native driver types. Strings bind
//! as text unless the executor opts into [`StringBinding::Inferred`].

use async_trait::async_trait;
use clause_builder::QueryExecutor;
use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlRow};
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::query::Query;
use sqlx::{MySql, Postgres};

type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;
type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// How string arguments are handed to the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StringBinding {
    /// Every string binds as text
    #[default]
    Text,
    /// RFC 3339 strings bind as timestamps; on PostgreSQL, UUID strings bind as `uuid`.
    ///
    /// Only safe when the columns involved really have those types.
    Inferred,
}

// Shared parameter binding logic; `$bind_inferred` decides how strings bind
// under `StringBinding::Inferred`
macro_rules! bind_json_param {
    ($query:expr, $param:expr, $binding:expr, $bind_inferred:ident) => {
        match $param {
            Value::String(s) => match $binding {
                StringBinding::Text => $query.bind(s),
                StringBinding::Inferred => $bind_inferred($query, s),
            },
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            Value::Bool(b) => $query.bind(b),
            Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(other.to_string()),
        }
    };
}

fn parse_timestamp(text: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&chrono::Utc))
}

fn bind_mysql_inferred(query: MySqlQuery<'_>, text: String) -> MySqlQuery<'_> {
    // MySQL has no uuid type, those stay text
    match parse_timestamp(&text) {
        Some(dt) => query.bind(dt),
        None => query.bind(text),
    }
}

fn bind_pg_inferred(query: PgQuery<'_>, text: String) -> PgQuery<'_> {
    if let Some(dt) = parse_timestamp(&text) {
        return query.bind(dt);
    }
    match uuid::Uuid::parse_str(&text) {
        Ok(uuid) => query.bind(uuid),
        Err(_) => query.bind(text),
    }
}

fn mysql_query<'q>(sql: &'q str, args: &[Value], binding: StringBinding) -> MySqlQuery<'q> {
    let mut query = sqlx::query(sql);
    for param in args.iter().cloned() {
        query = bind_json_param!(query, param, binding, bind_mysql_inferred);
    }
    query
}

fn pg_query<'q>(sql: &'q str, args: &[Value], binding: StringBinding) -> PgQuery<'q> {
    let mut query = sqlx::query(sql);
    for param in args.iter().cloned() {
        query = bind_json_param!(query, param, binding, bind_pg_inferred);
    }
    query
}

/// Runs queries on a MySQL pool; pairs with `?` placeholders
#[derive(Debug, Clone)]
pub struct MySqlExecutor {
    pool: MySqlPool,
    string_binding: StringBinding,
}

impl MySqlExecutor {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            string_binding: StringBinding::default(),
        }
    }

    pub fn with_string_binding(mut self, string_binding: StringBinding) -> Self {
        self.string_binding = string_binding;
        self
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn string_binding(&self) -> StringBinding {
        self.string_binding
    }
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    type Row = Result<Option<MySqlRow>, sqlx::Error>;
    type Rows = Vec<MySqlRow>;
    type Error = sqlx::Error;

    async fn fetch_row(&self, sql: &str, args: &[Value]) -> Self::Row {
        debug_log!("[MYSQL_ROW] SQL: {}", sql);
        trace_log!("[MYSQL_ROW] args: {:?}", args);
        mysql_query(sql, args, self.string_binding).fetch_optional(&self.pool).await
    }

    async fn fetch_rows(&self, sql: &str, args: &[Value]) -> Result<Self::Rows, Self::Error> {
        debug_log!("[MYSQL_ROWS] SQL: {}", sql);
        trace_log!("[MYSQL_ROWS] args: {:?}", args);
        mysql_query(sql, args, self.string_binding).fetch_all(&self.pool).await
    }
}

/// Runs queries on a PostgreSQL pool; pairs with `$N` placeholders
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pool: PgPool,
    string_binding: StringBinding,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            string_binding: StringBinding::default(),
        }
    }

    pub fn with_string_binding(mut self, string_binding: StringBinding) -> Self {
        self.string_binding = string_binding;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn string_binding(&self) -> StringBinding {
        self.string_binding
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    type Row = Result<Option<PgRow>, sqlx::Error>;
    type Rows = Vec<PgRow>;
    type Error = sqlx::Error;

    async fn fetch_row(&self, sql: &str, args: &[Value]) -> Self::Row {
        debug_log!("[PG_ROW] SQL: {}", sql);
        trace_log!("[PG_ROW] args: {:?}", args);
        pg_query(sql, args, self.string_binding).fetch_optional(&self.pool).await
    }

    async fn fetch_rows(&self, sql: &str, args: &[Value]) -> Result<Self::Rows, Self::Error> {
        debug_log!("[PG_ROWS] SQL: {}", sql);
        trace_log!("[PG_ROWS] args: {:?}", args);
        pg_query(sql, args, self.string_binding).fetch_all(&self.pool).await
    }
}
