//! Integration tests for the chainsql facade
//!
//! Runs builders through `ChainSql` with an in-memory executor, so no
//! database is needed.

use std::sync::Mutex;

use chainsql::prelude::*;
use chainsql::{ChainSqlError, dialect_for};

#[derive(Debug, thiserror::Error)]
#[error("server has gone away")]
struct ServerGone;

/// Remembers every query and answers with a fixed number of rows
#[derive(Debug)]
struct ScriptedExecutor {
    seen: Mutex<Vec<(String, Vec<Value>)>>,
    rows: usize,
    healthy: bool,
}

impl ScriptedExecutor {
    fn new(rows: usize) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            rows,
            healthy: true,
        }
    }

    fn down() -> Self {
        Self {
            healthy: false,
            ..Self::new(0)
        }
    }

    fn last(&self) -> (String, Vec<Value>) {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    type Row = Option<usize>;
    type Rows = Vec<usize>;
    type Error = ServerGone;

    async fn fetch_row(&self, sql: &str, args: &[Value]) -> Self::Row {
        self.seen.lock().unwrap().push((sql.to_string(), args.to_vec()));
        (self.rows > 0).then_some(0)
    }

    async fn fetch_rows(&self, sql: &str, args: &[Value]) -> Result<Self::Rows, Self::Error> {
        self.seen.lock().unwrap().push((sql.to_string(), args.to_vec()));
        if !self.healthy {
            return Err(ServerGone);
        }
        Ok((0..self.rows).collect())
    }
}

#[tokio::test]
async fn test_table_builder_runs_through_executor() {
    let db = ChainSql::new(ScriptedExecutor::new(3), Dialect::Numbered);

    let rows = db
        .table("orders")
        .unwrap()
        .select(["id", "total"])
        .where_eq("status", "paid")
        .where_eq("customer_id", 12)
        .order_by("id", SortOrder::Desc)
        .limit(3)
        .rows_query()
        .await
        .unwrap();

    assert_eq!(rows, vec![0, 1, 2]);
    let (sql, args) = db.executor().last();
    assert_eq!(
        sql,
        " SELECT id,total FROM orders WHERE status=$1 AND customer_id=$2 ORDER BY id DESC LIMIT $3"
    );
    assert_eq!(args, vec![json!("paid"), json!(12), json!(3)]);
}

#[tokio::test]
async fn test_row_query_on_insert() {
    let db = ChainSql::new(ScriptedExecutor::new(1), dialect_for(Driver::Mysql));

    let mut builder = db
        .table("users")
        .unwrap()
        .insert(vec![("name", json!("ann")), ("email", json!("ann@example.com"))]);
    let row = builder.row_query().await.unwrap();

    assert_eq!(row, Some(0));
    assert_eq!(db.executor().last().0, " INSERT INTO users (name,email) VALUES (?,?)");
    assert_eq!(builder.args().len(), 2);
}

#[test]
fn test_table_names_are_validated() {
    let db = ChainSql::new(ScriptedExecutor::new(0), Dialect::Positional);

    let err = db.table("users; DROP TABLE users").unwrap_err();
    assert!(matches!(err, ChainSqlError::InvalidTableName(_)));

    assert!(db.table("public.users").is_ok());
}

#[test]
fn test_validation_can_be_disabled() {
    let db = ChainSql::new(ScriptedExecutor::new(0), Dialect::Positional).with_builder_config(
        BuilderConfig {
            validate_table_names: false,
        },
    );

    let mut builder = db.table("users u").unwrap().select(["u.id"]);
    assert_eq!(builder.to_query_string().unwrap(), " SELECT u.id FROM users u");
}

#[tokio::test]
async fn test_health_check() {
    let db = ChainSql::new(ScriptedExecutor::new(1), Dialect::Numbered);
    db.health_check().await.unwrap();
    assert_eq!(db.executor().last().0, "SELECT 1");

    let db = ChainSql::new(ScriptedExecutor::down(), Dialect::Numbered);
    let err = db.health_check().await.unwrap_err();
    assert!(matches!(err, ChainSqlError::Query(QueryError::Execution(_))));
}

async fn run_pushed(
    db: &ChainSql<ScriptedExecutor>,
    observation: ClauseObservation,
) -> Result<Vec<usize>, ChainSqlError> {
    let rows = db.table("users")?.push(observation).rows_query().await?;
    Ok(rows)
}

#[tokio::test]
async fn test_arity_error_converts_to_facade_error() {
    let db = ChainSql::new(ScriptedExecutor::new(1), Dialect::Positional);
    let observation = ClauseObservation::new(Keyword::Update, Dialect::Positional, "users")
        .with_columns(["a", "b"])
        .with_value(1);

    let result = run_pushed(&db, observation).await;

    assert!(matches!(
        result,
        Err(ChainSqlError::Query(QueryError::ArityMismatch { expected: 2, got: 1 }))
    ));
    assert!(db.executor().seen.lock().unwrap().is_empty());
}

#[test]
fn test_driver_dialects() {
    assert_eq!(dialect_for(Driver::Mysql), Dialect::Positional);
    assert_eq!(dialect_for(Driver::Postgres), Dialect::Numbered);
}

#[tokio::test]
async fn test_connect_rejects_wrong_driver() {
    let config = DatabaseConfig::new(
        Driver::Mysql,
        "localhost".to_string(),
        3306,
        "shop".to_string(),
        "root".to_string(),
        "pw".to_string(),
        1,
        1,
    );

    let err = ChainSql::connect_postgres(&config).await.err().unwrap();
    assert!(matches!(
        err,
        ChainSqlError::DriverMismatch {
            expected: Driver::Postgres,
            found: Driver::Mysql
        }
    ));
    assert_eq!(err.to_string(), "Configured driver is mysql, expected postgres");
}

#[tokio::test]
async fn test_connect_validates_config_before_dialing() {
    let config = DatabaseConfig::new(
        Driver::Mysql,
        "localhost".to_string(),
        0,
        "shop".to_string(),
        "root".to_string(),
        "pw".to_string(),
        1,
        1,
    );

    let err = ChainSql::connect_mysql(&config).await.err().unwrap();
    assert!(matches!(err, ChainSqlError::Config(_)));
}
