//! # Basic Usage Example
//!
//! This example walks through the builder:
//! - Rendering the same query for `?` and `$N` placeholders
//! - Chaining WHERE, LIKE, OR, JOIN, ORDER BY and paging clauses
//! - Running a query when a `chainsql.toml` is available
//!
//! Rendering needs no database. The last step is skipped when no
//! configuration can be loaded.

use chainsql::prelude::*;

fn orders_query<E>(builder: QueryBuilder<E>) -> QueryBuilder<E> {
    builder
        .select(["o.id", "o.total", "c.name"])
        .join(JoinType::Inner, "customers c", "c.id=o.customer_id")
        .where_eq("o.status", "paid")
        .where_like("c.name", "A%")
        .or_where("o.priority", true)
        .order_by("o.total", SortOrder::Desc)
        .limit(20)
        .offset(40)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("🚀 chainsql Basic Usage Example");
    println!("===============================");

    // 1. Same chain, two dialects
    println!("\n📝 Step 1: Rendering");
    println!("--------------------");

    for dialect in [Dialect::Positional, Dialect::Numbered] {
        let mut query = orders_query(QueryBuilder::new("orders o", dialect));
        println!("{:?}:{}", dialect, query.to_query_string()?);
        println!("  args: {:?}", query.args());
    }

    // 2. Writes
    println!("\n✏️  Step 2: INSERT / UPDATE / DELETE");
    println!("-----------------------------------");

    let mut insert = QueryBuilder::postgres("users").insert(vec![
        ("name", json!("Ada")),
        ("email", json!("ada@example.com")),
        ("age", json!(36)),
    ]);
    println!("{}", insert.to_query_string()?);

    let mut update = QueryBuilder::postgres("users")
        .update(vec![("email", json!("ada@lovelace.dev"))])
        .where_eq("name", "Ada");
    println!("{}", update.to_query_string()?);

    let mut delete = QueryBuilder::mysql("sessions")
        .delete()
        .where_eq("expired", true);
    println!("{}", delete.to_query_string()?);

    // 3. Errors are returned, not embedded in the SQL
    println!("\n⚠️  Step 3: Arity errors");
    println!("------------------------");

    let broken = ClauseObservation::new(Keyword::Insert, Dialect::Positional, "users")
        .with_columns(["name", "email"])
        .with_value("Ada");
    match QueryBuilder::mysql("users").push(broken).to_query_string() {
        Ok(sql) => println!("unexpected: {}", sql),
        Err(e) => println!("rejected: {}", e),
    }

    // 4. Run against a database
    println!("\n📊 Step 4: Execution");
    println!("--------------------");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            println!("No configuration ({}), skipping execution", e);
            return Ok(());
        }
    };

    match config.database.driver {
        Driver::Mysql => {
            let db = ChainSql::connect_mysql(&config.database)
                .await?
                .with_builder_config(config.builder.clone());
            db.health_check().await?;
            let rows = db.table("users")?.select(["id"]).limit(5).rows_query().await?;
            println!("✅ fetched {} rows from MySQL", rows.len());
        }
        Driver::Postgres => {
            let db = ChainSql::connect_postgres(&config.database)
                .await?
                .with_builder_config(config.builder.clone());
            db.health_check().await?;
            let rows = db.table("users")?.select(["id"]).limit(5).rows_query().await?;
            println!("✅ fetched {} rows from PostgreSQL", rows.len());
        }
    }

    Ok(())
}
