//! `status`: report server version, tables with sizes and live row counts,
//! and enum types.
//!
//! Read-only; no transaction is taken. The per-table COUNT(*) is an N+1
//! pattern, accepted because this is a diagnostic command, not a hot path.

use sqlx::PgConnection;

use crate::config::Config;
use crate::db::{self, quote_ident};
use crate::errors::Result;

const TABLE_SIZES: &str = "\
    SELECT tablename, pg_size_pretty(pg_total_relation_size(schemaname || '.' || tablename)) \
    FROM pg_tables \
    WHERE schemaname = 'public' \
    ORDER BY tablename";

pub async fn run(config: &Config) -> Result<()> {
    println!("\n=== Database Status ===");

    let mut conn = db::connect(&config.database_url).await?;
    let result = execute(&mut conn).await;
    db::close(conn).await;
    result
}

async fn execute(conn: &mut PgConnection) -> Result<()> {
    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&mut *conn)
        .await?;
    println!("\nPostgreSQL Version:\n  {version}");

    let tables: Vec<(String, String)> = sqlx::query_as(TABLE_SIZES)
        .fetch_all(&mut *conn)
        .await?;

    if tables.is_empty() {
        println!("\nNo tables found");
    } else {
        println!("\nTables ({}):", tables.len());
        for (table, size) in &tables {
            let count = count_rows(conn, table).await?;
            println!("  • {table:<30} {count:>6} rows  {size}");
        }
    }

    let types = db::list_enum_types(conn).await?;
    if !types.is_empty() {
        println!("\nCustom Types ({}):", types.len());
        for name in &types {
            println!("  • {name}");
        }
    }

    Ok(())
}

async fn count_rows(conn: &mut PgConnection, table: &str) -> Result<i64> {
    let stmt = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
    Ok(sqlx::query_scalar(&stmt).fetch_one(conn).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn counts_live_rows_per_table(pool: sqlx::PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        sqlx::raw_sql(
            "CREATE TABLE orders (id INT); \
             INSERT INTO orders VALUES (1), (2), (3);",
        )
        .execute(&mut *conn)
        .await
        .unwrap();

        assert_eq!(count_rows(&mut conn, "orders").await.unwrap(), 3);

        let sizes: Vec<(String, String)> = sqlx::query_as(TABLE_SIZES)
            .fetch_all(&mut *conn)
            .await
            .unwrap();
        let (name, size) = sizes
            .iter()
            .find(|(name, _)| name == "orders")
            .expect("orders table listed");
        assert_eq!(name, "orders");
        assert!(!size.is_empty());
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn status_runs_on_empty_schema(pool: sqlx::PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        execute(&mut conn).await.unwrap();
    }
}
