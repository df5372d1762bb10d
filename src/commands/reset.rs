//! `reset`: drop every table and enum type in the public schema.
//!
//! The whole sweep runs in one transaction with a single commit at the end;
//! any failure mid-sequence rolls everything back.

use sqlx::{Connection, PgConnection};

use crate::config::Config;
use crate::db::{self, quote_ident};
use crate::errors::Result;

pub async fn run(config: &Config) -> Result<()> {
    println!("\n=== Resetting Database ===");

    let mut conn = db::connect(&config.database_url).await?;
    let result = execute(&mut conn).await;
    db::close(conn).await;
    result
}

async fn execute(conn: &mut PgConnection) -> Result<()> {
    let mut tx = conn.begin().await?;

    let tables = db::list_tables(&mut tx).await?;
    if tables.is_empty() {
        println!("No tables to drop");
    } else {
        println!("Dropping {} tables...", tables.len());
        for table in &tables {
            let stmt = format!("DROP TABLE IF EXISTS {} CASCADE", quote_ident(table));
            sqlx::raw_sql(&stmt).execute(&mut *tx).await?;
            println!("  ✓ Dropped table: {table}");
        }
    }

    // Enum types are swept even when no tables existed, so the schema ends
    // up empty of both.
    let types = db::list_enum_types(&mut tx).await?;
    for name in &types {
        let stmt = format!("DROP TYPE IF EXISTS {} CASCADE", quote_ident(name));
        sqlx::raw_sql(&stmt).execute(&mut *tx).await?;
        println!("  ✓ Dropped type: {name}");
    }

    tx.commit().await?;
    println!("\n✓ Database reset successfully");
    Ok(())
}
