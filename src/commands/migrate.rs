//! `migrate`: drop existing objects (when a drop script exists) and apply
//! the schema file.
//!
//! The drop script and the schema each run in their own transaction. A
//! schema failure therefore leaves an already-committed drop in place; that
//! matches the tool's documented behavior and is not repaired here.

use std::path::Path;

use sqlx::PgConnection;

use crate::config::{self, Config};
use crate::db;
use crate::errors::{Error, Result};

pub async fn run(config: &Config, schema: &Path) -> Result<()> {
    println!("\n=== Running Database Migrations ===");

    let schema_path = config::resolve_schema_path(schema);
    if !schema_path.exists() {
        return Err(Error::FileNotFound { path: schema_path });
    }
    let drop_path = config::drop_script_path(&schema_path);

    let mut conn = db::connect(&config.database_url).await?;
    let result = execute(&mut conn, &schema_path, &drop_path).await;
    db::close(conn).await;

    if result.is_ok() {
        println!("\n✓ Migration completed successfully");
    }
    result
}

async fn execute(conn: &mut PgConnection, schema_path: &Path, drop_path: &Path) -> Result<()> {
    if drop_path.exists() {
        println!("\nStep 1: Dropping all existing tables and objects...");
        db::execute_sql_file(conn, drop_path).await?;
    } else {
        println!(
            "\nℹ Drop script not found at {}, skipping drop step",
            drop_path.display()
        );
    }

    println!("\nStep 2: Creating tables and objects from schema...");
    db::execute_sql_file(conn, schema_path).await
}
