//! Connection management, opaque SQL batch execution, and catalog queries.
//!
//! A command opens exactly one [`PgConnection`] and closes it when done;
//! there is no pool and no shared session state. SQL files are handed to the
//! server verbatim as one batch through the simple query protocol — no
//! statement splitting, no per-statement error isolation.

use std::path::Path;

use anyhow::Context;
use sqlx::{Connection, PgConnection};
use tracing::{debug, instrument};

use crate::errors::{Error, Result};

/// Open a session to the given connection string.
pub async fn connect(url: &str) -> Result<PgConnection> {
    match PgConnection::connect(url).await {
        Ok(conn) => {
            println!("✓ Connected to database successfully");
            Ok(conn)
        }
        Err(e) => Err(Error::Connection(e)),
    }
}

/// Close the session. Called exactly once per command invocation, on
/// success and error paths alike.
pub async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        debug!("error while closing connection: {e}");
    }
    println!("✓ Database connection closed");
}

/// Execute a SQL file as a single batch in its own transaction.
///
/// Commits on success; on engine rejection rolls back and returns
/// [`Error::Execution`]. A missing file is [`Error::FileNotFound`].
#[instrument(skip(conn), err)]
pub async fn execute_sql_file(conn: &mut PgConnection, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let sql = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;

    let mut tx = conn.begin().await?;
    match sqlx::raw_sql(&sql).execute(&mut *tx).await {
        Ok(_) => {
            tx.commit().await?;
            println!("✓ Successfully executed SQL file: {}", path.display());
            Ok(())
        }
        Err(e) => {
            tx.rollback().await?;
            Err(Error::Execution(e))
        }
    }
}

/// Quote an identifier so catalog-supplied names can be interpolated into
/// DDL without injection risk.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

const LIST_TABLES: &str = "\
    SELECT tablename FROM pg_tables \
    WHERE schemaname = 'public' \
    ORDER BY tablename";

const LIST_ENUM_TYPES: &str = "\
    SELECT typname FROM pg_type \
    WHERE typnamespace = (SELECT oid FROM pg_namespace WHERE nspname = 'public') \
    AND typtype = 'e' \
    ORDER BY typname";

/// All tables in the default schema.
pub async fn list_tables(conn: &mut PgConnection) -> Result<Vec<String>> {
    Ok(sqlx::query_scalar(LIST_TABLES).fetch_all(conn).await?)
}

/// All enum types in the default schema.
pub async fn list_enum_types(conn: &mut PgConnection) -> Result<Vec<String>> {
    Ok(sqlx::query_scalar(LIST_ENUM_TYPES).fetch_all(conn).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_wraps_plain_names() {
        assert_eq!(quote_ident("users"), "\"users\"");
    }

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn quote_ident_neutralizes_injection_attempts() {
        let quoted = quote_ident("users\"; DROP TABLE users; --");
        assert_eq!(quoted, "\"users\"\"; DROP TABLE users; --\"");
        // The payload stays inside one quoted identifier.
        assert!(quoted.starts_with('"') && quoted.ends_with('"'));
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn missing_file_is_reported_before_touching_the_db(pool: sqlx::PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let err = execute_sql_file(&mut conn, Path::new("/nonexistent/schema.sql"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn rejected_batch_rolls_back(pool: sqlx::PgPool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.sql");
        std::fs::write(&path, "CREATE TABLE half_done (id INT); SELECT nope;").unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let err = execute_sql_file(&mut conn, &path).await.unwrap_err();
        assert!(matches!(err, Error::Execution(_)));

        // The failing batch must not leave the first statement behind.
        let tables = list_tables(&mut conn).await.unwrap();
        assert!(!tables.contains(&"half_done".to_string()));
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL server (DATABASE_URL)"]
    async fn good_batch_commits(pool: sqlx::PgPool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("good.sql");
        std::fs::write(&path, "CREATE TABLE batch_ok (id INT); INSERT INTO batch_ok VALUES (1);")
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        execute_sql_file(&mut conn, &path).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM batch_ok")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
