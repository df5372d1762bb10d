//! Error taxonomy for the CLI.
//!
//! Every command returns [`Result`]; `main` is the only place errors are
//! printed and turned into a process exit code. Mid-command query failures
//! convert from [`sqlx::Error`] into [`Error::Execution`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No `--db-url` flag and no `DATABASE_URL` in the environment.
    #[error("no database URL configured: pass --db-url or set DATABASE_URL")]
    MissingDatabaseUrl,

    /// The server is unreachable or rejected the credentials.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A schema or drop script path does not exist.
    #[error("SQL file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The engine rejected a statement batch; the active transaction is
    /// rolled back before this is returned.
    #[error("SQL execution failed: {0}")]
    Execution(#[from] sqlx::Error),

    /// The operator declined the cleanup confirmation prompt.
    #[error("cleanup cancelled by user")]
    Aborted,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
