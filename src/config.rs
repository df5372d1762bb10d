//! CLI arguments and runtime configuration.
//!
//! The database URL is resolved from the `--db-url` flag first, then the
//! `DATABASE_URL` environment variable (populated from `.env` by `main`
//! before parsing). Resolution fails fast, before any connection attempt.

use std::env;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::errors::{Error, Result};

/// Default schema location, relative to the project root.
pub const DEFAULT_SCHEMA_PATH: &str = "backend/sql/schema.sql";

/// The drop script is expected next to the schema file.
pub const DROP_SCRIPT_NAME: &str = "drop_all.sql";

#[derive(Parser, Debug)]
#[command(name = "deliveryctl", version, about, long_about = None)]
pub struct Cli {
    /// Database connection URL (defaults to the DATABASE_URL environment variable)
    #[arg(long, global = true, value_name = "URL")]
    pub db_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drop existing objects (when drop_all.sql is present) and apply the schema file
    Migrate {
        /// Path to the schema file
        #[arg(long, value_name = "PATH", default_value = DEFAULT_SCHEMA_PATH)]
        schema: PathBuf,
    },

    /// Drop every table and enum type in the public schema
    Reset,

    /// Report server version, tables with sizes and row counts, and enum types
    Status,

    /// Insert the fixed set of sample users and their profile rows
    Seed,

    /// Delete menus that have no restaurant association (dry-run by default)
    CleanupOrphanedMenus {
        /// Actually delete the orphaned menus instead of only reporting them
        #[arg(long)]
        execute: bool,
    },
}

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
}

impl Config {
    pub fn resolve(db_url: Option<String>) -> Result<Self> {
        let database_url = match db_url {
            Some(url) => url,
            None => env::var("DATABASE_URL").map_err(|_| Error::MissingDatabaseUrl)?,
        };
        Ok(Self { database_url })
    }
}

/// Resolve a schema path against the current working directory.
pub fn resolve_schema_path(schema: &Path) -> PathBuf {
    if schema.is_absolute() {
        schema.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(schema))
            .unwrap_or_else(|_| schema.to_path_buf())
    }
}

/// Sibling `drop_all.sql` path for a resolved schema path.
pub fn drop_script_path(schema: &Path) -> PathBuf {
    schema.with_file_name(DROP_SCRIPT_NAME)
}
