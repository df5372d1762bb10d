//! Library core for `deliveryctl`, the delivery platform's database
//! lifecycle tool.
//!
//! The binary in `src/main.rs` parses arguments and dispatches into
//! [`commands`], which builds each operation out of the connection and
//! SQL-batch helpers in [`db`]. Every command owns its connection for the
//! length of one invocation: connect at the start, close at the end,
//! regardless of outcome.

pub mod commands;
pub mod config;
pub mod confirm;
pub mod db;
pub mod errors;
pub mod password;
pub mod telemetry;

pub use config::{Cli, Command, Config};
pub use errors::{Error, Result};
