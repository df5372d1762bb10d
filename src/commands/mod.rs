//! The command engine: one module per user-facing operation.
//!
//! Every command follows the same linear shape: connect, do the work, close
//! the connection. The only branching is migrate's drop-script existence
//! check and cleanup's dry-run/confirmation gate.

pub mod cleanup;
pub mod migrate;
pub mod reset;
pub mod seed;
pub mod status;
