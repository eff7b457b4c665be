//! Thin command-line front end over the query engine
//!
//! Owns everything the library refuses to do: printing, logging setup and
//! choosing exit codes.

pub mod commands;

pub use commands::{Cli, Commands, run};
