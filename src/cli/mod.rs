//! Line-oriented shell that drives a [`SplitSession`](crate::SplitSession).

mod commands;
pub mod context;
pub mod output;
mod registry;
mod shell;

pub use context::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
