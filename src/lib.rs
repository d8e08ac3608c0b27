//! A small Unix command shell.
//!
//! Input is read one line at a time. A line is split on `&` into command groups,
//! each group may redirect its output with `> file`, and every group is either a
//! built-in (`exit`, `cd`, `path`) run inside the shell process or an external
//! program found on the shell's own search path. A line with several groups runs
//! them concurrently and waits for all of them before the next line is read.
//!
//! The main entry point is [`Interpreter`], which runs lines from any
//! [`io_adapters::LineSource`] using a set of pluggable factories. The public
//! modules [`command`] and [`env`] expose traits and types for implementing your
//! own commands and for inspecting interpreter state.
//!
//! Whatever goes wrong, the user only ever sees [`ERROR_MESSAGE`] on stderr.
//! Details are emitted as [`tracing`] events.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
pub mod job;
mod lexer;
pub mod parser;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{ERROR_MESSAGE, ShellError};

/// Just a convenient re-export of the line interpreter.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
