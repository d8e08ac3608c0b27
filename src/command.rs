use crate::env::Environment;
use crate::error::ShellError;
use crate::job::Job;
use std::io::Write;
use std::path::Path;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// How an external command is started relative to the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// The only command on its line: wait for it before returning.
    Foreground,
    /// One of several commands on a line: return as soon as it is running.
    Background,
}

/// Everything a command needs to know about the place it runs in.
pub struct Invocation<'a> {
    /// File that receives stdout and stderr instead of the interpreter's streams.
    pub redirect: Option<&'a Path>,
    pub mode: LaunchMode,
    /// The interpreter's standard output, used by builtins when not redirected.
    pub stdout: &'a mut dyn Write,
}

/// What running a command left behind.
#[derive(Debug)]
pub enum Outcome {
    /// The command has finished.
    Completed(ExitCode),
    /// A child process is still running and must be joined by the caller.
    Spawned(Job),
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// This is implemented by built-ins via a blanket impl and by external commands.
pub trait ExecutableCommand {
    /// Executes the command.
    fn execute(
        self: Box<Self>,
        invocation: Invocation<'_>,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
/// Implementations can use the environment to resolve executables (e.g., using the search path).
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
