use crate::command::{CommandFactory, ExecutableCommand, ExitCode, Invocation, Outcome};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::job;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Ends option parsing so every token reaches the builtin as an operand.
const END_OF_OPTIONS: &str = "--";

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process. Parsing enforces their arity.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "path".
    fn name() -> &'static str;

    /// Executes the command, writing any output to `stdout`.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode, ShellError>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        invocation: Invocation<'_>,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        let code = match invocation.redirect {
            Some(target) => {
                let mut file = job::open_redirect(target)?;
                T::execute(*self, &mut file, env)?
            }
            None => T::execute(*self, invocation.stdout, env)?,
        };
        Ok(Outcome::Completed(code))
    }
}

/// Stand-in for a builtin whose arguments did not parse.
struct InvalidArgs {
    command: &'static str,
    output: String,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _invocation: Invocation<'_>,
        _env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        Err(ShellError::InvalidArguments {
            command: self.command,
            reason: self.output.trim_end().to_string(),
        })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name != T::name() {
            return None;
        }
        let operands: Vec<&str> = std::iter::once(END_OF_OPTIONS)
            .chain(args.iter().copied())
            .collect();
        Some(match T::from_args(&[name], &operands) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, .. }) => Box::new(InvalidArgs {
                command: T::name(),
                output,
            }),
        })
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode, ShellError> {
        env.should_exit = true;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode, ShellError> {
        let target = PathBuf::from(self.target);
        env::set_current_dir(&target).map_err(|source| ShellError::ChangeDir {
            path: target.clone(),
            source,
        })?;
        debug!(dir = %target.display(), "changed directory");
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Replace the directories searched for external commands.
pub struct Path {
    #[argh(positional, greedy)]
    /// new search directories, highest priority first. None empties the search path.
    pub dirs: Vec<String>,
}

impl BuiltinCommand for Path {
    fn name() -> &'static str {
        "path"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode, ShellError> {
        if env.echo_path {
            for dir in &self.dirs {
                writeln!(stdout, "new path: {dir}")?;
            }
        }
        debug!(dirs = ?self.dirs, "search path replaced");
        env.search_path.replace(self.dirs);
        Ok(0)
    }
}
