use crate::command::{CommandFactory, ExecutableCommand, Invocation, LaunchMode, Outcome};
use crate::env::{Environment, SearchPath};
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::job;
use nix::unistd::{AccessFlags, access};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Command that is not a builtin.
#[derive(Debug)]
pub struct ExternalCommand {
    program: PathBuf,
    name: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// `program` is the resolved executable, `name` the word the user typed.
    pub fn new(program: PathBuf, name: String, args: Vec<String>) -> Self {
        Self {
            program,
            name,
            args,
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let program = find_command_path(&env.search_path, name).ok()?;
        Some(Box::new(ExternalCommand::new(
            program,
            name.to_owned(),
            args.iter().map(|x| x.to_string()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        invocation: Invocation<'_>,
        _env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        // Anything we buffered must land before the child starts writing.
        invocation.stdout.flush()?;
        let job = job::spawn(&self.program, &self.name, &self.args, invocation.redirect)?;
        match invocation.mode {
            LaunchMode::Foreground => job.wait().map(Outcome::Completed),
            LaunchMode::Background => Ok(Outcome::Spawned(job)),
        }
    }
}

/// Resolve a command word to an executable the way this shell does.
///
/// Behavior:
/// - A word containing `/` (absolute or relative path) is used as is if it is
///   executable; the search path is not consulted.
/// - Any other word is joined to each directory of `search_path`, in order, and
///   the first executable candidate wins.
/// - An empty word or an empty search path never resolves.
pub fn find_command_path(
    search_path: &SearchPath,
    command: &str,
) -> Result<PathBuf, ShellError> {
    let not_found = || ShellError::NotFound(command.to_owned());

    if command.is_empty() {
        return Err(not_found());
    }

    if command.contains('/') {
        let path = PathBuf::from(command);
        return if is_executable(&path) {
            Ok(path)
        } else {
            Err(not_found())
        };
    }

    for dir in search_path.directories() {
        let candidate = PathBuf::from(format!("{dir}/{command}"));
        trace!(candidate = %candidate.display(), "probing");
        if is_executable(&candidate) {
            return Ok(candidate);
        }
    }
    Err(not_found())
}

/// A regular file the current process may execute.
fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}
