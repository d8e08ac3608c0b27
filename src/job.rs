//! Spawning and joining external processes.

use crate::command::ExitCode;
use crate::error::ShellError;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{debug, trace};

/// Permission bits of a file created by redirection (before the umask).
pub const REDIRECT_FILE_MODE: u32 = 0o644;

/// A running external command.
///
/// The process is joined by [`Job::wait`]. Dropping a `Job` without waiting leaves
/// the process running unobserved, so callers keep jobs in a [`JobSet`].
#[derive(Debug)]
pub struct Job {
    name: String,
    child: Child,
}

impl Job {
    /// The command word the job was started with.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Blocks until the process terminates.
    pub fn wait(mut self) -> Result<ExitCode, ShellError> {
        let pid = self.id();
        let status = self
            .child
            .wait()
            .map_err(|source| ShellError::Wait { pid, source })?;
        let code = exit_code(status);
        debug!(pid, name = %self.name, code, "job finished");
        Ok(code)
    }
}

/// Opens (creating or truncating) the target of a `>` redirection.
pub fn open_redirect(path: &Path) -> Result<File, ShellError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(REDIRECT_FILE_MODE)
        .open(path)
        .map_err(|source| ShellError::Redirect {
            path: path.to_owned(),
            source,
        })
}

/// Starts `program` with `argv0` as its argument zero followed by `args`.
///
/// With a `redirect` target both stdout and stderr of the child go to that file;
/// otherwise the child inherits the interpreter's streams. Either the process is
/// running when this returns `Ok`, or nothing was started.
pub fn spawn(
    program: &Path,
    argv0: &str,
    args: &[String],
    redirect: Option<&Path>,
) -> Result<Job, ShellError> {
    let mut command = Command::new(program);
    command.arg0(argv0).args(args);

    if let Some(target) = redirect {
        let stdout = open_redirect(target)?;
        let stderr = stdout.try_clone().map_err(|source| ShellError::Redirect {
            path: target.to_owned(),
            source,
        })?;
        command.stdout(Stdio::from(stdout)).stderr(Stdio::from(stderr));
    }

    let child = command.spawn().map_err(|source| ShellError::Spawn {
        program: program.to_owned(),
        source,
    })?;
    // Closes our copies of the redirect descriptors; only the child holds them now.
    drop(command);

    debug!(pid = child.id(), program = %program.display(), ?redirect, "job spawned");
    Ok(Job {
        name: argv0.to_owned(),
        child,
    })
}

/// Jobs started by one input line.
///
/// All of them are joined before the set goes away, so no process outlives the
/// line that started it.
#[derive(Debug, Default)]
pub struct JobSet {
    jobs: Vec<Job>,
}

impl JobSet {
    pub fn push(&mut self, job: Job) {
        self.jobs.push(job);
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Waits for every job to terminate, whatever order they finish in.
    ///
    /// Results are returned in spawn order, paired with the job's command word.
    pub fn join_all(&mut self) -> Vec<(String, Result<ExitCode, ShellError>)> {
        trace!(count = self.jobs.len(), "joining jobs");
        self.jobs
            .drain(..)
            .map(|job| {
                let name = job.name().to_owned();
                (name, job.wait())
            })
            .collect()
    }
}

impl Drop for JobSet {
    fn drop(&mut self) {
        self.join_all();
    }
}

fn exit_code(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(code) = exit_status.code() {
        code
    } else if let Some(signal) = exit_status.signal() {
        128 + signal
    } else {
        -1
    }
}
