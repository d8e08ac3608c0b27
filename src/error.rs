use crate::parser::ParsingError;
use std::io::{self, Write};
use std::path::PathBuf;

/// The only text ever shown to the user for a runtime error.
pub const ERROR_MESSAGE: &str = "An error has occurred";

/// Errors raised while running a single command group.
///
/// The variants carry enough detail for logs. None of it reaches the user,
/// who only ever sees [`ERROR_MESSAGE`].
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("invalid command syntax: {0}")]
    Syntax(#[from] ParsingError),

    #[error("{command}: invalid arguments: {reason}")]
    InvalidArguments {
        command: &'static str,
        reason: String,
    },

    #[error("{0}: command not found")]
    NotFound(String),

    #[error("cd: can't chdir to {}", path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't open {} for redirection", path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for process {pid}")]
    Wait {
        pid: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Writes the fixed error line to `stderr`.
pub fn report(stderr: &mut dyn Write) {
    // Nothing sensible is left to do if stderr itself is gone.
    let _ = writeln!(stderr, "{ERROR_MESSAGE}");
    let _ = stderr.flush();
}
