use crate::command::{CommandFactory, Invocation, Outcome};
use crate::config::Config;
use crate::env::Environment;
use crate::error::{self, ShellError};
use crate::io_adapters::LineSource;
use crate::job::JobSet;
use crate::parser::{self, CommandGroup};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate: builtins and `ExternalCommand`.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A line-oriented interpreter that runs built-in and external commands.
///
/// The interpreter owns an [`Environment`] and a list of [`CommandFactory`] objects
/// that are queried, in order, to create commands by name. The first factory that
/// recognizes a name wins; when none does, the command is reported as not found.
///
/// Example
/// ```
/// use wish::{Config, Interpreter};
/// let mut sh = Interpreter::with_config(&Config::default());
/// sh.run_line("path /usr/bin /bin");
/// assert_eq!(sh.environment().search_path.directories(), ["/usr/bin", "/bin"]);
/// sh.run_line("exit");
/// assert!(sh.should_exit());
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(config: &Config, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(config),
            commands,
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Create an interpreter with the default set of commands:
    /// - built-ins: `exit`, `cd`, `path`
    /// - external command launcher
    pub fn with_config(config: &Config) -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(
            config,
            vec![
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Path>::default()),
                Box::new(Factory::<ExternalCommand>::default()),
            ],
        )
    }

    /// Send builtin output and error reports somewhere other than the process streams.
    ///
    /// External commands always inherit the real process streams.
    pub fn with_output(mut self, stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
        self.stdout = stdout;
        self.stderr = stderr;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// True once `exit` has run.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Reads and runs lines until the input ends or `exit` runs.
    ///
    /// Only a failure of the line source itself is returned; command errors are
    /// reported on the error stream and the loop goes on.
    pub fn run(&mut self, source: &mut dyn LineSource) -> anyhow::Result<()> {
        while !self.env.should_exit {
            let Some(line) = source.next_line()? else {
                debug!("end of input");
                break;
            };
            self.run_line(&line);
        }
        Ok(())
    }

    /// Runs every command group of `line` and waits for all processes it started.
    ///
    /// A single group runs in the foreground. Several groups are dispatched left
    /// to right without waiting in between, then joined together. Errors affect
    /// only the group that caused them. After `exit`, the rest of the line is
    /// skipped but processes already started are still joined.
    pub fn run_line(&mut self, line: &str) {
        let mut jobs = JobSet::default();

        for group in parser::parse_line(line) {
            let result = group
                .map_err(ShellError::from)
                .and_then(|group| self.dispatch(&group));
            match result {
                Ok(Outcome::Spawned(job)) => jobs.push(job),
                Ok(Outcome::Completed(code)) => debug!(code, "command completed"),
                Err(err) => self.report(&err),
            }
            if self.env.should_exit {
                break;
            }
        }

        for (name, result) in jobs.join_all() {
            match result {
                Ok(code) => debug!(command = %name, code, "background command finished"),
                Err(err) => self.report(&err),
            }
        }
        if let Err(err) = self.stdout.flush() {
            self.report(&err.into());
        }
    }

    fn dispatch(&mut self, group: &CommandGroup) -> Result<Outcome, ShellError> {
        let name = group.name();
        let args = group.args();
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, &args) {
                debug!(command = name, mode = ?group.mode, redirect = ?group.redirect, "dispatching");
                let invocation = Invocation {
                    redirect: group.redirect.as_deref(),
                    mode: group.mode,
                    stdout: &mut *self.stdout,
                };
                return cmd.execute(invocation, &mut self.env);
            }
        }
        Err(ShellError::NotFound(name.to_owned()))
    }

    fn report(&mut self, err: &ShellError) {
        warn!(error = %err, source = ?std::error::Error::source(err), "command failed");
        error::report(&mut *self.stderr);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}
