use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wish::io_adapters::{self, LineSource, ReaderSource};
use wish::{Config, Interpreter, error};

/// Environment variable holding the log filter, e.g. `WISH_LOG=debug`.
const LOG_ENV: &str = "WISH_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail() -> ExitCode {
    error::report(&mut io::stderr());
    ExitCode::FAILURE
}

/// Usage: `wish [script]`.
///
/// The single operand is always a file name, whatever it looks like; there are
/// no options. More than one operand is an error.
fn script_operand() -> Result<Option<PathBuf>, usize> {
    let mut operands = env::args_os().skip(1);
    match (operands.next(), operands.next()) {
        (None, _) => Ok(None),
        (Some(script), None) => Ok(Some(PathBuf::from(script))),
        (Some(_), Some(_)) => Err(2 + operands.count()),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let script = match script_operand() {
        Ok(script) => script,
        Err(count) => {
            debug!(count, "too many operands");
            return fail();
        }
    };
    let config = Config::default();

    let mut source: Box<dyn LineSource> = match &script {
        Some(script) => match ReaderSource::open(script) {
            Ok(source) => Box::new(source),
            Err(err) => {
                debug!(error = ?err, "batch mode unavailable");
                return fail();
            }
        },
        None => match io_adapters::interactive(&config.prompt) {
            Ok(source) => source,
            Err(err) => {
                debug!(error = ?err, "interactive mode unavailable");
                return fail();
            }
        },
    };

    let mut sh = Interpreter::with_config(&config);
    match sh.run(source.as_mut()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "input failed");
            fail()
        }
    }
}
