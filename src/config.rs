/// Prompt printed before each interactive read.
pub const DEFAULT_PROMPT: &str = "wish> ";

/// Directory the search path holds at startup.
pub const DEFAULT_SEARCH_DIR: &str = "/bin";

/// Engine settings.
///
/// The `wish` binary always runs with [`Config::default`]; the setters exist for
/// embedding and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Printed before each read in interactive mode.
    pub prompt: String,
    /// Search path installed at startup and by `SearchPath::reset_to_default`.
    pub default_path: Vec<String>,
    /// When set, `path` prints `new path: <dir>` for every directory it installs.
    pub echo_path: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            default_path: vec![DEFAULT_SEARCH_DIR.to_string()],
            echo_path: false,
        }
    }
}

impl Config {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_default_path<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_path = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_echo_path(mut self, echo: bool) -> Self {
        self.echo_path = echo;
        self
    }
}
