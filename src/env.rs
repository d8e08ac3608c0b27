use crate::config::Config;

/// Ordered list of directories searched for external commands.
///
/// Order is search priority. Duplicates are kept. An empty search path is valid
/// and means no bare command name resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<String>,
    defaults: Vec<String>,
}

impl SearchPath {
    /// Create a search path whose default (and initial) contents are `defaults`.
    pub fn new(defaults: Vec<String>) -> Self {
        Self {
            dirs: defaults.clone(),
            defaults,
        }
    }

    /// Restore the default directories, dropping whatever was set before.
    pub fn reset_to_default(&mut self) {
        self.dirs.clone_from(&self.defaults);
    }

    /// Discard every entry and install `dirs` in the given order.
    pub fn replace(&mut self, dirs: Vec<String>) {
        self.dirs = dirs;
    }

    /// The directories, highest priority first.
    pub fn directories(&self) -> &[String] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::new(Config::default().default_path)
    }
}

/// Mutable engine state shared by all commands.
///
/// The environment contains:
/// - `search_path`: directories consulted when resolving bare command names.
/// - `echo_path`: whether `path` reports the directories it installs.
/// - `should_exit`: set by `exit`; the interpreter stops once it sees it.
///
/// The working directory is not stored here: it is process state, changed by
/// `cd` and inherited by every spawned child.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub search_path: SearchPath,
    pub echo_path: bool,
    pub should_exit: bool,
}

impl Environment {
    /// Build the startup state described by `config`.
    pub fn new(config: &Config) -> Self {
        let mut search_path = SearchPath::new(config.default_path.clone());
        search_path.reset_to_default();
        Self {
            search_path,
            echo_path: config.echo_path,
            should_exit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_bin() {
        let env = Environment::new(&Config::default());
        assert_eq!(env.search_path.directories(), ["/bin"]);
        assert!(!env.should_exit);
    }

    #[test]
    fn replace_keeps_order_and_duplicates() {
        let mut path = SearchPath::default();
        path.replace(vec!["/usr/bin".into(), "/bin".into(), "/usr/bin".into()]);
        assert_eq!(path.directories(), ["/usr/bin", "/bin", "/usr/bin"]);
    }

    #[test]
    fn replace_with_nothing_empties_the_path() {
        let mut path = SearchPath::default();
        path.replace(Vec::new());
        assert!(path.is_empty());
        assert!(path.directories().is_empty());
    }

    #[test]
    fn reset_restores_configured_default() {
        let config = Config::default().with_default_path(["/opt/bin"]);
        let mut env = Environment::new(&config);
        env.search_path.replace(vec!["/tmp".into()]);
        env.search_path.reset_to_default();
        assert_eq!(env.search_path.directories(), ["/opt/bin"]);
    }
}
