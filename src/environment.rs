//! Environment access abstraction for path normalization.
//!
//! Tilde and `$VAR` expansion consult the process environment, which makes
//! them awkward to test directly. The `Environment` trait injects that
//! access the same way `FileSystem` injects file reads: production code
//! uses `SystemEnvironment`, tests use `FakeEnvironment` with a fixed
//! variable table, home directory, and working directory.

use std::collections::HashMap;
use std::path::PathBuf;

/// Trait for environment lookups - allows substitution in tests.
pub trait Environment: Send + Sync {
    /// Look up an environment variable.
    fn var(&self, key: &str) -> Option<String>;

    /// The user's home directory, used for `~` expansion.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The current working directory, used to anchor relative base paths.
    fn current_dir(&self) -> PathBuf;

    /// The platform configuration directory, used for config discovery.
    fn config_dir(&self) -> Option<PathBuf>;
}

/// The default implementation of `Environment`, backed by the process
/// environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn current_dir(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"))
    }

    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }
}

/// A fixed environment for tests.
#[derive(Debug, Clone, Default)]
pub struct FakeEnvironment {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
    cwd: Option<PathBuf>,
    config: Option<PathBuf>,
}

impl FakeEnvironment {
    /// Create an empty fake environment (no variables, no home directory,
    /// working directory `/`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable.
    pub fn set_var(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    /// Set the home directory.
    pub fn set_home<P: Into<PathBuf>>(&mut self, home: P) {
        self.home = Some(home.into());
    }

    /// Set the working directory.
    pub fn set_current_dir<P: Into<PathBuf>>(&mut self, cwd: P) {
        self.cwd = Some(cwd.into());
    }

    /// Set the configuration directory.
    pub fn set_config_dir<P: Into<PathBuf>>(&mut self, dir: P) {
        self.config = Some(dir.into());
    }
}

impl Environment for FakeEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn current_dir(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("/"))
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_environment_vars() {
        let mut env = FakeEnvironment::new();
        env.set_var("PROJECTS", "/home/user/projects");

        assert_eq!(env.var("PROJECTS"), Some("/home/user/projects".to_string()));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn test_fake_environment_home() {
        let mut env = FakeEnvironment::new();
        assert_eq!(env.home_dir(), None);

        env.set_home("/home/user");
        assert_eq!(env.home_dir(), Some(PathBuf::from("/home/user")));
    }

    #[test]
    fn test_fake_environment_cwd_default() {
        let env = FakeEnvironment::new();
        assert_eq!(env.current_dir(), PathBuf::from("/"));
    }

    #[test]
    fn test_fake_environment_config_dir() {
        let mut env = FakeEnvironment::new();
        assert_eq!(env.config_dir(), None);

        env.set_config_dir("/home/user/.config");
        assert_eq!(env.config_dir(), Some(PathBuf::from("/home/user/.config")));
    }

    #[test]
    fn test_system_environment_home_matches_dirs() {
        let env = SystemEnvironment;
        assert_eq!(env.home_dir(), dirs::home_dir());
        assert_eq!(env.config_dir(), dirs::config_dir());
    }
}
