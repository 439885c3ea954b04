//! Default configuration file locations.
//!
//! This module centralizes config discovery so the CLI and library agree
//! on where configuration lives when no explicit path is given.

use crate::environment::Environment;
use crate::filesystem::FileSystem;
use std::path::PathBuf;

/// Discover configuration files in the conventional locations.
///
/// Checked in order:
/// - `~/.vcspull.yaml` and `~/.vcspull.json`
/// - `*.yaml`, `*.yml`, and `*.json` under the platform config directory
///   (`~/.config/vcspull` on Linux per XDG Base Directory)
///
/// Returns every file that exists, in that order. An empty result is not
/// an error here; callers decide whether a missing config is fatal.
pub fn find_configs(fs: &dyn FileSystem, env: &dyn Environment) -> Vec<PathBuf> {
    let mut found = Vec::new();

    if let Some(home) = env.home_dir() {
        for name in [".vcspull.yaml", ".vcspull.json"] {
            let candidate = home.join(name);
            if fs.exists(&candidate) {
                found.push(candidate);
            }
        }
    }

    if let Some(config_dir) = env.config_dir() {
        let dir = config_dir.join("vcspull");
        for pattern in ["*.yaml", "*.yml", "*.json"] {
            let glob = dir.join(pattern);
            if let Ok(mut matches) = fs.expand_glob(&glob.to_string_lossy()) {
                found.append(&mut matches);
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::FakeEnvironment;
    use crate::filesystem::MemoryFileSystem;

    #[test]
    fn test_find_configs_home_dotfile() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/home/user/.vcspull.yaml", "");
        let mut env = FakeEnvironment::new();
        env.set_home("/home/user");

        let found = find_configs(&fs, &env);
        assert_eq!(found, vec![PathBuf::from("/home/user/.vcspull.yaml")]);
    }

    #[test]
    fn test_find_configs_prefers_yaml_before_json() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/home/user/.vcspull.json", "{}");
        fs.add_file("/home/user/.vcspull.yaml", "");
        let mut env = FakeEnvironment::new();
        env.set_home("/home/user");

        let found = find_configs(&fs, &env);
        assert_eq!(found[0], PathBuf::from("/home/user/.vcspull.yaml"));
        assert_eq!(found[1], PathBuf::from("/home/user/.vcspull.json"));
    }

    #[test]
    fn test_find_configs_config_dir_scan() {
        let mut fs = MemoryFileSystem::new();
        fs.add_file("/home/user/.config/vcspull/work.yaml", "");
        fs.add_file("/home/user/.config/vcspull/personal.json", "{}");
        fs.add_file("/home/user/.config/other/skip.yaml", "");
        let mut env = FakeEnvironment::new();
        env.set_config_dir("/home/user/.config");

        let found = find_configs(&fs, &env);
        assert_eq!(
            found,
            vec![
                PathBuf::from("/home/user/.config/vcspull/work.yaml"),
                PathBuf::from("/home/user/.config/vcspull/personal.json"),
            ]
        );
    }

    #[test]
    fn test_find_configs_empty_when_nothing_exists() {
        let fs = MemoryFileSystem::new();
        let mut env = FakeEnvironment::new();
        env.set_home("/home/user");

        assert!(find_configs(&fs, &env).is_empty());
    }

    #[test]
    fn test_find_configs_without_home() {
        let fs = MemoryFileSystem::new();
        let env = FakeEnvironment::new();

        // No home directory known; discovery degrades to the config dir.
        let found = find_configs(&fs, &env);
        assert!(found.iter().all(|p| !p.starts_with("/home")));
    }
}
