//! Project-level configuration.
//!
//! Projects opt into extra provisioning by checking a `.grove.toml` into the
//! repository root:
//!
//! ```toml
//! post-create-commands = [
//!     "composer install",
//!     "npm install",
//! ]
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Config file name, looked up in the repository root.
pub const CONFIG_FILE: &str = ".grove.toml";

/// Per-project settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectConfig {
    /// Shell commands run inside a worktree right after it is provisioned.
    #[serde(default, rename = "post-create-commands")]
    pub post_create_commands: Vec<String>,

    /// Unrecognized keys, captured so callers can warn about typos instead
    /// of silently ignoring them.
    #[serde(flatten, default)]
    unknown: HashMap<String, toml::Value>,
}

impl ProjectConfig {
    /// Load `.grove.toml` from the repository root. A missing file is the
    /// default (empty) configuration, not an error.
    pub fn load(repo_root: &Path) -> Result<Self, ConfigError> {
        let path = repo_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| ConfigError(format!("Failed to read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Keys present in the file that grove does not recognize, sorted for
    /// stable warning output.
    pub fn unknown_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.unknown.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Failure to read or parse a project config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert!(config.post_create_commands.is_empty());
    }

    #[test]
    fn test_empty_file_parses_to_default() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_parses_post_create_commands() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "post-create-commands = [\"composer install\", \"npm install\"]\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(
            config.post_create_commands,
            vec!["composer install", "npm install"]
        );
        assert!(config.unknown_keys().is_empty());
    }

    #[test]
    fn test_captures_unknown_keys() {
        let config: ProjectConfig = toml::from_str(
            "post-create-commands = []\npost-crete-commands = [\"typo\"]\nextra = 1\n",
        )
        .unwrap();
        assert_eq!(config.unknown_keys(), vec!["extra", "post-crete-commands"]);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "post-create-commands = [\n").unwrap();

        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let result: Result<ProjectConfig, _> = toml::from_str("post-create-commands = \"one\"");
        assert!(result.is_err());
    }
}
