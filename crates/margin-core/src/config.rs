//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/margin/config.toml)
//! 3. Environment variables (MARGIN_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "MARGIN";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directories searched for note files
    #[serde(default = "default_notes_dirs")]
    pub notes_dirs: Vec<PathBuf>,

    /// Bibliography library file (citekey → resources)
    #[serde(default)]
    pub library: Option<PathBuf>,

    /// Note-file extensions included in searches
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dirs: default_notes_dirs(),
            library: None,
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load configuration from the default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (MARGIN_NOTES_DIR, MARGIN_LIBRARY)
    /// 2. Config file (~/.config/margin/config.toml or MARGIN_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // MARGIN_NOTES_DIR (colon-separated list)
        if let Ok(val) = std::env::var(format!("{}_NOTES_DIR", ENV_PREFIX)) {
            if !val.is_empty() {
                self.notes_dirs = val.split(':').map(PathBuf::from).collect();
            }
        }

        // MARGIN_LIBRARY
        if let Ok(val) = std::env::var(format!("{}_LIBRARY", ENV_PREFIX)) {
            self.library = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with the MARGIN_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("margin")
            .join("config.toml")
    }
}

/// Get the default note directories
fn default_notes_dirs() -> Vec<PathBuf> {
    vec![dirs::document_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notes")]
}

/// Get the default note-file extensions
fn default_extensions() -> Vec<String> {
    vec!["org".to_string(), "md".to_string(), "txt".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &["MARGIN_NOTES_DIR", "MARGIN_LIBRARY", "MARGIN_CONFIG"];

    #[test]
    fn test_default_config() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::default();
        assert!(config.library.is_none());
        assert_eq!(config.extensions, vec!["org", "md", "txt"]);
        assert_eq!(config.notes_dirs.len(), 1);
        assert!(config.notes_dirs[0].ends_with("notes"));
    }

    #[test]
    fn test_env_override_notes_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("MARGIN_NOTES_DIR", "/tmp/notes:/tmp/more-notes");
        config.apply_env_overrides();

        assert_eq!(
            config.notes_dirs,
            vec![PathBuf::from("/tmp/notes"), PathBuf::from("/tmp/more-notes")]
        );
    }

    #[test]
    fn test_env_override_library() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        assert!(config.library.is_none());

        env::set_var("MARGIN_LIBRARY", "/tmp/library.toml");
        config.apply_env_overrides();
        assert_eq!(config.library, Some(PathBuf::from("/tmp/library.toml")));

        // Empty string clears it
        env::set_var("MARGIN_LIBRARY", "");
        config.apply_env_overrides();
        assert!(config.library.is_none());
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            notes_dirs = ["/research/notes"]
            library = "/research/library.toml"
            extensions = ["org"]
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.notes_dirs, vec![PathBuf::from("/research/notes")]);
        assert_eq!(config.library, Some(PathBuf::from("/research/library.toml")));
        assert_eq!(config.extensions, vec!["org"]);
    }

    #[test]
    fn test_load_from_str_defaults_missing_fields() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::load_from_str("library = \"/tmp/library.toml\"").unwrap();
        assert_eq!(config.extensions, vec!["org", "md", "txt"]);
        assert!(!config.notes_dirs.is_empty());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert!(config.library.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "notes_dirs = [\"/research/notes\"]\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.notes_dirs, vec![PathBuf::from("/research/notes")]);
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            notes_dirs: vec![PathBuf::from("/research/notes")],
            library: Some(PathBuf::from("/research/library.toml")),
            extensions: vec!["org".to_string()],
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("notes_dirs"));
        assert!(toml_str.contains("library"));
        assert!(toml_str.contains("extensions"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.notes_dirs, config.notes_dirs);
        assert_eq!(parsed.library, config.library);
        assert_eq!(parsed.extensions, config.extensions);
    }
}
