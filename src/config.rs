//! Tree configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// When cached subtree digests are brought up to date
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestMode {
    /// Mark the mutated path stale and recompute on the next `hash()`
    #[default]
    Lazy,
    /// Recompute the mutated path right after every put or remove
    Eager,
}

/// Configuration for a [`RadixTree`](crate::RadixTree)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieConfig {
    #[serde(default)]
    pub digest_mode: DigestMode,
}

impl TrieConfig {
    pub fn eager() -> Self {
        TrieConfig {
            digest_mode: DigestMode::Eager,
        }
    }

    /// Parse a config from JSON text
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a config file, falling back to the default if it does not exist
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(crate::Error::Config(format!(
                "{} is not a file",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        debug!(path = %path.display(), mode = ?config.digest_mode, "loaded config");
        Ok(config)
    }

    /// Save the config as pretty-printed JSON
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_lazy() {
        assert_eq!(TrieConfig::default().digest_mode, DigestMode::Lazy);
        assert_eq!(TrieConfig::from_json("{}").unwrap(), TrieConfig::default());
    }

    #[test]
    fn test_from_json() {
        let config = TrieConfig::from_json(r#"{"digest_mode": "eager"}"#).unwrap();
        assert_eq!(config, TrieConfig::eager());

        assert!(matches!(
            TrieConfig::from_json(r#"{"digest_mode": "sometimes"}"#),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = TrieConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, TrieConfig::default());
    }

    #[test]
    fn test_load_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            TrieConfig::load(dir.path()),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trie.json");

        TrieConfig::eager().save(&path).unwrap();
        assert_eq!(TrieConfig::load(&path).unwrap(), TrieConfig::eager());
    }
}
