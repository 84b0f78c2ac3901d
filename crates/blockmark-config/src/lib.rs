use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read mentions file at {mentions_path}: {source}")]
    MentionsReadError {
        mentions_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse mentions file at {mentions_path}: {source}")]
    MentionsParseError {
        mentions_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Longest text run before it is split. `0` disables splitting.
    pub max_text_length: usize,
    pub default_code_language: String,
    /// TOML file with `[page]`, `[database]` and `[user]` tables of id = "name".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_text_length: 2000,
            default_code_language: "plain text".to_string(),
            mentions_path: None,
        }
    }
}

/// Display names for mentionable ids, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentionTable {
    pub page: BTreeMap<String, String>,
    pub database: BTreeMap<String, String>,
    pub user: BTreeMap<String, String>,
}

impl MentionTable {
    pub fn len(&self) -> usize {
        self.page.len() + self.database.len() + self.user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.mentions_path = config
            .mentions_path
            .map(|p| Self::expand_path(&p).unwrap_or(p));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/blockmark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Split limit, or `None` when splitting is disabled.
    pub fn max_text_length(&self) -> Option<usize> {
        (self.max_text_length > 0).then_some(self.max_text_length)
    }

    /// Reads the mention table named by `mentions_path`. Empty when none is configured.
    pub fn load_mentions(&self) -> Result<MentionTable, ConfigError> {
        let Some(mentions_path) = &self.mentions_path else {
            return Ok(MentionTable::default());
        };
        let content = std::fs::read_to_string(mentions_path).map_err(|source| {
            ConfigError::MentionsReadError {
                mentions_path: mentions_path.clone(),
                source,
            }
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::MentionsParseError {
            mentions_path: mentions_path.clone(),
            source,
        })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
