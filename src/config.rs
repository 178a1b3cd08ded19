//! Configuration for the Zephyr assistant.
//!
//! Loaded from TOML. Every section is `#[serde(default)]`, so an empty file
//! yields the built-in household directory and default threshold.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contacts::{Contact, ContactDirectory, DEFAULT_THRESHOLD};
use crate::error::{Result, ZephyrError};
use crate::tools::{DEFAULT_TRAIN_ENDPOINT, ToolMode};

/// Environment variable overriding [`AssistantConfig::language`].
pub const LANGUAGE_ENV: &str = "PREFERRED_LANGUAGE";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZephyrConfig {
    /// Persona and tool access.
    pub assistant: AssistantConfig,
    /// Nickname resolution settings.
    pub resolver: ResolverConfig,
    /// Remote train-lookup server.
    pub trains: TrainsConfig,
    /// Contact directory, in tie-break order.
    pub contacts: Vec<Contact>,
}

impl Default for ZephyrConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig::default(),
            resolver: ResolverConfig::default(),
            trains: TrainsConfig::default(),
            contacts: default_contacts(),
        }
    }
}

/// Persona and tool access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Name the assistant introduces itself with.
    pub name: String,
    /// Language the assistant answers in.
    pub language: String,
    /// Whether mutating tools are exposed.
    pub tool_mode: ToolMode,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "Zephyr".to_owned(),
            language: "English".to_owned(),
            tool_mode: ToolMode::Full,
        }
    }
}

/// Nickname resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum composite score (0..=100) for a match.
    pub threshold: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Remote train-lookup server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainsConfig {
    /// MCP streamable-HTTP endpoint.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TrainsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRAIN_ENDPOINT.to_owned(),
            timeout_secs: 10,
        }
    }
}

fn default_contacts() -> Vec<Contact> {
    vec![
        Contact::new("001", "lal", "lal@example.com", "Aurelie Nys"),
        Contact::new("002", "basile", "basile@example.com", "Basile Vinchon-Nys"),
        Contact::new("003", "seb", "seb@example.com", "Sebastien Vinchon"),
        Contact::new("004", "gigi", "gigi@example.com", "Guillaume Vinchon"),
    ]
}

impl ZephyrConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ZephyrError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ZephyrError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/zephyr/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::env::temp_dir().join("zephyr-config"))
            .join("zephyr")
            .join("config.toml")
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_language_override(std::env::var(LANGUAGE_ENV).ok());
    }

    fn apply_language_override(&mut self, language: Option<String>) {
        if let Some(lang) = language.filter(|l| !l.trim().is_empty()) {
            tracing::debug!(language = %lang, "language overridden from environment");
            self.assistant.language = lang.trim().to_owned();
        }
    }

    /// Check cross-field invariants and build the contact directory.
    ///
    /// # Errors
    ///
    /// Returns [`ZephyrError::Config`] for an out-of-range threshold, a blank
    /// assistant name or language, or a zero train timeout, and
    /// [`ZephyrError::Directory`] when the contacts are invalid.
    pub fn validate(&self) -> Result<ContactDirectory> {
        zephyr_match::validate_threshold(self.resolver.threshold)
            .map_err(|e| ZephyrError::Config(format!("resolver.threshold: {e}")))?;
        if self.assistant.name.trim().is_empty() {
            return Err(ZephyrError::Config("assistant.name must not be empty".to_owned()));
        }
        if self.assistant.language.trim().is_empty() {
            return Err(ZephyrError::Config(
                "assistant.language must not be empty".to_owned(),
            ));
        }
        if self.trains.timeout_secs == 0 {
            return Err(ZephyrError::Config(
                "trains.timeout_secs must be at least 1".to_owned(),
            ));
        }
        Ok(ContactDirectory::new(self.contacts.clone())?)
    }
}
