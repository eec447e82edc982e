use std::{io, path::Path};

use serde::{Deserialize, Serialize};

use crate::domain::reference::{ReferenceDetector, KEYWORDS};

/// Configuration for an extraction run.
///
/// This struct holds settings that control how records are extracted,
/// independent of where they are read from or written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The reference-introducing keywords, in scan order.
    ///
    /// Matches are reported grouped by keyword in this order.
    /// If this is empty, the canonical vocabulary is used.
    keywords: Vec<String>,

    /// Whether to extract records in parallel.
    ///
    /// Output order and sequence indices are the same either way.
    pub parallel: bool,
}

/// Errors that can occur while loading or saving a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file")]
    Read(#[source] io::Error),
    /// The config file is not valid TOML for any known version.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
    /// The config file could not be written.
    #[error("failed to write config file")]
    Write(#[source] io::Error),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            parallel: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Returns the keyword vocabulary, in scan order.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Replaces the keyword vocabulary.
    ///
    /// Keywords are lowercased and blank entries dropped. An empty list
    /// restores the canonical vocabulary.
    pub fn set_keywords<I: IntoIterator<Item = String>>(&mut self, keywords: I) {
        let keywords: Vec<_> = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self.keywords = if keywords.is_empty() {
            default_keywords()
        } else {
            keywords
        };
    }

    /// Builds a reference detector for the configured vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if a keyword pattern cannot be compiled.
    pub fn reference_detector(&self) -> Result<ReferenceDetector, regex::Error> {
        ReferenceDetector::new(self.keywords.iter().cloned())
    }
}

fn default_keywords() -> Vec<String> {
    KEYWORDS.iter().map(ToString::to_string).collect()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// Reference keywords, in scan order.
        ///
        /// An empty or absent list means the canonical vocabulary.
        #[serde(default)]
        keywords: Vec<String>,

        #[serde(default)]
        parallel: bool,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { keywords, parallel } => {
                let mut config = Self {
                    keywords: Vec::new(),
                    parallel,
                };
                config.set_keywords(keywords);
                config
            }
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        let keywords = if config.keywords == default_keywords() {
            Vec::new()
        } else {
            config.keywords
        };
        Self::V1 {
            keywords,
            parallel: config.parallel,
        }
    }
}
