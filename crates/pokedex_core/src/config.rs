//! Run configuration.
//!
//! # Responsibility
//! - Describe where records come from, how logs are written and what the
//!   tour demonstrates.
//! - Load that description from an optional JSON file.
//!
//! # Invariants
//! - Every field has a default; an empty `{}` file is a valid configuration.
//! - A configuration returned by `load_config` has passed `validate()`.

use crate::logging::default_log_level;
use crate::model::record::Record;
use crate::model::weight::WeightPolicy;
use crate::source::{JsonDocumentSource, DEFAULT_LIST_FIELD};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_SOURCE_FILE: &str = "pokedex_database.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// Top-level configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PokedexConfig {
    pub source: SourceConfig,
    pub log: LogConfig,
    pub weight_policy: WeightPolicy,
    pub tour: TourSettings,
}

/// Location of the record document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub list_field: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SOURCE_FILE),
            list_field: DEFAULT_LIST_FIELD.to_string(),
        }
    }
}

/// Logging level and destination. `dir = None` logs to stderr.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

/// What the guided tour filters, tests and edits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TourSettings {
    /// Tags shown as full filtered lists, in order.
    pub filter_tags: Vec<String>,
    /// Tag used for the first-match lookup.
    pub find_tag: String,
    /// Tag used for the existence check.
    pub any_tag: String,
    /// Tag whose records greet themselves at the end.
    pub greet_tag: String,
    /// Threshold for the every-record weight check.
    pub min_weight: f64,
    /// Record pushed at the end of the collection.
    pub appended: Record,
    /// Record spliced over the appended one.
    pub replacement: Record,
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            filter_tags: vec!["Fire".to_string(), "Grass".to_string()],
            find_tag: "Water".to_string(),
            any_tag: "Dragon".to_string(),
            greet_tag: "Grass".to_string(),
            min_weight: 10.0,
            appended: Record::new(152, "Tortank Gigamax", ["Water"]),
            replacement: Record::new(152, "Charizard Gigamax", ["Fire"]),
        }
    }
}

impl PokedexConfig {
    /// Checks cross-field invariants not expressible through serde defaults.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.source.list_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "source.list_field cannot be empty".to_string(),
            ));
        }

        let tour = &self.tour;
        let named_tags = [
            ("tour.find_tag", &tour.find_tag),
            ("tour.any_tag", &tour.any_tag),
            ("tour.greet_tag", &tour.greet_tag),
        ];
        for (name, tag) in named_tags {
            if tag.is_empty() {
                return Err(ConfigError::Invalid(format!("{name} cannot be empty")));
            }
        }
        if tour.filter_tags.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid(
                "tour.filter_tags cannot contain empty tags".to_string(),
            ));
        }
        if !tour.min_weight.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "tour.min_weight must be finite, got {}",
                tour.min_weight
            )));
        }

        Ok(())
    }

    /// Builds the document source described by `source` and `weight_policy`.
    pub fn record_source(&self) -> JsonDocumentSource {
        JsonDocumentSource::new(self.source.path.clone())
            .with_list_field(self.source.list_field.clone())
            .with_weight_policy(self.weight_policy)
    }
}

/// Reads and validates a JSON configuration file.
///
/// # Errors
/// - `Read` when the file cannot be read.
/// - `Parse` when it is not a valid configuration document.
/// - `Invalid` when `validate()` rejects the decoded values.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<PokedexConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PokedexConfig =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
