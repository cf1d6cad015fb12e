//! Connection settings for the Firestore provider.
//!
//! Settings come from a JSON file (by default `firestore.json` in the
//! platform config directory) and/or `SUPPORTKIT_FIRESTORE_*` environment
//! variables. Only the project id is required.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const DEFAULT_DATABASE: &str = "(default)";
const DEFAULT_COLLECTION: &str = "support_feedback";
const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_PROJECT: &str = "SUPPORTKIT_FIRESTORE_PROJECT";
const ENV_DATABASE: &str = "SUPPORTKIT_FIRESTORE_DATABASE";
const ENV_COLLECTION: &str = "SUPPORTKIT_FIRESTORE_COLLECTION";
const ENV_BASE_URL: &str = "SUPPORTKIT_FIRESTORE_BASE_URL";
const ENV_API_KEY: &str = "SUPPORTKIT_FIRESTORE_API_KEY";
const ENV_TOKEN: &str = "SUPPORTKIT_FIRESTORE_TOKEN";
const ENV_TIMEOUT_SECS: &str = "SUPPORTKIT_FIRESTORE_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirestoreSettings {
    pub project_id: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_database() -> String {
    DEFAULT_DATABASE.into()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.into()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl FirestoreSettings {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: default_database(),
            collection: default_collection(),
            base_url: default_base_url(),
            api_key: None,
            bearer_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// `<config dir>/firestore.json`, e.g. `~/.config/supportkit/firestore.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "supportkit")
            .map(|dirs| dirs.config_dir().join("firestore.json"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Loads the default settings file, then applies environment overrides.
    /// Falls back to the environment alone when the file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using environment");
            return Self::from_env();
        }

        tracing::debug!(path = %path.display(), "loading Firestore settings");
        Self::load(&path)?.with_overrides(env_lookup)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.checked()
    }

    /// Builds settings purely from `SUPPORTKIT_FIRESTORE_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let project_id = lookup(ENV_PROJECT).ok_or(ConfigError::Missing(ENV_PROJECT))?;
        Self::new(project_id).with_overrides(lookup)
    }

    pub(crate) fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(project_id) = lookup(ENV_PROJECT) {
            self.project_id = project_id;
        }
        if let Some(database) = lookup(ENV_DATABASE) {
            self.database = database;
        }
        if let Some(collection) = lookup(ENV_COLLECTION) {
            self.collection = collection;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.bearer_token = Some(token);
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: ENV_TIMEOUT_SECS,
                value,
            })?;
        }
        self.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Missing("project_id"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "timeout_secs",
                value: "0".into(),
            });
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// REST path of the document a record with `id` is written to.
    pub fn document_url(&self, id: Uuid) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database,
            self.collection,
            id
        )
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
