use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};
use thiserror::Error;

use crate::{
    types::{CredentialSection, Credentials},
    warning,
};

pub const CREDENTIALS_SECTION: &str = "spotify";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("credentials file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read credentials file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credentials file {} is not valid: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("credentials file {} has no 'spotify' section", .path.display())]
    MissingSection { path: PathBuf },

    #[error("missing required field '{field}' in credentials file {}", .path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("cannot write credentials file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode credentials document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// File-backed store for the credential document.
///
/// The document is a JSON object whose `spotify` section holds the client
/// identity, the cached access token and the playlist configuration. Every
/// call goes back to disk so edits made while the player runs (most notably
/// flipping `enabled`) are picked up.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the credential section.
    ///
    /// `client_id`, `client_secret`, `podcast_id`, `episode_ids` and
    /// `device_id` must be present and non-empty. A blank `access_token` is
    /// treated as absent and a missing `enabled` flag as `false`.
    pub async fn load(&self) -> Result<Credentials, ConfigError> {
        let document = self.read_document().await?;
        let section = document
            .get(CREDENTIALS_SECTION)
            .ok_or_else(|| ConfigError::MissingSection {
                path: self.path.clone(),
            })?;
        let section: CredentialSection =
            serde_json::from_value(section.clone()).map_err(|e| ConfigError::Malformed {
                path: self.path.clone(),
                source: e,
            })?;

        let episode_ids = section
            .episode_ids
            .filter(|ids| !ids.is_empty() && ids.iter().all(|id| !id.trim().is_empty()))
            .ok_or_else(|| self.missing("episode_ids"))?;

        Ok(Credentials {
            client_id: self.required(section.client_id, "client_id")?,
            client_secret: self.required(section.client_secret, "client_secret")?,
            podcast_id: self.required(section.podcast_id, "podcast_id")?,
            episode_ids,
            device_id: self.required(section.device_id, "device_id")?,
            access_token: section.access_token.filter(|t| !t.trim().is_empty()),
            enabled: section.enabled.unwrap_or(false),
        })
    }

    /// Stores `token` as the cached access token.
    ///
    /// Only `spotify.access_token` changes; every other key keeps its value and
    /// position. A missing or unparsable document is replaced by a fresh one
    /// holding just the token. The new content is written to a sibling
    /// temporary file and renamed over the document.
    pub async fn persist_token(&self, token: &str) -> Result<(), ConfigError> {
        let mut document = match self.read_document().await {
            Ok(document) => document,
            Err(ConfigError::NotFound { .. }) | Err(ConfigError::Malformed { .. }) => Map::new(),
            Err(e) => return Err(e),
        };

        let section = document
            .entry(CREDENTIALS_SECTION)
            .or_insert_with(|| Value::Object(Map::new()));
        if !section.is_object() {
            *section = Value::Object(Map::new());
        }
        if let Value::Object(fields) = section {
            fields.insert("access_token".to_string(), Value::String(token.to_string()));
        }

        self.write_document(&document).await
    }

    /// Reads the `enabled` kill-switch.
    ///
    /// Never fails: an unreadable document, a malformed document or a
    /// non-boolean value all count as disabled, with a warning.
    pub async fn is_enabled(&self) -> bool {
        let document = match self.read_document().await {
            Ok(document) => document,
            Err(e) => {
                warning!("Could not read the credentials file: {}", e);
                return false;
            }
        };

        match document
            .get(CREDENTIALS_SECTION)
            .and_then(|section| section.get("enabled"))
        {
            Some(Value::Bool(enabled)) => *enabled,
            None | Some(Value::Null) => false,
            Some(other) => {
                warning!(
                    "Ignoring non-boolean 'enabled' value {} in {}",
                    other,
                    self.path.display()
                );
                false
            }
        }
    }

    async fn read_document(&self) -> Result<Map<String, Value>, ConfigError> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ConfigError::NotFound {
                    path: self.path.clone(),
                },
                _ => ConfigError::Io {
                    path: self.path.clone(),
                    source: e,
                },
            })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
            path: self.path.clone(),
            source: e,
        })
    }

    async fn write_document(&self, document: &Map<String, Value>) -> Result<(), ConfigError> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        document
            .serialize(&mut serializer)
            .map_err(ConfigError::Encode)?;

        let write_err = |e| ConfigError::Write {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let tmp_path = self.tmp_path();
        async_fs::write(&tmp_path, buf).await.map_err(write_err)?;
        if let Err(e) = async_fs::rename(&tmp_path, &self.path).await {
            let _ = async_fs::remove_file(&tmp_path).await;
            return Err(write_err(e));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn required(&self, value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| self.missing(field))
    }

    fn missing(&self, field: &'static str) -> ConfigError {
        ConfigError::MissingField {
            path: self.path.clone(),
            field,
        }
    }
}
