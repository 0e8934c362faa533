use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Validated contents of the `spotify` section of the credential document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub podcast_id: String,
    pub episode_ids: Vec<String>,
    pub device_id: String,
    pub access_token: Option<String>,
    pub enabled: bool,
}

/// The `spotify` section as stored on disk, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialSection {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub podcast_id: Option<String>,
    pub episode_ids: Option<Vec<String>>,
    pub device_id: Option<String>,
    pub access_token: Option<String>,
    pub enabled: Option<bool>,
}

/// A bearer token for the Web API.
///
/// Validity is never derived from the token itself; it is decided by probing
/// the identity endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.value.chars().take(6).collect();
        write!(f, "AccessToken({}…)", shown)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    pub uris: Vec<String>,
    pub device_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(default)]
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: Option<PlayingItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingItem {
    pub uri: String,
    pub duration_ms: Option<u64>,
}

#[derive(Tabled)]
pub struct EpisodeTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub episode: String,
    pub uri: String,
}
