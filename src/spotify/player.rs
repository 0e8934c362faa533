use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    types::{AccessToken, PlayRequest, PlayerState},
    utils,
};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Failed to play {episode_id}: {status}, {body}")]
    Rejected {
        episode_id: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to play {episode_id}: {source}")]
    Http {
        episode_id: String,
        #[source]
        source: reqwest::Error,
    },
}

impl PlaybackError {
    pub fn episode_id(&self) -> &str {
        match self {
            PlaybackError::Rejected { episode_id, .. } | PlaybackError::Http { episode_id, .. } => {
                episode_id
            }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PlaybackError::Rejected { status, .. } => Some(*status),
            PlaybackError::Http { source, .. } => source.status(),
        }
    }
}

/// Starts playback of a single episode on a device.
///
/// Sends `PUT {api_url}/me/player/play` with a JSON body naming the episode
/// URI and the target device. The API signals success with
/// `204 No Content`; any other status is returned as
/// [`PlaybackError::Rejected`] with the response body attached.
pub async fn start_playback(
    client: &Client,
    api_url: &str,
    token: &AccessToken,
    episode_id: &str,
    device_id: &str,
) -> Result<(), PlaybackError> {
    let url = format!("{uri}/me/player/play", uri = api_url);
    let body = PlayRequest {
        uris: vec![utils::episode_uri(episode_id)],
        device_id: device_id.to_string(),
    };

    let http_err = |source| PlaybackError::Http {
        episode_id: episode_id.to_string(),
        source,
    };

    let response = client
        .put(&url)
        .bearer_auth(token.as_str())
        .json(&body)
        .send()
        .await
        .map_err(http_err)?;

    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(PlaybackError::Rejected {
        episode_id: episode_id.to_string(),
        status,
        body,
    })
}

/// Fetches the current playback state of the user's active device.
///
/// Returns `Ok(None)` when nothing is playing (`204 No Content`).
pub async fn get_player_state(
    client: &Client,
    api_url: &str,
    token: &AccessToken,
) -> Result<Option<PlayerState>, reqwest::Error> {
    let url = format!("{uri}/me/player", uri = api_url);
    let response = client
        .get(&url)
        .bearer_auth(token.as_str())
        .send()
        .await?
        .error_for_status()?;

    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let state = response.json::<PlayerState>().await?;
    Ok(Some(state))
}
