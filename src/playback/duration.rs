use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::sleep;

use crate::{
    config::PlaybackMode,
    context::AppContext,
    spotify,
    types::{AccessToken, PlayerState},
    utils, warning,
};

/// Decides when an episode that was started successfully counts as finished.
#[async_trait]
pub trait PlaybackDuration: Send + Sync {
    async fn wait_for_completion(&self, episode_id: &str, token: &AccessToken);
}

/// Builds the duration source selected by the settings.
pub fn from_context(ctx: &AppContext) -> Box<dyn PlaybackDuration> {
    let settings = ctx.settings();
    match settings.playback_mode {
        PlaybackMode::Fixed => Box::new(FixedDuration::new(settings.playback_duration)),
        PlaybackMode::Device => Box::new(DevicePolling::new(
            ctx.client().clone(),
            settings.api_url.clone(),
            settings.poll_interval,
            settings.max_wait,
        )),
    }
}

/// Waits the same amount of time for every episode, regardless of what the
/// device is actually doing.
#[derive(Debug, Clone)]
pub struct FixedDuration {
    duration: Duration,
}

impl FixedDuration {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl PlaybackDuration for FixedDuration {
    async fn wait_for_completion(&self, _episode_id: &str, _token: &AccessToken) {
        sleep(self.duration).await;
    }
}

/// Polls the player state until the device has moved past the episode.
///
/// The episode counts as finished once the device is paused, plays another
/// item, reports nothing playing, or its progress reaches the item duration.
/// A failed poll or exceeding `max_wait` also ends the wait.
#[derive(Debug, Clone)]
pub struct DevicePolling {
    client: Client,
    api_url: String,
    interval: Duration,
    max_wait: Duration,
}

impl DevicePolling {
    pub fn new(client: Client, api_url: String, interval: Duration, max_wait: Duration) -> Self {
        Self {
            client,
            api_url,
            interval,
            max_wait,
        }
    }
}

#[async_trait]
impl PlaybackDuration for DevicePolling {
    async fn wait_for_completion(&self, episode_id: &str, token: &AccessToken) {
        let uri = utils::episode_uri(episode_id);
        let started = Instant::now();

        loop {
            sleep(self.interval).await;

            if started.elapsed() >= self.max_wait {
                warning!(
                    "Gave up waiting on {} after {} seconds",
                    episode_id,
                    self.max_wait.as_secs()
                );
                return;
            }

            match spotify::player::get_player_state(&self.client, &self.api_url, token).await {
                Ok(Some(state)) if is_still_playing(&state, &uri) => continue,
                Ok(_) => return,
                Err(e) => {
                    warning!("Cannot read player state for {}: {}", episode_id, e);
                    return;
                }
            }
        }
    }
}

pub fn is_still_playing(state: &PlayerState, uri: &str) -> bool {
    if !state.is_playing {
        return false;
    }

    match &state.item {
        Some(item) if item.uri == uri => match (state.progress_ms, item.duration_ms) {
            (Some(progress), Some(duration)) => progress < duration,
            _ => true,
        },
        _ => false,
    }
}
