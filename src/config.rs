//! Configuration management for the podcast cycle player.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Credentials and the episode list do not live here;
//! they are read from the credential document by [`crate::management::CredentialStore`].
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (applied on top of [`Settings`] by the binary)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use tokio::sync::Semaphore;

use crate::warning;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";
pub const DEFAULT_LIBRESPOT_PATH: &str = "./target/release/librespot";
pub const DEFAULT_DEVICE_NAME: &str = "AutomationMgrDevice";
pub const DEFAULT_MAX_CONCURRENT: usize = 5;
pub const DEFAULT_PLAYBACK_SECONDS: u64 = 5;
pub const DEFAULT_POLL_SECONDS: u64 = 5;
pub const DEFAULT_MAX_WAIT_SECONDS: u64 = 4 * 60 * 60;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads variables
/// from `podcycle/.env` inside the platform-specific local data directory:
/// - Linux: `~/.local/share/podcycle/.env`
/// - macOS: `~/Library/Application Support/podcycle/.env`
/// - Windows: `%LOCALAPPDATA%/podcycle/.env`
///
/// Variables already present in the process environment are not overridden.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file cannot be read or parsed. A missing file is not an error.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("podcycle/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    load_env_file(&path)
}

/// Loads variables from the given `.env` file. A missing file is skipped.
pub fn load_env_file(path: &Path) -> Result<(), String> {
    match dotenv::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if is_missing_file(&e) => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

fn is_missing_file(err: &dotenv::Error) -> bool {
    matches!(err, dotenv::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound)
}

/// How the end of an episode is detected after a successful play command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Wait a fixed amount of time.
    Fixed,
    /// Poll the device's player state until it moves on.
    Device,
}

impl FromStr for PlaybackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(PlaybackMode::Fixed),
            "device" => Ok(PlaybackMode::Device),
            other => Err(format!(
                "unknown playback mode '{}', expected 'fixed' or 'device'",
                other
            )),
        }
    }
}

/// Resolved runtime settings.
///
/// Built once at startup by [`Settings::from_env`] and owned by the
/// [`crate::context::AppContext`]. Tests construct it directly with
/// [`Settings::new`] to point the HTTP client at a local server.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub token_url: String,
    pub credentials_path: PathBuf,
    pub librespot_path: PathBuf,
    pub device_name: String,
    pub max_concurrent: usize,
    pub playback_mode: PlaybackMode,
    pub playback_duration: Duration,
    pub poll_interval: Duration,
    pub max_wait: Duration,
    pub token_recheck_cycles: Option<u64>,
    pub max_cycles: Option<u64>,
    pub launch_renderer: bool,
}

impl Settings {
    /// Settings with every value at its default, reading credentials from
    /// `credentials_path`.
    pub fn new(credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            credentials_path: credentials_path.into(),
            librespot_path: PathBuf::from(DEFAULT_LIBRESPOT_PATH),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            playback_mode: PlaybackMode::Fixed,
            playback_duration: Duration::from_secs(DEFAULT_PLAYBACK_SECONDS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECONDS),
            max_wait: Duration::from_secs(DEFAULT_MAX_WAIT_SECONDS),
            token_recheck_cycles: None,
            max_cycles: None,
            launch_renderer: true,
        }
    }

    /// Reads all settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            api_url: spotify_apiurl(),
            token_url: spotify_apitoken_url(),
            credentials_path: credentials_path(),
            librespot_path: librespot_path(),
            device_name: device_name(),
            max_concurrent: max_concurrent(),
            playback_mode: playback_mode(),
            playback_duration: Duration::from_secs(playback_seconds()),
            poll_interval: Duration::from_secs(
                parsed_var("PODCYCLE_POLL_SECONDS").unwrap_or(DEFAULT_POLL_SECONDS),
            ),
            max_wait: Duration::from_secs(
                parsed_var("PODCYCLE_MAX_WAIT_SECONDS").unwrap_or(DEFAULT_MAX_WAIT_SECONDS),
            ),
            token_recheck_cycles: token_recheck_cycles(),
            max_cycles: None,
            launch_renderer: true,
        }
    }

    /// The concurrency bound, between one and the largest permit count a
    /// semaphore can hold.
    pub fn concurrency_bound(&self) -> usize {
        self.max_concurrent.clamp(1, Semaphore::MAX_PERMITS)
    }
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, defaulting to `https://api.spotify.com/v1`.
/// A trailing slash is removed so paths can be appended directly.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, defaulting to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the path of the credential document.
///
/// Reads `PODCYCLE_CREDENTIALS`, defaulting to `credentials.json` in the
/// working directory.
pub fn credentials_path() -> PathBuf {
    env::var("PODCYCLE_CREDENTIALS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
}

/// Returns the path of the librespot binary.
pub fn librespot_path() -> PathBuf {
    env::var("PODCYCLE_LIBRESPOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LIBRESPOT_PATH))
}

/// Returns the device name librespot announces itself with.
pub fn device_name() -> String {
    env::var("PODCYCLE_DEVICE_NAME").unwrap_or_else(|_| DEFAULT_DEVICE_NAME.to_string())
}

/// Returns the maximum number of play commands in flight at once.
pub fn max_concurrent() -> usize {
    parsed_var("PODCYCLE_MAX_CONCURRENT").unwrap_or(DEFAULT_MAX_CONCURRENT)
}

/// Returns how many seconds a fixed-duration playback lasts.
pub fn playback_seconds() -> u64 {
    parsed_var("PODCYCLE_PLAYBACK_SECONDS").unwrap_or(DEFAULT_PLAYBACK_SECONDS)
}

/// Returns the playback duration source, `fixed` unless configured otherwise.
pub fn playback_mode() -> PlaybackMode {
    parsed_var("PODCYCLE_PLAYBACK_MODE").unwrap_or(PlaybackMode::Fixed)
}

/// Returns after how many cycles the access token is re-validated, if at all.
///
/// Unset or `0` keeps the token obtained at startup for the whole run.
pub fn token_recheck_cycles() -> Option<u64> {
    parsed_var::<u64>("PODCYCLE_TOKEN_RECHECK_CYCLES").filter(|n| *n > 0)
}

fn parsed_var<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            warning!("Ignoring invalid value for {}: {}", key, e);
            None
        }
    }
}
