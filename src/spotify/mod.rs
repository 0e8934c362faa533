//! # Spotify Integration Module
//!
//! Thin wrappers around the Spotify Web API endpoints the player needs. Every
//! function takes the shared [`reqwest::Client`] and the base URL explicitly so
//! the same code talks to the real service or to a local test server.
//!
//! ## Endpoints
//!
//! ### Authentication
//! [`auth`]
//! - `GET /me` - identity probe used to decide whether a cached token is alive
//! - `POST /api/token` - client-credentials grant for a fresh token
//!
//! ### Playback
//! [`player`]
//! - `PUT /me/player/play` - start an episode on a device
//! - `GET /me/player` - current playback state, used when waiting on the device
//!
//! ## Error Handling
//!
//! Each request is attempted exactly once. There is no retry, backoff or
//! rate-limit handling; a transport failure surfaces the same way as a
//! rejection by the service.
//!
//! - [`auth::AuthError`] - token exchange failures, fatal during startup
//! - [`player::PlaybackError`] - a play command that did not return `204`,
//!   reported per episode

pub mod auth;
pub mod player;
