//! # CLI Module
//!
//! User-facing commands of the podcast cycle player.
//!
//! - [`play`] - the default command: validates the token, prints the episode
//!   list, starts librespot and runs the playback cycles until the `enabled`
//!   flag is switched off or the process receives Ctrl+C / SIGTERM
//! - [`play_until`] - [`play`] with a caller-supplied shutdown future
//! - [`print_episode_list`] - prints the configured episodes as a table
//!
//! Fatal problems (missing or broken credential document, rejected token
//! exchange) are returned to `main`, which reports them and exits. Failures of
//! single play commands never reach this layer; the scheduler logs them and
//! carries on.

mod episodes;
mod play;

pub use episodes::print_episode_list;
pub use play::{play, play_until};
