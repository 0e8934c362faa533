//! Podcast Cycle Player Library
//!
//! This library keeps a fixed set of podcast episodes playing on a Spotify
//! device. It loads client credentials and the episode list from a JSON
//! document, makes sure a valid access token is available, and then plays the
//! episodes in shuffled cycles with a bounded number of play commands in
//! flight at a time.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `context` - Application context shared by all components
//! - `librespot` - Launcher for the local audio rendering process
//! - `management` - Credential document and token lifecycle management
//! - `playback` - Play commands, playback duration sources and the cycle scheduler
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use podcycle::{config, context::AppContext};
//!
//! #[tokio::main]
//! async fn main() -> podcycle::Res<()> {
//!     let settings = config::Settings::from_env();
//!     let ctx = AppContext::new(settings);
//!     let credentials = ctx.store().load().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod librespot;
pub mod management;
pub mod playback;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line layer where errors from several components are
/// funnelled into a single fatal report. Components themselves return their
/// own typed errors.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Starting cycle {}", cycle);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Finished playing: {}", episode_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal errors in the binary. Library code returns errors
/// instead of calling this.
///
/// # Example
///
/// ```
/// error!("Cannot load credentials: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems such as a single episode failing to start.
///
/// # Example
///
/// ```
/// warning!("Failed to play {}: {}", episode_id, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
