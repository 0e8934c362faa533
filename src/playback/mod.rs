//! # Playback Module
//!
//! Turns the episode list into audible playback:
//!
//! - [`PlaybackCommander`] starts one episode and waits until it counts as
//!   finished.
//! - [`duration`] decides what "finished" means: a fixed delay or polling the
//!   device's player state.
//! - [`ConcurrencyScheduler`] repeats shuffled cycles over all episodes with a
//!   bounded number of play commands in flight.

mod commander;
pub mod duration;
mod scheduler;

pub use commander::PlaybackCommander;
pub use duration::DevicePolling;
pub use duration::FixedDuration;
pub use duration::PlaybackDuration;
pub use scheduler::ConcurrencyScheduler;
pub use scheduler::CycleReport;
pub use scheduler::RunSummary;
pub use scheduler::SchedulerState;
pub use scheduler::StopReason;
