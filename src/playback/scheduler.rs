use chrono::Local;
use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::{
    context::AppContext,
    info,
    management::TokenAuthority,
    playback::PlaybackCommander,
    spotify::{auth::AuthError, player::PlaybackError},
    types::{AccessToken, Credentials},
    utils, warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Cycling,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The `enabled` flag in the credential document was off.
    Disabled,
    /// The configured number of cycles has been played.
    CycleLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub reason: StopReason,
}

/// Outcome of one pass over the episode list.
#[derive(Debug)]
pub struct CycleReport {
    pub cycle: u64,
    /// Episodes in the order they were dispatched.
    pub order: Vec<String>,
    /// Episodes whose playback finished.
    pub completed: Vec<String>,
    pub failed: Vec<PlaybackError>,
}

impl CycleReport {
    pub fn dispatched(&self) -> usize {
        self.order.len()
    }
}

/// Plays the episode list in shuffled cycles.
///
/// Within a cycle at most `max_concurrent` play commands are in flight; the
/// rest wait for a permit in shuffled order. A cycle ends only when every
/// episode in it has finished or failed, and the `enabled` flag is read again
/// before the next one starts.
///
/// All play commands of a cycle are futures joined on the calling task, so
/// they interleave cooperatively rather than run in parallel.
pub struct ConcurrencyScheduler<'a> {
    ctx: &'a AppContext,
    commander: PlaybackCommander<'a>,
    credentials: Credentials,
    token: AccessToken,
    max_concurrent: usize,
    state: SchedulerState,
    cycles: u64,
}

impl<'a> ConcurrencyScheduler<'a> {
    pub fn new(
        ctx: &'a AppContext,
        commander: PlaybackCommander<'a>,
        credentials: Credentials,
        token: AccessToken,
    ) -> Self {
        ConcurrencyScheduler {
            ctx,
            commander,
            credentials,
            token,
            max_concurrent: ctx.settings().concurrency_bound(),
            state: SchedulerState::Idle,
            cycles: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Runs cycles until playback is disabled or the cycle limit is reached.
    ///
    /// Only a failed token re-check can make this return an error, and only
    /// when periodic re-checks are configured.
    pub async fn run(&mut self) -> Result<RunSummary, AuthError> {
        if self.state == SchedulerState::Stopped {
            return Ok(self.summary(StopReason::Disabled));
        }
        self.state = SchedulerState::Cycling;

        loop {
            if let Some(limit) = self.ctx.settings().max_cycles {
                if self.cycles >= limit {
                    info!("Played {} cycles. Exiting.", self.cycles);
                    return Ok(self.stop(StopReason::CycleLimit));
                }
            }

            if !self.ctx.store().is_enabled().await {
                info!("Playback is disabled. Exiting.");
                return Ok(self.stop(StopReason::Disabled));
            }

            if let Err(e) = self.recheck_token_if_due().await {
                self.state = SchedulerState::Stopped;
                return Err(e);
            }

            let report = self.run_cycle().await;
            info!(
                "Cycle {} done: {} played, {} failed",
                report.cycle,
                report.completed.len(),
                report.failed.len()
            );
        }
    }

    /// Plays every episode once in a fresh random order.
    pub async fn run_cycle(&mut self) -> CycleReport {
        self.cycles += 1;
        let cycle = self.cycles;

        let mut order = self.credentials.episode_ids.clone();
        utils::shuffle_episodes(&mut order);

        info!(
            "Cycle {} started at {} with {} episodes",
            cycle,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            order.len()
        );

        let gate = Semaphore::new(self.max_concurrent);
        let commander = &self.commander;
        let token = &self.token;
        let device_id = self.credentials.device_id.as_str();

        let tasks = order.iter().map(|episode_id| {
            let gate = &gate;
            async move {
                let _permit = gate.acquire().await.ok();
                commander
                    .play_episode(episode_id, token, device_id)
                    .await
                    .map(|_| episode_id.clone())
            }
        });

        let mut completed = Vec::new();
        let mut failed = Vec::new();
        for result in join_all(tasks).await {
            match result {
                Ok(episode_id) => completed.push(episode_id),
                Err(e) => {
                    warning!("{}", e);
                    failed.push(e);
                }
            }
        }

        CycleReport {
            cycle,
            order,
            completed,
            failed,
        }
    }

    async fn recheck_token_if_due(&mut self) -> Result<(), AuthError> {
        let Some(every) = self.ctx.settings().token_recheck_cycles else {
            return Ok(());
        };
        if every == 0 || self.cycles == 0 || self.cycles % every != 0 {
            return Ok(());
        }

        self.credentials.access_token = Some(self.token.as_str().to_string());
        self.token = TokenAuthority::new(self.ctx)
            .get_valid_token(&self.credentials)
            .await?;
        Ok(())
    }

    fn stop(&mut self, reason: StopReason) -> RunSummary {
        self.state = SchedulerState::Stopped;
        self.summary(reason)
    }

    fn summary(&self, reason: StopReason) -> RunSummary {
        RunSummary {
            cycles: self.cycles,
            reason,
        }
    }
}
