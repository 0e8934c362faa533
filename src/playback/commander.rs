use crate::{
    context::AppContext,
    info,
    playback::duration::{self, PlaybackDuration},
    spotify::{self, player::PlaybackError},
    success,
    types::AccessToken,
};

/// Issues play commands and waits for each episode to finish.
pub struct PlaybackCommander<'a> {
    ctx: &'a AppContext,
    duration: Box<dyn PlaybackDuration>,
}

impl<'a> PlaybackCommander<'a> {
    pub fn new(ctx: &'a AppContext, duration: Box<dyn PlaybackDuration>) -> Self {
        PlaybackCommander { ctx, duration }
    }

    /// Commander using the duration source chosen in the settings.
    pub fn from_context(ctx: &'a AppContext) -> Self {
        Self::new(ctx, duration::from_context(ctx))
    }

    /// Starts `episode_id` on `device_id` and returns once it counts as
    /// finished.
    ///
    /// A rejected play command returns immediately with the error; no wait
    /// happens in that case.
    pub async fn play_episode(
        &self,
        episode_id: &str,
        token: &AccessToken,
        device_id: &str,
    ) -> Result<(), PlaybackError> {
        spotify::player::start_playback(
            self.ctx.client(),
            &self.ctx.settings().api_url,
            token,
            episode_id,
            device_id,
        )
        .await?;

        info!("Playing episode: {}", episode_id);
        self.duration.wait_for_completion(episode_id, token).await;
        success!("Finished playing: {}", episode_id);
        Ok(())
    }
}
