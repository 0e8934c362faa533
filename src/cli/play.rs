use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::signal;

use crate::{
    Res,
    cli::print_episode_list,
    context::AppContext,
    info, librespot,
    management::TokenAuthority,
    playback::{ConcurrencyScheduler, PlaybackCommander, RunSummary, StopReason},
    success,
};

/// Loads the credentials, makes sure a token is available, starts librespot
/// and plays cycles until playback is disabled or the process is interrupted.
///
/// Configuration and authentication problems are returned as errors; an
/// interrupt is a normal exit.
pub async fn play(ctx: &AppContext) -> Res<()> {
    play_until(ctx, shutdown_signal()).await
}

/// Same as [`play`], stopping cleanly when `shutdown` resolves.
///
/// The shutdown future is polled from the start, so an interrupt during
/// token validation ends the run the same way as one during a cycle.
pub async fn play_until<F>(ctx: &AppContext, shutdown: F) -> Res<()>
where
    F: Future<Output = ()>,
{
    tokio::select! {
        summary = run(ctx) => {
            let summary = summary?;
            match summary.reason {
                StopReason::Disabled => info!("Stopped after {} cycles.", summary.cycles),
                StopReason::CycleLimit => success!("Completed {} cycles.", summary.cycles),
            }
        }
        _ = shutdown => {
            println!();
            info!("Playback stopped.");
        }
    }

    Ok(())
}

async fn run(ctx: &AppContext) -> Res<RunSummary> {
    let credentials = ctx.store().load().await?;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Validating access token...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    let token = TokenAuthority::new(ctx).get_valid_token(&credentials).await;
    pb.finish_and_clear();
    let token = token?;
    success!("Access token ready");

    print_episode_list(&credentials);

    if ctx.settings().launch_renderer {
        librespot::start_librespot(ctx.settings(), &token);
    }

    let commander = PlaybackCommander::from_context(ctx);
    let mut scheduler = ConcurrencyScheduler::new(ctx, commander, credentials, token);
    Ok(scheduler.run().await?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
