//! Launcher for the local librespot process.
//!
//! librespot registers itself as a Spotify Connect device and renders the
//! audio. It writes to the pipe backend with `/dev/null` as output, so the
//! device plays silently. The process is started once and never watched: if
//! it exits or crashes the scheduler keeps sending play commands regardless.

use std::io::ErrorKind;

use tokio::process::Command;

use crate::{config::Settings, success, types::AccessToken, warning};

pub fn librespot_args(device_name: &str, token: &AccessToken) -> Vec<String> {
    vec![
        "--name".to_string(),
        device_name.to_string(),
        "--token".to_string(),
        token.as_str().to_string(),
        "--backend".to_string(),
        "pipe".to_string(),
        "--device".to_string(),
        "/dev/null".to_string(),
    ]
}

/// Spawns librespot and returns its PID.
///
/// A missing binary or any other spawn failure is reported as a warning and
/// yields `None`; playback commands are still sent to the configured device.
pub fn start_librespot(settings: &Settings, token: &AccessToken) -> Option<u32> {
    let spawned = Command::new(&settings.librespot_path)
        .args(librespot_args(&settings.device_name, token))
        .kill_on_drop(false)
        .spawn();

    match spawned {
        Ok(child) => {
            let pid = child.id();
            match pid {
                Some(pid) => success!("Librespot process started with PID: {}", pid),
                None => warning!("Librespot process exited right after starting"),
            }
            pid
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warning!(
                "Librespot binary not found at {}",
                settings.librespot_path.display()
            );
            None
        }
        Err(e) => {
            warning!("Cannot start librespot: {}", e);
            None
        }
    }
}
