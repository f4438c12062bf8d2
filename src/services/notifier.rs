//! Focus alert delivery: alert sound and desktop notification

use std::path::PathBuf;

use notify_rust::Notification;
use tokio::{process::Command, runtime::Handle};
use tracing::{debug, info, warn};

use crate::error::NotifyError;

/// Receives the focus-expired signal from the session controller.
///
/// Called on the tick path with the session lock held, so implementations
/// must hand slow work off and return immediately.
pub trait NotificationSink: Send + Sync {
    fn focus_expired(&self) -> Result<(), NotifyError>;
}

/// Alert settings taken from the command line
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Sound file to play on focus expiry
    pub sound: Option<PathBuf>,
    /// Command used to play the sound file
    pub player: String,
    /// Show a desktop notification
    pub desktop: bool,
}

/// Production sink that plays a sound and shows a desktop toast
#[derive(Debug, Clone)]
pub struct AlertNotifier {
    config: AlertConfig,
}

impl AlertNotifier {
    pub fn new(config: AlertConfig) -> Self {
        Self { config }
    }

    fn play_sound(&self, handle: &Handle) {
        let Some(path) = self.config.sound.clone() else {
            debug!("No alert sound configured");
            return;
        };

        let player = self.config.player.clone();
        handle.spawn(async move {
            match play_alert_sound(&player, path).await {
                Ok(()) => debug!("Alert sound played with {}", player),
                Err(e) => warn!("{}", e),
            }
        });
    }

    fn show_desktop_notification(&self, handle: &Handle) {
        if !self.config.desktop {
            return;
        }

        handle.spawn_blocking(|| {
            let result = Notification::new()
                .summary("Focus time is over")
                .body("Take a break. Acknowledge the alert to restart the break countdown.")
                .show();
            if let Err(e) = result {
                warn!("{}", NotifyError::Desktop(e.to_string()));
            }
        });
    }
}

impl NotificationSink for AlertNotifier {
    fn focus_expired(&self) -> Result<(), NotifyError> {
        let handle = Handle::try_current()
            .map_err(|e| NotifyError::Playback(format!("no async runtime available: {}", e)))?;

        info!("Delivering focus alert");
        self.show_desktop_notification(&handle);
        self.play_sound(&handle);
        Ok(())
    }
}

/// Play `path` with `player`, checking the file off the tick path
async fn play_alert_sound(player: &str, path: PathBuf) -> Result<(), NotifyError> {
    match tokio::fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => {}
        _ => return Err(NotifyError::SoundMissing(path)),
    }

    let output = Command::new(player)
        .arg(&path)
        .output()
        .await
        .map_err(|e| NotifyError::Playback(format!("failed to execute {}: {}", player, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(NotifyError::Playback(format!("{} failed: {}", player, stderr.trim())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(sound: Option<PathBuf>) -> AlertNotifier {
        AlertNotifier::new(AlertConfig {
            sound,
            player: "true".to_string(),
            desktop: false,
        })
    }

    #[tokio::test]
    async fn test_missing_sound_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("alarm.mp3");

        match play_alert_sound("true", missing.clone()).await {
            Err(NotifyError::SoundMissing(path)) => assert_eq!(path, missing),
            other => panic!("expected SoundMissing, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_directory_is_not_a_sound() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            play_alert_sound("true", dir.path().to_path_buf()).await,
            Err(NotifyError::SoundMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_existing_sound_is_played() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(play_alert_sound("true", file.path().to_path_buf()).await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_player_is_reported() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            play_alert_sound("false", file.path().to_path_buf()).await,
            Err(NotifyError::Playback(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_sound_does_not_fail_delivery() {
        let dir = tempfile::tempdir().unwrap();
        let result = notifier(Some(dir.path().join("alarm.mp3"))).focus_expired();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_no_sound_configured() {
        assert!(notifier(None).focus_expired().is_ok());
    }

    #[test]
    fn test_without_runtime_fails_softly() {
        assert!(matches!(
            notifier(None).focus_expired(),
            Err(NotifyError::Playback(_))
        ));
    }
}
