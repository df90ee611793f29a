//! Desktop notification delivery

use std::time::Duration;
use tracing::{debug, info, warn};

/// Fixed channel identifier, used as the notification app name
pub const CHANNEL_ID: &str = "pomodoro_timer_channel";
/// How long the alert stays on screen before auto-dismissing
pub const AUTO_DISMISS: Duration = Duration::from_secs(10);

/// Content of an alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// The alert shown when a countdown reaches zero
    pub fn times_up() -> Self {
        Self {
            title: "Time's up!".to_string(),
            body: "Your session has finished. Take a break or start a new one.".to_string(),
        }
    }
}

/// Something that can show an alert to the user
pub trait Notifier: Send + Sync + std::fmt::Debug {
    fn notify(&self, notification: &Notification) -> Result<(), String>;
}

/// Shows alerts through the desktop notification server
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }

    fn show(notification: &Notification) -> Result<(), String> {
        let mut alert = notify_rust::Notification::new();
        alert
            .appname(CHANNEL_ID)
            .summary(&notification.title)
            .body(&notification.body)
            .timeout(notify_rust::Timeout::Milliseconds(AUTO_DISMISS.as_millis() as u32));

        #[cfg(all(unix, not(target_os = "macos")))]
        alert.urgency(notify_rust::Urgency::Critical);

        alert
            .show()
            .map(|_| ())
            .map_err(|e| format!("Failed to show notification: {}", e))
    }
}

impl Notifier for DesktopNotifier {
    /// Hands the alert to a blocking thread and returns immediately
    fn notify(&self, notification: &Notification) -> Result<(), String> {
        let notification = notification.clone();
        let deliver = move || {
            if let Err(e) = Self::show(&notification) {
                warn!("{}", e);
            } else {
                debug!("Notification delivered: {}", notification.title);
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(deliver);
            }
            Err(_) => {
                std::thread::Builder::new()
                    .name("notify".to_string())
                    .spawn(deliver)
                    .map_err(|e| format!("Failed to spawn notification thread: {}", e))?;
            }
        }
        Ok(())
    }
}

/// Check once at launch whether alerts can be shown
pub async fn check_permission(disabled_by_user: bool) -> bool {
    if disabled_by_user {
        info!("Notifications disabled by configuration");
        return false;
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let server_info = tokio::task::spawn_blocking(notify_rust::get_server_information).await;
        match server_info {
            Ok(Ok(server)) => {
                info!("Notification server available: {} {}", server.name, server.version);
                true
            }
            Ok(Err(e)) => {
                warn!("No notification server reachable, alerts will be suppressed: {}", e);
                false
            }
            Err(e) => {
                warn!("Notification server check failed, alerts will be suppressed: {}", e);
                false
            }
        }
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        info!("Notifications enabled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_respects_user_denial() {
        assert!(!check_permission(true).await);
    }

    #[test]
    fn test_times_up_content() {
        let n = Notification::times_up();
        assert_eq!(n.title, "Time's up!");
        assert!(n.body.contains("Take a break"));
    }
}
