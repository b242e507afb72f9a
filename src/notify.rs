//! Fire-and-forget desktop notifications for player switches.

use async_trait::async_trait;
use tracing::debug;

/// Notification display time.
const NOTIFICATION_TIMEOUT_MS: u32 = 3000;

/// One-shot notification sink. Delivery is best-effort; failures are logged
/// at debug level and otherwise ignored.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show `message` to the user.
    async fn notify(&self, message: &str);
}

/// Notifier backed by the desktop notification daemon.
pub struct DesktopNotifier;

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, message: &str) {
        let body = message.to_string();

        // notify-rust is blocking; keep it off the dispatch task.
        let result = tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname("mpris-remote")
                .summary("mpris-remote")
                .body(&body)
                .timeout(notify_rust::Timeout::Milliseconds(NOTIFICATION_TIMEOUT_MS))
                .show()
        })
        .await;

        match result {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => debug!(error = %e, "desktop notification failed"),
            Err(e) => debug!(error = %e, "notification task failed"),
        }
    }
}
