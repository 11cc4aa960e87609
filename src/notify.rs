//! User-facing notifications.
//!
//! Components report failures as explicit results; whoever owns the run loop
//! funnels them through a single [`NotifySink`] so notifications always fire
//! from the main thread, no matter which thread hit the error.

/// Sink for user-visible messages (title + body).
pub trait NotifySink: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Sink backed by the desktop notification center.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl NotifySink for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Err(err) = notify_rust::Notification::new()
            .appname("Shutterbar")
            .summary(title)
            .body(body)
            .show()
        {
            log::warn!("System notification failed: {}", err);
        }
    }
}

/// Sink for one-shot CLI runs: messages go to the log instead of the
/// notification center.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotifySink for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        log::error!("{}: {}", title, body);
    }
}
