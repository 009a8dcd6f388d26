use common::ErrorLog;
use notify_rust::{Notification, Timeout};
use tracing::debug;

const TITLE: &str = "Checklist Reminder";
const BODY: &str = "Don't forget to check your tasks for today!";
const TIMEOUT_SECS: u32 = 10;

/// Fire the one startup reminder. Best-effort: an unavailable notification
/// service is recorded in the error log and otherwise ignored.
pub fn send_startup_reminder(error_log: &ErrorLog) {
    let result = Notification::new()
        .summary(TITLE)
        .body(BODY)
        .timeout(Timeout::Milliseconds(TIMEOUT_SECS * 1000))
        .show();

    match result {
        Ok(_) => debug!("startup notification sent"),
        Err(err) => error_log.record("startup notification", &anyhow::anyhow!("{err}")),
    }
}
