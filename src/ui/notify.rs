//! Desktop notifications via `notify-rust`

use crate::ui::presenter::{Notice, NoticeKind, TrayError};
use notify_rust::{Notification, Timeout};

const APP_NAME: &str = "IP Checker";

/// Show a transient notification for `notice`
pub fn show(notice: &Notice) -> Result<(), TrayError> {
    let icon = match notice.kind {
        NoticeKind::Info => "dialog-information",
        NoticeKind::Error => "dialog-error",
    };

    Notification::new()
        .appname(APP_NAME)
        .summary(&notice.title)
        .body(&notice.body)
        .icon(icon)
        .timeout(Timeout::Milliseconds(notice.timeout.as_millis() as u32))
        .show()
        .map(|_| ())
        .map_err(|e| TrayError::Notification(e.to_string()))
}
