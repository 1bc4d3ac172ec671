//! Presentation contract between the poll loop and the tray
//!
//! The poll loop only talks to the tray through [`Presenter`], which keeps the
//! state machine testable without a desktop session.

use crate::ui::icon::Glyph;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with tray operations
#[derive(Error, Debug)]
pub enum TrayError {
    #[error("Failed to create tray icon: {0}")]
    CreationFailed(String),

    #[error("Failed to update tray icon: {0}")]
    UpdateFailed(String),

    #[error("Failed to render status icon: {0}")]
    Icon(String),

    #[error("Failed to show notification: {0}")]
    Notification(String),
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient pop-up requested by the poll loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub kind: NoticeKind,
    /// How long the pop-up should stay visible
    pub timeout: Duration,
}

const CHANGE_NOTICE_TIMEOUT: Duration = Duration::from_millis(3000);
const ERROR_NOTICE_TIMEOUT: Duration = Duration::from_millis(3000);
const COPY_NOTICE_TIMEOUT: Duration = Duration::from_millis(2000);

impl Notice {
    /// The public address changed to `address`
    pub fn address_changed(address: &str) -> Self {
        Self {
            title: address.to_string(),
            body: "Your public IP address has been updated".to_string(),
            kind: NoticeKind::Info,
            timeout: CHANGE_NOTICE_TIMEOUT,
        }
    }

    /// A check failed with `reason`
    pub fn check_failed(reason: &str) -> Self {
        Self {
            title: "Error".to_string(),
            body: format!("Unable to check the public IP address: {}", reason),
            kind: NoticeKind::Error,
            timeout: ERROR_NOTICE_TIMEOUT,
        }
    }

    /// `address` was placed on the clipboard
    pub fn address_copied(address: &str) -> Self {
        Self {
            title: address.to_string(),
            body: "IP address copied to the clipboard".to_string(),
            kind: NoticeKind::Info,
            timeout: COPY_NOTICE_TIMEOUT,
        }
    }
}

/// User action coming from the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    /// Copy the current address to the clipboard
    Copy,
    /// Run a check now
    Refresh,
    /// Exit application
    Exit,
}

/// Visible tray surface driven by the poll loop
pub trait Presenter {
    fn set_icon(&mut self, glyph: Glyph) -> Result<(), TrayError>;

    fn set_tooltip(&mut self, text: &str) -> Result<(), TrayError>;

    /// Update the disabled address line at the top of the menu
    fn set_menu_line(&mut self, text: &str) -> Result<(), TrayError>;

    fn notify(&mut self, notice: &Notice) -> Result<(), TrayError>;

    /// Remove the indicator; later calls become no-ops
    fn release(&mut self);
}
