//! Check state owned by the poll loop
//!
//! Holds the last known address, the lifecycle status and the texts the tray
//! shows for them.

use chrono::{DateTime, Local};

/// Lifecycle phase of the checker, drives the icon color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Process started, no check issued yet - violet icon
    Starting,
    /// A check is in flight - orange icon
    Updating,
    /// Last check succeeded - green icon
    Ok,
    /// Last check failed - red icon
    Error,
}

/// Last observed public address
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Address {
    /// No check has succeeded yet
    #[default]
    Unchecked,
    /// Address returned by the last successful check
    Known(String),
}

impl Address {
    /// The address text, if one was ever observed
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Address::Unchecked => None,
            Address::Known(addr) => Some(addr),
        }
    }
}

/// State mutated by each check
#[derive(Debug, Clone)]
pub struct CheckState {
    address: Address,
    status: CheckStatus,
    last_error: Option<String>,
    checked_at: Option<DateTime<Local>>,
}

impl Default for CheckState {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckState {
    /// Initial state at process start
    pub fn new() -> Self {
        Self {
            address: Address::Unchecked,
            status: CheckStatus::Starting,
            last_error: None,
            checked_at: None,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    /// Failure text of the latest check, `None` once a check succeeds
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Time of the last successful check
    pub fn checked_at(&self) -> Option<DateTime<Local>> {
        self.checked_at
    }

    pub(crate) fn mark_updating(&mut self) {
        self.status = CheckStatus::Updating;
    }

    pub(crate) fn record_success(&mut self, address: String) {
        self.address = Address::Known(address);
        self.status = CheckStatus::Ok;
        self.last_error = None;
        self.checked_at = Some(Local::now());
    }

    /// The address is kept so it can still be copied and compared
    pub(crate) fn record_failure(&mut self, reason: String) {
        self.status = CheckStatus::Error;
        self.last_error = Some(reason);
    }

    /// Text of the disabled address line in the tray menu
    pub fn menu_line(&self) -> String {
        match (self.status, &self.address) {
            (CheckStatus::Error, _) => "IP: check failed".to_string(),
            (_, Address::Known(addr)) => format!("IP: {}", addr),
            (_, Address::Unchecked) => "IP: checking...".to_string(),
        }
    }

    /// Tooltip shown when hovering the tray icon
    pub fn tooltip(&self) -> String {
        match self.status {
            CheckStatus::Starting => "Public IP Checker".to_string(),
            CheckStatus::Updating => "Checking IP...".to_string(),
            CheckStatus::Ok => {
                let addr = self.address.as_known().unwrap_or_default();
                match self.checked_at {
                    Some(at) => format!("Public IP: {}\nChecked at {}", addr, at.format("%H:%M:%S")),
                    None => format!("Public IP: {}", addr),
                }
            }
            CheckStatus::Error => format!(
                "Error while checking the IP: {}",
                self.last_error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
