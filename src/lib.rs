//! IP Checker - public IP address tray indicator
//!
//! Polls an address-echo endpoint on a timer, keeps the last known address
//! and reflects the check status in a system tray icon.
//!
//! Layout:
//! - [`check`]: check state, address fetching and the poll loop
//! - [`ui`]: tray presenter, status icons, clipboard and notifications
//! - [`worker`]: background runtime owning the timer and in-flight fetches
//! - [`app`]: event loop wiring

pub mod app;
pub mod check;
pub mod config;
pub mod event;
pub mod ui;
pub mod worker;

pub use check::poll::PollLoop;
pub use check::state::{Address, CheckState, CheckStatus};
pub use config::CheckerConfig;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
