//! User interface module
//!
//! Contains:
//! - Presenter contract used by the poll loop ([`presenter`])
//! - System tray icon and menu ([`tray`])
//! - Status icon rendering ([`icon`])
//! - Clipboard access ([`clipboard`])
//! - Desktop notifications ([`notify`])

pub mod clipboard;
pub mod icon;
pub mod notify;
pub mod presenter;
pub mod tray;
