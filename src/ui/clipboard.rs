//! Clipboard access
//!
//! Only text is ever written. The `arboard` handle is kept for the lifetime of
//! the sink because X11 selections vanish when their owner is dropped.

use arboard::Clipboard;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while writing the clipboard
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),
}

/// Destination for copied text
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard backed by `arboard`
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            debug!("Clipboard opened");
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialized".to_string()))
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self.handle()?;
        if let Err(e) = clipboard.set_text(text.to_string()) {
            // Reopen on the next attempt in case the handle went stale
            self.inner = None;
            return Err(ClipboardError::WriteFailed(e.to_string()));
        }
        Ok(())
    }
}
