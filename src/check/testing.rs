//! In-memory presenter, clipboard and dispatcher for unit tests

use crate::check::poll::{CheckDispatcher, CheckTicket};
use crate::ui::clipboard::{ClipboardError, ClipboardSink};
use crate::ui::icon::Glyph;
use crate::ui::presenter::{Notice, Presenter, TrayError};
use std::time::Duration;

#[derive(Default)]
pub struct RecordingPresenter {
    pub icons: Vec<Glyph>,
    pub tooltips: Vec<String>,
    pub menu_lines: Vec<String>,
    pub notices: Vec<Notice>,
    pub released: bool,
}

impl Presenter for RecordingPresenter {
    fn set_icon(&mut self, glyph: Glyph) -> Result<(), TrayError> {
        self.icons.push(glyph);
        Ok(())
    }

    fn set_tooltip(&mut self, text: &str) -> Result<(), TrayError> {
        self.tooltips.push(text.to_string());
        Ok(())
    }

    fn set_menu_line(&mut self, text: &str) -> Result<(), TrayError> {
        self.menu_lines.push(text.to_string());
        Ok(())
    }

    fn notify(&mut self, notice: &Notice) -> Result<(), TrayError> {
        self.notices.push(notice.clone());
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[derive(Default)]
pub struct MemoryClipboard {
    pub text: Option<String>,
    pub fail: bool,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}

/// Records dispatched tickets; `closed` simulates a dead worker
#[derive(Default)]
pub struct RecordingDispatcher {
    pub timer: Option<Duration>,
    pub dispatched: Vec<CheckTicket>,
    pub cancelled: bool,
    pub closed: bool,
}

impl CheckDispatcher for RecordingDispatcher {
    fn start_timer(&mut self, interval: Duration) {
        self.timer = Some(interval);
    }

    fn dispatch(&mut self, ticket: CheckTicket) -> bool {
        if self.closed {
            return false;
        }
        self.dispatched.push(ticket);
        true
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}
