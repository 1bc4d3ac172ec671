//! Events delivered to the UI event loop
//!
//! Everything that must touch check state or the tray is posted here and
//! handled on the UI thread.

use crate::check::fetcher::FetchError;
use crate::check::poll::CheckTicket;
use tray_icon::menu::MenuEvent;
use tray_icon::TrayIconEvent;

/// Event processed by the UI event loop
#[derive(Debug)]
pub enum AppEvent {
    /// Scheduled check is due
    Tick,
    /// A fetch dispatched for `ticket` finished
    FetchCompleted {
        ticket: CheckTicket,
        outcome: Result<String, FetchError>,
    },
    /// Click or hover on the tray icon
    Tray(TrayIconEvent),
    /// Tray menu item activated
    Menu(MenuEvent),
    /// Exit requested outside the menu (Ctrl+C)
    Exit,
}

/// Channel back into the UI event loop
pub trait EventSink: Clone + Send + 'static {
    /// Post an event; returns `false` once the event loop is gone
    fn post(&self, event: AppEvent) -> bool;
}

impl EventSink for tao::event_loop::EventLoopProxy<AppEvent> {
    fn post(&self, event: AppEvent) -> bool {
        self.send_event(event).is_ok()
    }
}

impl EventSink for std::sync::mpsc::Sender<AppEvent> {
    fn post(&self, event: AppEvent) -> bool {
        self.send(event).is_ok()
    }
}
