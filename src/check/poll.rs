//! Single-flight poll loop
//!
//! Owns the [`CheckState`] and drives every transition:
//!
//! ```text
//! Starting -> Updating -> { Ok, Error }
//! Ok | Error -> Updating -> { Ok, Error }
//! ```
//!
//! A check is split in two halves. [`PollLoop::check`] moves to `Updating`
//! and hands a [`CheckTicket`] to the dispatcher; [`PollLoop::complete`]
//! applies the fetch outcome once it is posted back to the UI thread. At most
//! one ticket is outstanding, ticks and refreshes arriving in between are
//! dropped since the next tick retries anyway.

use crate::check::fetcher::{parse_address, FetchError};
use crate::check::state::{Address, CheckState, CheckStatus};
use crate::ui::clipboard::ClipboardSink;
use crate::ui::icon::Glyph;
use crate::ui::presenter::{Notice, Presenter, TrayAction, TrayError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Identifies one dispatched check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckTicket(pub u64);

/// Timer and fetch execution behind the poll loop
pub trait CheckDispatcher {
    /// Fire a tick now and then every `interval`
    fn start_timer(&mut self, interval: Duration);

    /// Run one fetch and post its outcome back tagged with `ticket`
    ///
    /// Returns `false` when the fetch could not be handed off; no outcome
    /// will arrive for `ticket` in that case.
    fn dispatch(&mut self, ticket: CheckTicket) -> bool;

    /// Stop the timer; no ticks are delivered afterwards
    fn cancel(&mut self);
}

/// Check that was dispatched and has not completed yet
#[derive(Debug)]
struct Pending {
    ticket: CheckTicket,
    previous: Address,
}

/// What happened to a fetch outcome handed to [`PollLoop::complete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Outcome applied to the state
    Applied,
    /// Ticket was not the outstanding check
    Stale,
    /// Loop already shut down
    Inactive,
}

/// Periodic and on-demand address checker
pub struct PollLoop<P, C, D>
where
    P: Presenter,
    C: ClipboardSink,
    D: CheckDispatcher,
{
    state: CheckState,
    presenter: P,
    clipboard: C,
    dispatcher: D,
    pending: Option<Pending>,
    next_ticket: u64,
    active: bool,
}

impl<P, C, D> PollLoop<P, C, D>
where
    P: Presenter,
    C: ClipboardSink,
    D: CheckDispatcher,
{
    pub fn new(presenter: P, clipboard: C, dispatcher: D) -> Self {
        Self {
            state: CheckState::new(),
            presenter,
            clipboard,
            dispatcher,
            pending: None,
            next_ticket: 1,
            active: true,
        }
    }

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Whether a check is outstanding
    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Show the starting state and start the timer
    pub fn start(&mut self, interval: Duration) {
        info!(interval_secs = interval.as_secs(), "Starting address checks");
        self.present_status();
        self.dispatcher.start_timer(interval);
    }

    /// Begin a check unless one is already in flight
    ///
    /// Returns `true` when a check was started. If the dispatcher cannot take
    /// the fetch, the check fails on the spot and lands on `Error`.
    pub fn check(&mut self) -> bool {
        if !self.active {
            debug!("Check requested after shutdown, ignoring");
            return false;
        }
        if let Some(pending) = &self.pending {
            debug!(ticket = pending.ticket.0, "Check already in flight, dropping request");
            return false;
        }

        let ticket = CheckTicket(self.next_ticket);
        self.next_ticket += 1;

        self.pending = Some(Pending {
            ticket,
            previous: self.state.address().clone(),
        });
        self.state.mark_updating();
        self.present_status();

        debug!(ticket = ticket.0, "Dispatching address check");
        if !self.dispatcher.dispatch(ticket) {
            // Nothing will report back, fail now so the next tick can retry
            self.complete(ticket, Err(FetchError::WorkerGone));
        }
        true
    }

    /// User-requested check, same single-flight rules as a tick
    pub fn refresh(&mut self) -> bool {
        info!("Manual refresh requested");
        self.check()
    }

    /// Apply the outcome of the fetch dispatched for `ticket`
    pub fn complete(
        &mut self,
        ticket: CheckTicket,
        outcome: Result<String, FetchError>,
    ) -> Completion {
        if !self.active {
            debug!(ticket = ticket.0, "Discarding check result after shutdown");
            return Completion::Inactive;
        }
        let previous = match self.pending.take() {
            Some(pending) if pending.ticket == ticket => pending.previous,
            other => {
                debug!(ticket = ticket.0, "Discarding stale check result");
                self.pending = other;
                return Completion::Stale;
            }
        };

        // Bodies from any fetcher go through the same trim and validation
        let outcome = outcome.and_then(|raw| parse_address(&raw));

        match outcome {
            Ok(address) => {
                let changed = matches!(&previous, Address::Known(prev) if *prev != address);
                info!(address = %address, changed, "Public IP checked");

                self.state.record_success(address.clone());
                self.present_status();

                if changed {
                    self.notify(&Notice::address_changed(&address));
                }
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(error = %reason, "Public IP check failed");

                self.state.record_failure(reason.clone());
                self.present_status();
                self.notify(&Notice::check_failed(&reason));
            }
        }

        Completion::Applied
    }

    /// Copy the last known address to the clipboard
    ///
    /// Does nothing until a check has succeeded. Returns `true` when the
    /// clipboard was written.
    pub fn copy_current_address(&mut self) -> bool {
        let Some(address) = self.state.address().as_known().map(str::to_string) else {
            debug!("No address to copy yet");
            return false;
        };

        if let Err(e) = self.clipboard.set_text(&address) {
            warn!(error = %e, "Failed to copy address");
            return false;
        }

        info!(address = %address, "Address copied to clipboard");
        self.notify(&Notice::address_copied(&address));
        true
    }

    /// Stop the timer and remove the tray indicator
    ///
    /// A result still in flight is discarded when it arrives.
    pub fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        info!("Shutting down");
        self.active = false;
        self.pending = None;
        self.dispatcher.cancel();
        self.presenter.release();
    }

    /// Route a tray action; returns `false` once the loop should exit
    pub fn handle_action(&mut self, action: TrayAction) -> bool {
        match action {
            TrayAction::Copy => {
                self.copy_current_address();
            }
            TrayAction::Refresh => {
                self.refresh();
            }
            TrayAction::Exit => {
                self.shutdown();
            }
        }
        self.active
    }

    fn present_status(&mut self) {
        let glyph = Glyph::for_status(self.state.status());
        let tooltip = self.state.tooltip();
        let menu_line = self.state.menu_line();

        log_presenter_error("icon", self.presenter.set_icon(glyph));
        log_presenter_error("tooltip", self.presenter.set_tooltip(&tooltip));
        if self.state.status() != CheckStatus::Updating {
            log_presenter_error("menu line", self.presenter.set_menu_line(&menu_line));
        }
    }

    fn notify(&mut self, notice: &Notice) {
        log_presenter_error("notification", self.presenter.notify(notice));
    }
}

fn log_presenter_error(what: &str, result: Result<(), TrayError>) {
    if let Err(e) = result {
        warn!(error = %e, "Failed to update tray {}", what);
    }
}
