//! Event loop wiring
//!
//! The tao event loop owns the tray and the poll loop. The worker thread and
//! the tray/menu callbacks only ever reach them by posting [`AppEvent`]s.

use crate::check::fetcher::HttpFetcher;
use crate::check::poll::{CheckDispatcher, PollLoop};
use crate::config::CheckerConfig;
use crate::event::{AppEvent, EventSink};
use crate::ui::clipboard::{ClipboardSink, SystemClipboard};
use crate::ui::presenter::{Presenter, TrayAction};
use crate::ui::tray::{icon_action, MenuActions, TrayView};
use crate::worker::WorkerHandle;
use anyhow::{Context, Result};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tray_icon::menu::MenuEvent;
use tray_icon::TrayIconEvent;
use tracing::{error, info};

type AppLoop = PollLoop<TrayView, SystemClipboard, WorkerHandle>;

/// Run the checker until the user exits
pub fn run(config: CheckerConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let tray_proxy = proxy.clone();
    TrayIconEvent::set_event_handler(Some(move |event| {
        tray_proxy.post(AppEvent::Tray(event));
    }));

    let menu_proxy = proxy.clone();
    MenuEvent::set_event_handler(Some(move |event| {
        menu_proxy.post(AppEvent::Menu(event));
    }));

    let exit_proxy = proxy.clone();
    ctrlc::set_handler(move || {
        exit_proxy.post(AppEvent::Exit);
    })
    .context("Failed to install Ctrl+C handler")?;

    let fetcher = HttpFetcher::new(&config).context("Failed to build HTTP client")?;
    info!(endpoint = fetcher.endpoint(), "Using address endpoint");

    let mut worker = Some(WorkerHandle::spawn(fetcher, proxy).context("Failed to start worker")?);
    let mut poll: Option<(AppLoop, MenuActions)> = None;
    let interval = config.interval();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            // The tray must be created after the event loop is running (macOS)
            Event::NewEvents(StartCause::Init) => {
                let view = match TrayView::new() {
                    Ok(view) => view,
                    Err(e) => {
                        error!(error = %e, "Failed to create tray icon");
                        *control_flow = ControlFlow::ExitWithCode(1);
                        return;
                    }
                };
                let Some(worker) = worker.take() else {
                    return;
                };
                let actions = view.menu_actions().clone();
                let mut new_loop = PollLoop::new(view, SystemClipboard::new(), worker);
                new_loop.start(interval);
                poll = Some((new_loop, actions));
            }
            Event::UserEvent(event) => {
                let Some((poll, actions)) = poll.as_mut() else {
                    return;
                };
                if !handle_event(poll, actions, event) {
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}

/// Apply one event; returns `false` when the application should exit
fn handle_event<P, C, D>(
    poll: &mut PollLoop<P, C, D>,
    menu: &MenuActions,
    event: AppEvent,
) -> bool
where
    P: Presenter,
    C: ClipboardSink,
    D: CheckDispatcher,
{
    match event {
        AppEvent::Tick => {
            poll.check();
        }
        AppEvent::FetchCompleted { ticket, outcome } => {
            poll.complete(ticket, outcome);
        }
        AppEvent::Tray(event) => {
            if let Some(action) = icon_action(&event) {
                poll.handle_action(action);
            }
        }
        AppEvent::Menu(event) => {
            if let Some(action) = menu.resolve(&event) {
                return poll.handle_action(action);
            }
        }
        AppEvent::Exit => {
            info!("Exit requested");
            return poll.handle_action(TrayAction::Exit);
        }
    }
    poll.is_active()
}
