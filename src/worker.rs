//! Background worker for the timer and fetches
//!
//! Runs a tokio runtime on its own thread so network I/O never blocks the UI
//! event loop. Commands come in over a channel; ticks and fetch outcomes go
//! back out through an [`EventSink`] and are applied on the UI thread.

use crate::check::fetcher::{AddressFetcher, FetchError};
use crate::check::poll::{CheckDispatcher, CheckTicket};
use crate::event::{AppEvent, EventSink};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Errors that can occur while starting the worker
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Failed to create async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Commands sent to the worker thread
#[derive(Debug)]
pub enum WorkerCommand {
    StartTimer(Duration),
    Fetch(CheckTicket),
    Shutdown,
}

/// Handle to communicate with the worker thread
pub struct WorkerHandle {
    tx: mpsc::UnboundedSender<WorkerCommand>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Spawn the worker on a dedicated thread and return a handle
    pub fn spawn<F, S>(fetcher: F, sink: S) -> Result<Self, WorkerError>
    where
        F: AddressFetcher + Send + Sync + 'static,
        S: EventSink,
    {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("ipchecker-worker")
            .enable_all()
            .build()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let thread = std::thread::Builder::new()
            .name("ipchecker-worker".to_string())
            .spawn(move || {
                runtime.block_on(run(Arc::new(fetcher), sink, rx));
                // Do not wait on a discarded fetch stuck in DNS resolution
                runtime.shutdown_background();
                debug!("Worker runtime stopped");
            })?;

        Ok(Self {
            tx,
            thread: Some(thread),
        })
    }

    fn send(&self, command: WorkerCommand) -> bool {
        if self.tx.send(command).is_err() {
            error!("Worker thread died");
            return false;
        }
        true
    }

    /// Stop the worker and wait for its thread to exit
    pub fn shutdown(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.tx.send(WorkerCommand::Shutdown);
            if thread.join().is_err() {
                error!("Worker thread panicked");
            }
        }
    }
}

impl CheckDispatcher for WorkerHandle {
    fn start_timer(&mut self, interval: Duration) {
        self.send(WorkerCommand::StartTimer(interval));
    }

    fn dispatch(&mut self, ticket: CheckTicket) -> bool {
        self.send(WorkerCommand::Fetch(ticket))
    }

    fn cancel(&mut self) {
        self.shutdown();
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run<F, S>(fetcher: Arc<F>, sink: S, mut rx: mpsc::UnboundedReceiver<WorkerCommand>)
where
    F: AddressFetcher + Send + Sync + 'static,
    S: EventSink,
{
    let mut timer: Option<tokio::task::JoinHandle<()>> = None;

    while let Some(command) = rx.recv().await {
        match command {
            WorkerCommand::StartTimer(interval) => {
                if let Some(old) = timer.take() {
                    old.abort();
                }
                timer = Some(tokio::spawn(run_timer(interval, sink.clone())));
            }
            WorkerCommand::Fetch(ticket) => {
                let fetcher = Arc::clone(&fetcher);
                let sink = sink.clone();
                tokio::spawn(async move {
                    let task = tokio::spawn(async move { fetcher.fetch().await });
                    let outcome = match task.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            error!(ticket = ticket.0, error = %e, "Address fetch task failed");
                            Err(FetchError::WorkerGone)
                        }
                    };
                    if !sink.post(AppEvent::FetchCompleted { ticket, outcome }) {
                        debug!(ticket = ticket.0, "Event loop gone, dropping fetch result");
                    }
                });
            }
            WorkerCommand::Shutdown => break,
        }
    }

    if let Some(timer) = timer.take() {
        timer.abort();
        info!("Check timer cancelled");
    }
}

async fn run_timer<S: EventSink>(period: Duration, sink: S) {
    // First tick completes immediately
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if !sink.post(AppEvent::Tick) {
            debug!("Event loop gone, stopping timer");
            break;
        }
    }
}
