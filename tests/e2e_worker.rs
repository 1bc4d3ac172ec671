//! E2E tests for the background worker
//!
//! Verifies that ticks and fetch outcomes are posted back as events and that
//! cancelling stops the timer.

use ipchecker::check::fetcher::{AddressFetcher, FetchError};
use ipchecker::check::poll::{CheckDispatcher, CheckTicket};
use ipchecker::event::AppEvent;
use ipchecker::worker::WorkerHandle;
use std::future::Future;
use std::sync::mpsc;
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(2);

struct FixedFetcher(&'static str);

impl AddressFetcher for FixedFetcher {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send {
        let address = self.0.to_string();
        async move { Ok(address) }
    }
}

struct FailingFetcher;

impl AddressFetcher for FailingFetcher {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send {
        async { Err(FetchError::Status(500)) }
    }
}

#[test]
fn test_dispatch_posts_outcome_with_ticket() {
    let (tx, rx) = mpsc::channel();
    let mut worker = WorkerHandle::spawn(FixedFetcher("203.0.113.5"), tx).unwrap();

    assert!(worker.dispatch(CheckTicket(7)));

    match rx.recv_timeout(WAIT).unwrap() {
        AppEvent::FetchCompleted { ticket, outcome } => {
            assert_eq!(ticket, CheckTicket(7));
            assert_eq!(outcome.unwrap(), "203.0.113.5");
        }
        other => panic!("expected FetchCompleted, got {:?}", other),
    }

    worker.shutdown();
}

#[test]
fn test_dispatch_posts_failure() {
    let (tx, rx) = mpsc::channel();
    let mut worker = WorkerHandle::spawn(FailingFetcher, tx).unwrap();

    assert!(worker.dispatch(CheckTicket(1)));

    match rx.recv_timeout(WAIT).unwrap() {
        AppEvent::FetchCompleted { outcome, .. } => {
            assert!(matches!(outcome, Err(FetchError::Status(500))));
        }
        other => panic!("expected FetchCompleted, got {:?}", other),
    }

    worker.shutdown();
}

struct PanickingFetcher;

impl AddressFetcher for PanickingFetcher {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send {
        async {
            let address: Option<String> = None;
            Ok(address.expect("resolver crashed"))
        }
    }
}

#[test]
fn test_panicking_fetch_still_reports_back() {
    let (tx, rx) = mpsc::channel();
    let mut worker = WorkerHandle::spawn(PanickingFetcher, tx).unwrap();

    assert!(worker.dispatch(CheckTicket(3)));

    match rx.recv_timeout(WAIT).unwrap() {
        AppEvent::FetchCompleted { ticket, outcome } => {
            assert_eq!(ticket, CheckTicket(3));
            assert!(matches!(outcome, Err(FetchError::WorkerGone)));
        }
        other => panic!("expected FetchCompleted, got {:?}", other),
    }

    worker.shutdown();
}

/// Blocks its runtime thread, like a resolver stuck in `getaddrinfo`
struct StuckFetcher;

impl AddressFetcher for StuckFetcher {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send {
        async {
            std::thread::sleep(Duration::from_secs(10));
            Ok("10.0.0.1".to_string())
        }
    }
}

#[test]
fn test_shutdown_does_not_wait_for_stuck_fetch() {
    let (tx, _rx) = mpsc::channel();
    let mut worker = WorkerHandle::spawn(StuckFetcher, tx).unwrap();

    assert!(worker.dispatch(CheckTicket(1)));
    std::thread::sleep(Duration::from_millis(50));

    let started = Instant::now();
    worker.shutdown();
    assert!(started.elapsed() < WAIT, "shutdown blocked on the fetch");
}

#[test]
fn test_timer_ticks_immediately_then_repeats() {
    let (tx, rx) = mpsc::channel();
    let mut worker = WorkerHandle::spawn(FixedFetcher("1.2.3.4"), tx).unwrap();

    worker.start_timer(Duration::from_millis(50));

    assert!(matches!(rx.recv_timeout(WAIT).unwrap(), AppEvent::Tick));
    assert!(matches!(rx.recv_timeout(WAIT).unwrap(), AppEvent::Tick));

    worker.shutdown();
}

#[test]
fn test_cancel_stops_ticks() {
    let (tx, rx) = mpsc::channel();
    let mut worker = WorkerHandle::spawn(FixedFetcher("1.2.3.4"), tx).unwrap();

    worker.start_timer(Duration::from_millis(20));
    assert!(matches!(rx.recv_timeout(WAIT).unwrap(), AppEvent::Tick));

    worker.cancel();
    while rx.try_recv().is_ok() {}

    std::thread::sleep(Duration::from_millis(100));
    assert!(rx.try_recv().is_err(), "no ticks after cancel");
}

#[test]
fn test_shutdown_is_idempotent() {
    let (tx, _rx) = mpsc::channel();
    let mut worker = WorkerHandle::spawn(FixedFetcher("1.2.3.4"), tx).unwrap();

    worker.shutdown();
    worker.shutdown();
    // Fetches after shutdown are refused without panicking
    assert!(!worker.dispatch(CheckTicket(1)));
}
