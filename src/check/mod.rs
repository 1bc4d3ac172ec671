//! Public address checking
//!
//! Contains:
//! - Check state and status ([`state`])
//! - Address fetching over HTTP ([`fetcher`])
//! - The single-flight poll loop ([`poll`])

pub mod fetcher;
pub mod poll;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
