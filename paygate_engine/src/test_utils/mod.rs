//! Helpers for exercising the adapters without a real gateway.
//!
//! * [`ScriptedTransport`] replays canned responses in order and records every request it was given.
//! * [`PinSimulator`] is a small in-memory Pin Payments backend that enforces the charge lifecycle rules (capture
//!   limits, cumulative refunds, fresh customer tokens), so lifecycle properties can be tested end to end.
use std::sync::{Mutex, MutexGuard};

pub mod pin_simulator;
pub mod prepare_env;
pub mod scripted;

pub use pin_simulator::PinSimulator;
pub use prepare_env::{prepare_test_env, test_card};
pub use scripted::ScriptedTransport;

/// Locks a mutex, carrying on if another test thread panicked while holding it.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
