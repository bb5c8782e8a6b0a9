//! Background services
//!
//! Services own the threads and timers behind the UI: running backend
//! commands, scheduling auto-refresh, probing connectivity, and the system
//! clipboard. Each is constructed explicitly by the composition root and
//! torn down when the app shuts down.

pub mod clipboard;
pub mod export;
pub mod fetch;
pub mod monitor;
pub mod refresh;

pub use clipboard::ClipboardService;
pub use fetch::{FetchRunner, JobKind, JobOutcome};
pub use monitor::{ConnectivityEvent, ConnectivityMonitor, StartupTimer};
pub use refresh::RefreshScheduler;

/// Result of binding an optional capability at startup
///
/// Construction states its outcome explicitly instead of silently skipping
/// an absent integration; callers match on it at the point of use.
#[derive(Debug)]
pub enum Binding<T> {
    Bound(T),
    Absent,
}

impl<T> Binding<T> {
    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Binding::Bound(inner) => Some(inner),
            Binding::Absent => None,
        }
    }
}
