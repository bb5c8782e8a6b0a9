//! Network and startup monitors
//!
//! Purely observational: the connectivity monitor probes the backend
//! address on a worker thread and reports online/offline transitions; the
//! startup timer reports the time to the first complete data load, once.

use std::net::{TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Load duration above which a warning is logged
pub const SLOW_LOAD: Duration = Duration::from_millis(3000);

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

/// Handle to the background probe thread
///
/// Dropping the handle is the teardown path: the thread observes the flag
/// and exits within one poll step.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    receiver: Receiver<ConnectivityEvent>,
    shutdown: Arc<AtomicBool>,
}

impl ConnectivityMonitor {
    /// Start probing `addr` every `probe_interval`
    pub fn spawn(addr: String, probe_interval: Duration) -> ConnectivityMonitor {
        let (tx, rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let thread_shutdown = Arc::clone(&shutdown);

        thread::spawn(move || {
            let mut last_state: Option<bool> = None;
            while !thread_shutdown.load(Ordering::Relaxed) {
                let up = probe(&addr);
                if let Some(event) = transition(last_state, up) {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                last_state = Some(up);

                // sleep in short steps so shutdown stays prompt
                let mut remaining = probe_interval;
                while remaining > Duration::ZERO {
                    if thread_shutdown.load(Ordering::Relaxed) {
                        return;
                    }
                    let step = remaining.min(Duration::from_millis(250));
                    thread::sleep(step);
                    remaining -= step;
                }
            }
        });

        ConnectivityMonitor {
            receiver: rx,
            shutdown,
        }
    }

    /// Next pending transition, if any
    pub fn poll(&self) -> Option<ConnectivityEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

fn probe(addr: &str) -> bool {
    let Ok(mut addrs) = addr.to_socket_addrs() else {
        return false;
    };
    let Some(addr) = addrs.next() else {
        return false;
    };
    TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok()
}

/// The first probe records state silently; only changes produce an event
fn transition(last: Option<bool>, up: bool) -> Option<ConnectivityEvent> {
    match (last, up) {
        (Some(false), true) => Some(ConnectivityEvent::Online),
        (Some(true), false) => Some(ConnectivityEvent::Offline),
        _ => None,
    }
}

/// Reports the duration from process start to the first complete data
/// load, exactly once
#[derive(Debug)]
pub struct StartupTimer {
    started: Instant,
    reported: bool,
}

impl StartupTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(started: Instant) -> Self {
        Self {
            started,
            reported: false,
        }
    }

    /// Elapsed time since start, or `None` if already reported
    pub fn report(&mut self) -> Option<Duration> {
        self.report_at(Instant::now())
    }

    pub fn report_at(&mut self, now: Instant) -> Option<Duration> {
        if self.reported {
            return None;
        }
        self.reported = true;
        Some(now.duration_since(self.started))
    }
}

impl Default for StartupTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_probe_is_silent() {
        assert_eq!(transition(None, true), None);
        assert_eq!(transition(None, false), None);
    }

    #[test]
    fn test_transitions_produce_events() {
        assert_eq!(transition(Some(false), true), Some(ConnectivityEvent::Online));
        assert_eq!(
            transition(Some(true), false),
            Some(ConnectivityEvent::Offline)
        );
    }

    #[test]
    fn test_steady_state_is_silent() {
        assert_eq!(transition(Some(true), true), None);
        assert_eq!(transition(Some(false), false), None);
    }

    #[test]
    fn test_startup_timer_reports_once() {
        let start = Instant::now();
        let mut timer = StartupTimer::starting_at(start);
        let elapsed = timer.report_at(start + Duration::from_millis(1200));
        assert_eq!(elapsed, Some(Duration::from_millis(1200)));
        assert_eq!(timer.report_at(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn test_slow_load_threshold() {
        let start = Instant::now();
        let mut timer = StartupTimer::starting_at(start);
        let elapsed = timer.report_at(start + Duration::from_millis(3500)).unwrap();
        assert!(elapsed > SLOW_LOAD);
    }

    #[test]
    fn test_monitor_shutdown_does_not_hang() {
        let monitor = ConnectivityMonitor::spawn("127.0.0.1:1".to_string(), Duration::from_secs(10));
        assert!(monitor.poll().is_none());
        drop(monitor);
    }
}
