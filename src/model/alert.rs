//! Alert banners
//!
//! Ephemeral, non-blocking notices stacked above the dashboard. Each banner
//! gets a unique generated id, is auto-removed after a fixed delay, and can
//! be dismissed manually before that.

use std::time::{Duration, Instant};

/// How long a banner stays up without manual dismissal
pub const DISMISS_AFTER: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    /// Icon glyph shown before the message
    pub fn icon(&self) -> &'static str {
        match self {
            AlertKind::Success => "✔",
            AlertKind::Error | AlertKind::Warning => "⚠",
            AlertKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub kind: AlertKind,
    created: Instant,
}

/// Stack of live banners, newest first
#[derive(Debug)]
pub struct AlertStack {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl Default for AlertStack {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertStack {
    pub fn new() -> Self {
        Self {
            alerts: Vec::new(),
            next_id: 0,
        }
    }

    /// Insert a new banner at the front, returning its id
    pub fn push(&mut self, message: impl Into<String>, kind: AlertKind) -> u64 {
        self.push_at(message, kind, Instant::now())
    }

    pub fn push_at(&mut self, message: impl Into<String>, kind: AlertKind, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.alerts.insert(
            0,
            Alert {
                id,
                message: message.into(),
                kind,
                created: now,
            },
        );
        id
    }

    /// Remove banners whose delay has elapsed
    pub fn expire(&mut self) {
        self.expire_at(Instant::now());
    }

    pub fn expire_at(&mut self, now: Instant) {
        self.alerts
            .retain(|alert| now.duration_since(alert.created) < DISMISS_AFTER);
    }

    /// Manually dismiss the newest banner
    pub fn dismiss_newest(&mut self) -> Option<u64> {
        if self.alerts.is_empty() {
            None
        } else {
            Some(self.alerts.remove(0).id)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_inserts_exactly_one_banner() {
        let mut stack = AlertStack::new();
        stack.push("تم الحفظ بنجاح", AlertKind::Success);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut stack = AlertStack::new();
        let a = stack.push("a", AlertKind::Info);
        let b = stack.push("b", AlertKind::Info);
        assert_ne!(a, b);
    }

    #[test]
    fn test_newest_first() {
        let mut stack = AlertStack::new();
        stack.push("first", AlertKind::Info);
        stack.push("second", AlertKind::Info);
        let messages: Vec<_> = stack.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn test_expires_after_fixed_delay() {
        let mut stack = AlertStack::new();
        let start = Instant::now();
        stack.push_at("عابر", AlertKind::Warning, start);

        stack.expire_at(start + Duration::from_millis(4999));
        assert_eq!(stack.len(), 1);

        stack.expire_at(start + DISMISS_AFTER);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_manual_dismiss_removes_newest() {
        let mut stack = AlertStack::new();
        stack.push("old", AlertKind::Info);
        let newest = stack.push("new", AlertKind::Info);
        assert_eq!(stack.dismiss_newest(), Some(newest));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.iter().next().unwrap().message, "old");
    }

    #[test]
    fn test_dismiss_on_empty_stack_is_noop() {
        let mut stack = AlertStack::new();
        assert_eq!(stack.dismiss_newest(), None);
    }

    #[test]
    fn test_icon_mapping() {
        assert_eq!(AlertKind::Success.icon(), "✔");
        assert_eq!(AlertKind::Error.icon(), "⚠");
        assert_eq!(AlertKind::Warning.icon(), "⚠");
        assert_eq!(AlertKind::Info.icon(), "ℹ");
    }
}
