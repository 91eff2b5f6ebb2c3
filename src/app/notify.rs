//! Fire-and-forget user notifications.
//!
//! Applications emit [`Action::Notify`](crate::app::Action::Notify); the
//! runtime hands the notification to whatever [`NotificationSink`] it was
//! built with. Sinks must not fail.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
        };
        write!(f, "{marker} {}", self.message)
    }
}

/// Destination for notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: &Notification);
}

/// Sink that only records notifications in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => tracing::info!(message = %notification.message, "notification"),
            NotificationKind::Error => tracing::warn!(message = %notification.message, "notification"),
        }
    }
}

/// Keeps the most recent notifications for the terminal toast area.
#[derive(Debug, Clone)]
pub struct ToastSink {
    recent: VecDeque<Notification>,
    capacity: usize,
}

impl ToastSink {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Notifications newest first.
    pub fn recent(&self) -> impl Iterator<Item = &Notification> {
        self.recent.iter().rev()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.recent.back()
    }
}

impl Default for ToastSink {
    fn default() -> Self {
        Self::new(3)
    }
}

impl NotificationSink for ToastSink {
    fn notify(&mut self, notification: &Notification) {
        TracingSink.notify(notification);
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_sink_keeps_newest_within_capacity() {
        let mut sink = ToastSink::new(2);
        sink.notify(&Notification::success("one"));
        sink.notify(&Notification::error("two"));
        sink.notify(&Notification::success("three"));

        let messages: Vec<_> = sink.recent().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["three", "two"]);
        assert_eq!(sink.latest().map(ToString::to_string), Some("✓ three".to_string()));
    }
}
