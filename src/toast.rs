//! Auto-dismissing notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// How many toasts are stacked at once.
pub const DEFAULT_MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

/// FIFO stack of toasts; the oldest is dropped when full.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    duration: Duration,
    max_visible: usize,
}

impl ToastQueue {
    pub fn new(duration: Duration, max_visible: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
            max_visible: max_visible.max(1),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        self.prune(now);
        if self.toasts.len() == self.max_visible {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            message: message.into(),
            expires_at: now + self.duration,
        });
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().filter(move |t| t.expires_at > now)
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION, DEFAULT_MAX_VISIBLE)
    }
}
