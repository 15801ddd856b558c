//! Carousel rotation through the selected colors.
//!
//! State machine: `Stopped -> Running -> Stopped`. While running, a repeating
//! timer advances a cursor through the selection; each advance is reported as
//! a [`Tick`] for the binder to render.

use std::fmt;
use std::time::{Duration, Instant};

use crate::selection::{ColorId, SelectionRegistry};
use crate::timer::{TimerId, Timers};

/// Minimum number of selected colors before the carousel can start.
pub const MIN_COLORS: usize = 2;

/// Delay between two carousel steps.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Tunables for the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub min_colors: usize,
    pub interval: Duration,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            min_colors: MIN_COLORS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Current rotation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationState {
    #[default]
    Stopped,
    Running {
        cursor: usize,
        timer: TimerId,
    },
}

/// Successful result of [`RotationController::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Start while running: nothing was reset
    AlreadyRunning,
}

/// Refused start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationError {
    InsufficientSelection { required: usize, selected: usize },
}

impl fmt::Display for RotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientSelection { required, selected } => write!(
                f,
                "carousel needs at least {required} colors, {selected} selected"
            ),
        }
    }
}

impl std::error::Error for RotationError {}

/// One carousel step as seen by the binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Cursor moved; `id` is the color to show
    Advanced { cursor: usize, id: ColorId },
    /// Selection became empty; the controller stopped itself
    Halted,
}

/// Drives the carousel cursor with a cancellable timer.
#[derive(Debug, Default)]
pub struct RotationController {
    policy: RotationPolicy,
    state: RotationState,
    timers: Timers,
}

impl RotationController {
    pub fn new(policy: RotationPolicy) -> Self {
        Self {
            policy,
            state: RotationState::Stopped,
            timers: Timers::new(),
        }
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RotationState::Running { .. })
    }

    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            RotationState::Running { cursor, .. } => Some(cursor),
            RotationState::Stopped => None,
        }
    }

    /// Start the carousel if enough colors are selected.
    pub fn start(
        &mut self,
        selection: &SelectionRegistry,
        now: Instant,
    ) -> Result<StartOutcome, RotationError> {
        if self.is_running() {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let selected = selection.len();
        if selected < self.policy.min_colors {
            return Err(RotationError::InsufficientSelection {
                required: self.policy.min_colors,
                selected,
            });
        }

        let timer = self.timers.every(now, self.policy.interval);
        self.state = RotationState::Running { cursor: 0, timer };
        tracing::info!(
            selected,
            interval_ms = self.policy.interval.as_millis() as u64,
            "carousel started"
        );
        Ok(StartOutcome::Started)
    }

    /// Stop the carousel. The timer is disarmed before this returns.
    /// Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        let RotationState::Running { timer, .. } = self.state else {
            return false;
        };
        self.timers.cancel(timer);
        self.state = RotationState::Stopped;
        tracing::info!("carousel stopped");
        true
    }

    /// Deadline of the next step, if running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Run the step that is due at `now`, if any.
    pub fn poll(&mut self, selection: &SelectionRegistry, now: Instant) -> Option<Tick> {
        let RotationState::Running { cursor, timer } = self.state else {
            return None;
        };

        if !self.timers.poll(now).contains(&timer) {
            return None;
        }

        // The selection can change between ticks; always use its current length.
        let len = selection.len();
        if len == 0 {
            self.stop();
            return Some(Tick::Halted);
        }

        let cursor = (cursor + 1) % len;
        let id = selection.get(cursor)?.clone();
        self.state = RotationState::Running { cursor, timer };
        tracing::debug!(cursor, len, %id, "carousel step");
        Some(Tick::Advanced { cursor, id })
    }
}
