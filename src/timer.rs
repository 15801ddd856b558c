//! Cancellable repeating timers for the single-threaded event loop.
//!
//! Nothing here sleeps: the event loop asks for the next deadline, waits for
//! input up to that point, then calls [`Timers::poll`] with the current time.
//! Cancelling removes the entry immediately, so a cancelled timer can never
//! fire afterwards, even if its deadline already passed.

use std::time::{Duration, Instant};

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry {
    id: TimerId,
    due: Instant,
    period: Duration,
}

/// Set of armed repeating timers.
#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer that first fires at `now + period`, then every `period`.
    pub fn every(&mut self, now: Instant, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: now + period,
            period,
        });
        id
    }

    /// Disarm a timer. Returns false if it was not armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Collect timers whose deadline has passed, earliest first.
    ///
    /// Each timer fires at most once per call. Periods missed while the loop
    /// was stalled are dropped and the timer is rearmed one period after `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired: Vec<(Instant, TimerId)> = Vec::new();

        for entry in &mut self.entries {
            if entry.due > now {
                continue;
            }
            fired.push((entry.due, entry.id));
            entry.due += entry.period;
            if entry.due <= now {
                entry.due = now + entry.period;
            }
        }

        fired.sort_by_key(|(due, _)| *due);
        fired.into_iter().map(|(_, id)| id).collect()
    }
}
