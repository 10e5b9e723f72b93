//! Cooperative countdown timers driven by engine ticks.

use log::trace;

/// Engine timers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Fixed-interval step advance
    AutoAdvance,
    /// Delayed display of suggestions after an arrival
    SuggestionDisplay,
    /// Traffic level update
    Traffic,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    kind: TimerKind,
    remaining: f32,
    period: Option<f32>,
}

/// Set of pending timers, at most one per kind.
///
/// Nothing runs in the background: [`TimerSet::advance`] reports which
/// timers expired and the owner acts on them.
#[derive(Clone, Debug, Default)]
pub struct TimerSet {
    timers: Vec<Timer>,
}

impl TimerSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, timer: Timer) {
        self.cancel(timer.kind);
        self.timers.push(timer);
        self.timers.sort_by_key(|t| t.kind);
    }

    /// Fire once after `delay` seconds, replacing any timer of this kind
    pub fn schedule_once(&mut self, kind: TimerKind, delay: f32) {
        trace!("[Timers] {:?} once in {:.2}s", kind, delay);
        self.insert(Timer {
            kind,
            remaining: delay.max(0.0),
            period: None,
        });
    }

    /// Fire every `period` seconds, replacing any timer of this kind.
    ///
    /// Non-positive periods are ignored.
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: f32) {
        if period <= 0.0 {
            return;
        }
        trace!("[Timers] {:?} every {:.2}s", kind, period);
        self.insert(Timer {
            kind,
            remaining: period,
            period: Some(period),
        });
    }

    /// Cancel one timer
    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    /// Cancel every timer
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Is a timer of this kind pending?
    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Are there no pending timers?
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Let `dt` seconds pass; returns expirations in kind order.
    ///
    /// A repeating timer fires once per elapsed period.
    pub fn advance(&mut self, dt: f32) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            timer.remaining -= dt;
            while timer.remaining <= 0.0 {
                fired.push(timer.kind);
                match timer.period {
                    Some(period) => timer.remaining += period,
                    None => break,
                }
            }
        }
        self.timers.retain(|t| t.period.is_some() || t.remaining > 0.0);
        fired
    }
}
