use chrono::{DateTime, Duration, Utc};

use crate::gate::GateType;
use crate::schedule::time_until_next_gate;

/// Everything the tracker remembers between two messages.
///
/// Owned by the host and threaded through [`super::update`]; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    pub(crate) previous_remaining: Duration,
    /// `None` until the first timer alert goes out.
    pub(crate) last_alert_at: Option<DateTime<Utc>>,
    /// GATE believed to be running in the current slot.
    pub(crate) current: Option<GateType>,
    /// GATE announced for the next slot.
    pub(crate) next: Option<GateType>,
}

impl PollState {
    /// Fresh state for a tracker starting at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            previous_remaining: time_until_next_gate(now),
            last_alert_at: None,
            current: None,
            next: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn previous_remaining(&self) -> Duration {
        self.previous_remaining
    }

    pub fn last_alert_at(&self) -> Option<DateTime<Utc>> {
        self.last_alert_at
    }

    pub fn current_gate(&self) -> Option<GateType> {
        self.current
    }

    pub fn next_gate(&self) -> Option<GateType> {
        self.next
    }

    pub fn current_gate_name(&self) -> Option<&'static str> {
        self.current.map(GateType::display_name)
    }

    pub fn next_gate_name(&self) -> Option<&'static str> {
        self.next.map(GateType::display_name)
    }
}
