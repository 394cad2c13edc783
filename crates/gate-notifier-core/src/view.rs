//! Read-only queries for UI collaborators.
//!
//! Everything here is computed on demand from a `now` instant, the current
//! [`PollState`] and the current [`Config`]. Nothing is cached.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::GateType;
use crate::schedule::{self, UpcomingSlot};
use crate::storage::Config;
use crate::tracker::PollState;

/// Slots listed by the overlay's schedule section.
pub const OVERLAY_UPCOMING_SLOTS: usize = 3;

/// Compact countdown for a status bar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub shown: bool,
    /// `GATE mm:ss`
    pub text: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCandidate {
    pub gate: GateType,
    pub name: String,
    pub enabled: bool,
}

/// One section of the overlay: a detected GATE, or the slot's pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub detected: Option<GateType>,
    /// Empty when `detected` is set.
    pub candidates: Vec<GateCandidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPreview {
    pub at: DateTime<Utc>,
    pub gates: Vec<GateCandidate>,
    pub has_tracked_gate: bool,
}

/// Everything the countdown overlay displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    pub visible: bool,
    pub countdown: String,
    pub next_gate_at: DateTime<Utc>,
    /// Whether the upcoming slot can run any enabled GATE.
    pub has_tracked_gate: bool,
    pub active: SlotSummary,
    pub next: SlotSummary,
    pub upcoming: Vec<SlotPreview>,
}

/// Query surface over the tracker, pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct GateView<'a> {
    state: &'a PollState,
    config: &'a Config,
    now: DateTime<Utc>,
}

impl<'a> GateView<'a> {
    pub fn new(state: &'a PollState, config: &'a Config, now: DateTime<Utc>) -> Self {
        Self { state, config, now }
    }

    /// View at the current wall-clock instant.
    pub fn at_now(state: &'a PollState, config: &'a Config) -> Self {
        Self::new(state, config, Utc::now())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn time_until_next_gate(&self) -> Duration {
        schedule::time_until_next_gate(self.now)
    }

    pub fn possible_gates_next_slot(&self) -> &'static [GateType; 3] {
        schedule::possible_gates(self.now)
    }

    pub fn possible_gates_current_slot(&self) -> &'static [GateType; 3] {
        schedule::current_possible_gates(self.now)
    }

    pub fn upcoming_slots(&self, count: usize) -> Vec<UpcomingSlot> {
        schedule::upcoming_slots(self.now, count)
    }

    /// Enablement by display name. Unknown names are never enabled.
    pub fn is_gate_enabled(&self, name: &str) -> bool {
        GateType::from_display_name(name).is_some_and(|g| self.config.is_gate_enabled(g))
    }

    pub fn has_any_enabled_gate(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.is_gate_enabled(name))
    }

    pub fn current_gate_name(&self) -> Option<&'static str> {
        self.state.current_gate_name()
    }

    pub fn next_gate_name(&self) -> Option<&'static str> {
        self.state.next_gate_name()
    }

    pub fn status_line(&self) -> StatusLine {
        let tooltip = if let Some(name) = self.current_gate_name() {
            format!("Current: {name}")
        } else if let Some(name) = self.next_gate_name() {
            format!("Next: {name}")
        } else {
            format!("Possible: {}", join_names(self.possible_gates_next_slot()))
        };

        StatusLine {
            shown: self.config.display.show_status_bar,
            text: format!("GATE {}", format_countdown(self.time_until_next_gate())),
            tooltip,
        }
    }

    pub fn overlay(&self) -> OverlaySnapshot {
        let next_pool = self.possible_gates_next_slot();
        OverlaySnapshot {
            visible: self.config.display.show_overlay,
            countdown: format_countdown(self.time_until_next_gate()),
            next_gate_at: schedule::next_gate_time(self.now),
            has_tracked_gate: self.any_enabled(next_pool),
            active: self.summary(self.state.current_gate(), self.possible_gates_current_slot()),
            next: self.summary(self.state.next_gate(), next_pool),
            upcoming: self
                .upcoming_slots(OVERLAY_UPCOMING_SLOTS)
                .into_iter()
                .map(|slot| SlotPreview {
                    at: slot.at,
                    has_tracked_gate: self.any_enabled(&slot.gates),
                    gates: self.candidates(&slot.gates),
                })
                .collect(),
        }
    }

    fn any_enabled(&self, gates: &[GateType]) -> bool {
        gates.iter().any(|&g| self.config.is_gate_enabled(g))
    }

    fn candidates(&self, gates: &[GateType]) -> Vec<GateCandidate> {
        gates
            .iter()
            .map(|&gate| GateCandidate {
                gate,
                name: gate.display_name().to_string(),
                enabled: self.config.is_gate_enabled(gate),
            })
            .collect()
    }

    fn summary(&self, detected: Option<GateType>, pool: &[GateType]) -> SlotSummary {
        SlotSummary {
            detected,
            candidates: if detected.is_some() {
                Vec::new()
            } else {
                self.candidates(pool)
            },
        }
    }
}

/// `mm:ss`, truncating sub-second parts.
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn join_names(gates: &[GateType]) -> String {
    gates
        .iter()
        .map(|g| g.display_name())
        .collect::<Vec<_>>()
        .join(" / ")
}
