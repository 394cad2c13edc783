//! The single update path for ticks and announcements.
//!
//! ## Usage
//!
//! ```ignore
//! let mut state = PollState::new(Utc::now());
//! // In the host loop:
//! let (next, events) = update(state, &Input::Tick { now: Utc::now() }, &config, &in_duty);
//! state = next;
//! ```

use chrono::{DateTime, Utc};
use tracing::trace;

use super::detection::{attribute_announcement, promote_on_wrap};
use super::dispatcher::{deliver, detection_alert, timer_alert, DutyState, NotificationSink};
use super::state::PollState;
use crate::events::Event;
use crate::schedule::{crossed_thresholds, time_until_next_gate};
use crate::storage::Config;

/// Inbound messages from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Periodic poll. Should arrive well under every 20 seconds.
    Tick { now: DateTime<Utc> },
    /// A system chat message, already filtered by the host.
    Announcement {
        text: String,
        channel_tag: u16,
        now: DateTime<Utc>,
    },
}

/// Apply one message to `state`, returning the new state and what happened.
///
/// Configuration is read as given on every call. Alerts come back as
/// [`Event::AlertRaised`]; delivering them is up to the caller (see
/// [`GateTracker`]).
pub fn update<D: DutyState + ?Sized>(
    mut state: PollState,
    input: &Input,
    config: &Config,
    duty: &D,
) -> (PollState, Vec<Event>) {
    let mut events = Vec::new();
    match input {
        Input::Tick { now } => on_tick(&mut state, *now, config, duty, &mut events),
        Input::Announcement {
            text,
            channel_tag,
            now,
        } => on_announcement(&mut state, text, *channel_tag, *now, config, duty, &mut events),
    }
    (state, events)
}

fn on_tick<D: DutyState + ?Sized>(
    state: &mut PollState,
    now: DateTime<Utc>,
    config: &Config,
    duty: &D,
    events: &mut Vec<Event>,
) {
    let remaining = time_until_next_gate(now);

    // Promotion compares against the previous sample, so it runs first.
    events.extend(promote_on_wrap(state, remaining, now));

    if config.detection.timer {
        let crossed = crossed_thresholds(state.previous_remaining, remaining, &config.alert_minutes_before);
        for lead_minutes in crossed {
            if let Some(alert) = timer_alert(state, lead_minutes, now, config, duty) {
                events.push(Event::AlertRaised { alert });
            }
        }
    }

    state.previous_remaining = remaining;
}

fn on_announcement<D: DutyState + ?Sized>(
    state: &mut PollState,
    text: &str,
    channel_tag: u16,
    now: DateTime<Utc>,
    config: &Config,
    duty: &D,
    events: &mut Vec<Event>,
) {
    if !config.detection.chat {
        return;
    }

    let Some((gate, slot)) = attribute_announcement(state, text, now) else {
        trace!(channel_tag, "announcement names no GATE");
        return;
    };
    events.push(Event::GateDetected {
        gate,
        slot,
        channel_tag,
        at: now,
    });

    if config.is_gate_enabled(gate) {
        if let Some(alert) = detection_alert(gate, now, config, duty) {
            events.push(Event::AlertRaised { alert });
        }
    }
}

/// Owns a [`PollState`] and delivers alerts as they are raised.
#[derive(Debug, Clone)]
pub struct GateTracker {
    state: PollState,
}

impl GateTracker {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: PollState::new(now),
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run [`update`] and push every resulting alert to `sink`.
    pub fn handle<D, S>(&mut self, input: &Input, config: &Config, duty: &D, sink: &mut S) -> Vec<Event>
    where
        D: DutyState + ?Sized,
        S: NotificationSink + ?Sized,
    {
        let (next, events) = update(self.state, input, config, duty);
        self.state = next;
        for alert in events.iter().filter_map(Event::alert) {
            deliver(alert, &config.notifications, sink);
        }
        events
    }
}
