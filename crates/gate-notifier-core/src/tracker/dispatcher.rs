//! Alert decisions, message rendering and channel delivery.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::PollState;
use crate::events::{Alert, AlertKind};
use crate::gate::GateType;
use crate::schedule::possible_gates;
use crate::storage::{Config, NotificationsConfig};

/// Minimum spacing between two timer alerts.
pub const DEBOUNCE_SECS: i64 = 30;

/// Whether the player is in a state where alerts should be held back
/// (e.g. bound by an instanced duty).
pub trait DutyState {
    fn is_suppressed(&self) -> bool;
}

impl DutyState for bool {
    fn is_suppressed(&self) -> bool {
        *self
    }
}

/// Outbound notification channels. Every call is fire-and-forget.
pub trait NotificationSink {
    fn send_chat_message(&mut self, text: &str);

    fn show_toast(&mut self, text: &str);

    fn play_sound(&mut self, effect_id: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    Chat,
    Toast,
    Sound,
}

/// Decide whether a crossed lead-time becomes an alert.
///
/// Short-circuits, in order, on duty suppression, on a slot with no enabled
/// GATE, and on the debounce window. Only an alert that goes out moves the
/// debounce timestamp.
pub(crate) fn timer_alert<D: DutyState + ?Sized>(
    state: &mut PollState,
    lead_minutes: u32,
    now: DateTime<Utc>,
    config: &Config,
    duty: &D,
) -> Option<Alert> {
    if config.suppress_in_duty && duty.is_suppressed() {
        debug!(lead_minutes, "timer alert suppressed in duty");
        return None;
    }

    let possible = possible_gates(now);
    if !possible.iter().any(|&g| config.is_gate_enabled(g)) {
        debug!(lead_minutes, "no tracked GATE in upcoming slot");
        return None;
    }

    if let Some(last) = state.last_alert_at {
        if now - last < Duration::seconds(DEBOUNCE_SECS) {
            debug!(lead_minutes, "timer alert debounced");
            return None;
        }
    }
    state.last_alert_at = Some(now);

    Some(Alert {
        kind: AlertKind::Timer { lead_minutes },
        message: timer_message(lead_minutes, state.next, possible),
        at: now,
    })
}

/// Decide whether a detected GATE becomes an alert.
///
/// Only duty suppression applies. The debounce timestamp is neither read
/// nor written, so detection and timer alerts never hold each other back.
/// Callers check per-GATE enablement first.
pub(crate) fn detection_alert<D: DutyState + ?Sized>(
    gate: GateType,
    now: DateTime<Utc>,
    config: &Config,
    duty: &D,
) -> Option<Alert> {
    if config.suppress_in_duty && duty.is_suppressed() {
        debug!(gate = %gate, "detection alert suppressed in duty");
        return None;
    }

    Some(Alert {
        kind: AlertKind::Detection { gate },
        message: detection_message(gate),
        at: now,
    })
}

/// Text of a lead-time alert.
///
/// Names the announced GATE when one is known, otherwise lists the slot's
/// pool.
pub fn timer_message(lead_minutes: u32, next: Option<GateType>, possible: &[GateType]) -> String {
    let unit = if lead_minutes == 1 { "minute" } else { "minutes" };
    match next {
        Some(gate) => format!("[GATE] {gate} starts in {lead_minutes} {unit}!"),
        None => {
            let names: Vec<&str> = possible.iter().map(|g| g.display_name()).collect();
            format!("[GATE] {lead_minutes} {unit}! Possible: {}", names.join(" / "))
        }
    }
}

pub fn detection_message(gate: GateType) -> String {
    format!("[GATE] Upcoming GATE: {gate}!")
}

/// Send `alert` to every enabled channel, returning the channels used.
///
/// Channels are independent: nothing is retried or rolled back.
pub fn deliver<S: NotificationSink + ?Sized>(
    alert: &Alert,
    channels: &NotificationsConfig,
    sink: &mut S,
) -> Vec<DeliveryChannel> {
    let mut used = Vec::with_capacity(3);
    if channels.chat {
        sink.send_chat_message(&alert.message);
        used.push(DeliveryChannel::Chat);
    }
    if channels.toast {
        sink.show_toast(&alert.message);
        used.push(DeliveryChannel::Toast);
    }
    if channels.sound {
        sink.play_sound(channels.sound_effect);
        used.push(DeliveryChannel::Sound);
    }
    used
}
