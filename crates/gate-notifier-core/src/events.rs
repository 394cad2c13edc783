use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::GateType;

/// Which slot an announcement was attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    /// The slot that is running now.
    Current,
    /// The slot that starts at the next boundary.
    Next,
}

/// Why an alert was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertKind {
    /// A configured lead-time was crossed.
    Timer { lead_minutes: u32 },
    /// An announcement named an enabled GATE.
    Detection { gate: GateType },
}

/// A notification ready to be delivered to the enabled channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(flatten)]
    pub kind: AlertKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Every state change in the tracker produces an Event.
/// Hosts deliver the `AlertRaised` ones and may log the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The countdown wrapped: the announced next GATE is now the current one.
    CycleAdvanced {
        current: Option<GateType>,
        at: DateTime<Utc>,
    },
    /// An announcement was matched and attributed to a slot.
    GateDetected {
        gate: GateType,
        slot: SlotRole,
        channel_tag: u16,
        at: DateTime<Utc>,
    },
    AlertRaised { alert: Alert },
}

impl Event {
    /// The alert carried by this event, if any.
    pub fn alert(&self) -> Option<&Alert> {
        match self {
            Event::AlertRaised { alert } => Some(alert),
            _ => None,
        }
    }
}
