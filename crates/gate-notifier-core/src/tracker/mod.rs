//! Detection and notification state machine.
//!
//! The tracker is a reactive state machine over two inbound messages, a
//! periodic tick and a chat announcement. It does not use internal threads
//! or timers: the host calls [`update`] (or [`GateTracker::handle`]) for every
//! message, serialized on one logical thread.
//!
//! ## Tick
//!
//! ```text
//! remaining = time_until_next_gate(now)
//! remaining > previous  -> current = next, next = None      (cycle promotion)
//! crossed lead-times    -> timer alert per lead-time         (debounced)
//! previous = remaining
//! ```
//!
//! ## Announcement
//!
//! ```text
//! first GATE named in text
//! current is None && remaining > 15 min  -> current = gate
//! otherwise                              -> next = gate
//! gate enabled                           -> detection alert  (not debounced)
//! ```

mod detection;
mod dispatcher;
mod engine;
mod state;

pub use detection::{is_system_announcement, ACTIVE_SLOT_WINDOW_MINUTES, SYSTEM_MESSAGE_CHANNEL};
pub use dispatcher::{
    deliver, detection_message, timer_message, DeliveryChannel, DutyState, NotificationSink,
    DEBOUNCE_SECS,
};
pub use engine::{update, GateTracker, Input};
pub use state::PollState;
