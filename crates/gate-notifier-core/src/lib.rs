//! # GATE Notifier Core Library
//!
//! This library tracks the Gold Saucer GATE rotation: a GATE starts every 20
//! minutes of wall-clock time (UTC minutes 0, 20 and 40), drawn from a small
//! pool of variants per slot. It infers which GATE is running or coming up
//! from the schedule and from system chat announcements, and decides when to
//! notify the player.
//!
//! ## Architecture
//!
//! - **Schedule**: pure slot-grid arithmetic and the per-slot variant pools
//! - **Tracker**: a reactive state machine; the host delivers ticks and
//!   announcements to a single `update` function on one logical thread
//! - **Storage**: TOML-based alert configuration
//! - **View**: read-only queries and view models for UI collaborators
//!
//! ## Key Components
//!
//! - [`update`] / [`GateTracker`]: the detection and notification state machine
//! - [`PollState`]: tracker state, owned by the host
//! - [`Config`]: alert configuration
//! - [`GateView`]: query surface for countdown and settings surfaces

pub mod error;
pub mod events;
pub mod gate;
pub mod schedule;
pub mod storage;
pub mod tracker;
pub mod view;

pub use error::{ConfigError, CoreError, ScheduleError, ValidationError};
pub use events::{Alert, AlertKind, Event, SlotRole};
pub use gate::{match_announcement, GateType};
pub use schedule::{
    crossed_thresholds, current_gate_time, next_gate_time, time_until_next_gate, UpcomingSlot,
};
pub use storage::Config;
pub use tracker::{
    deliver, is_system_announcement, update, DeliveryChannel, DutyState, GateTracker, Input,
    NotificationSink, PollState,
};
pub use view::{GateView, OverlaySnapshot, StatusLine};
