//! The GATE slot grid.
//!
//! GATEs start every 20 minutes of wall-clock time, at minutes 0, 20 and 40 of
//! every hour (UTC). This module is pure: every function takes `now`
//! explicitly and nothing here holds state.
//!
//! - [`clock`]: slot boundary arithmetic
//! - [`pools`]: which variants can run in which slot
//! - [`thresholds`]: lead-time crossing between two polls

pub mod clock;
pub mod pools;
pub mod thresholds;

pub use clock::{
    current_gate_time, current_possible_gates, next_gate_time, possible_gates, time_until_next_gate,
    upcoming_slots, UpcomingSlot, GATE_MINUTES, SLOT_LENGTH_MINUTES,
};
pub use pools::slot_pool;
pub use thresholds::crossed_thresholds;
