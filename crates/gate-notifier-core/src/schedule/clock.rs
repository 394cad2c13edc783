//! Slot boundary arithmetic.
//!
//! A boundary is any instant whose minute is in [`GATE_MINUTES`] and whose
//! seconds (including the sub-second part) are zero.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::pools::slot_pool;
use crate::gate::GateType;

/// Slot-start minutes, ascending.
pub const GATE_MINUTES: [u32; 3] = [0, 20, 40];

/// Length of one slot.
pub const SLOT_LENGTH_MINUTES: i64 = 20;

/// One entry of [`upcoming_slots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingSlot {
    pub at: DateTime<Utc>,
    pub gates: [GateType; 3],
}

/// The next slot boundary.
///
/// Strictly after `now`, unless `now` sits exactly on a boundary, in which
/// case `now` itself is returned.
pub fn next_gate_time(now: DateTime<Utc>) -> DateTime<Utc> {
    let minute = now.minute();
    let on_whole_minute = now.second() == 0 && now.nanosecond() == 0;
    let hour = hour_start(now);

    for gate_minute in GATE_MINUTES {
        if minute < gate_minute || (minute == gate_minute && on_whole_minute) {
            return hour + Duration::minutes(i64::from(gate_minute));
        }
    }

    // Past :40, so the next GATE is :00 of the next hour.
    hour + Duration::hours(1)
}

/// The most recently passed slot boundary, `now` included.
pub fn current_gate_time(now: DateTime<Utc>) -> DateTime<Utc> {
    let minute = now.minute();
    let hour = hour_start(now);

    for gate_minute in GATE_MINUTES.into_iter().rev() {
        if minute >= gate_minute {
            return hour + Duration::minutes(i64::from(gate_minute));
        }
    }

    // Only reachable if the grid stops starting at :00: the slot is then
    // the last one of the previous hour.
    hour - Duration::minutes(SLOT_LENGTH_MINUTES)
}

/// Time left until [`next_gate_time`]. Always in `[0, 20 min)`.
pub fn time_until_next_gate(now: DateTime<Utc>) -> Duration {
    next_gate_time(now) - now
}

/// Variants that can run in the upcoming slot.
pub fn possible_gates(now: DateTime<Utc>) -> &'static [GateType; 3] {
    pool_at(next_gate_time(now))
}

/// Variants that can run in the slot that is currently active.
pub fn current_possible_gates(now: DateTime<Utc>) -> &'static [GateType; 3] {
    pool_at(current_gate_time(now))
}

/// `count` slots starting at the next boundary, 20 minutes apart.
pub fn upcoming_slots(now: DateTime<Utc>, count: usize) -> Vec<UpcomingSlot> {
    let first = next_gate_time(now);
    (0..count)
        .map(|i| {
            let at = first + Duration::minutes(SLOT_LENGTH_MINUTES * i as i64);
            UpcomingSlot {
                at,
                gates: *pool_at(at),
            }
        })
        .collect()
}

fn hour_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let into_hour = i64::from(now.minute() * 60 + now.second());
    now - Duration::seconds(into_hour) - Duration::nanoseconds(i64::from(now.nanosecond()))
}

/// Boundaries produced by this module always land on the grid, so a miss
/// here is a bug rather than an input error.
fn pool_at(boundary: DateTime<Utc>) -> &'static [GateType; 3] {
    slot_pool(boundary.minute())
        .unwrap_or_else(|err| panic!("slot grid invariant violated at {boundary}: {err}"))
}
