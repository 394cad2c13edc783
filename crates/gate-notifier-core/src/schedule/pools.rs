//! Slot pools: the three variants that can be drawn for each slot minute.

use crate::error::ScheduleError;
use crate::gate::GateType;

const POOL_00: [GateType; 3] = [
    GateType::AirForceOne,
    GateType::Cliffhanger,
    GateType::LeapOfFaith,
];

const POOL_20: [GateType; 3] = [
    GateType::AnyWayTheWindBlows,
    GateType::TheSliceIsRight,
    GateType::AirForceOne,
];

const POOL_40: [GateType; 3] = [
    GateType::TheSliceIsRight,
    GateType::LeapOfFaith,
    GateType::AirForceOne,
];

/// Possible variants for the slot starting at `minute` past the hour.
///
/// # Errors
///
/// Returns [`ScheduleError::UnknownSlot`] for any minute other than 0, 20
/// or 40.
pub fn slot_pool(minute: u32) -> Result<&'static [GateType; 3], ScheduleError> {
    match minute {
        0 => Ok(&POOL_00),
        20 => Ok(&POOL_20),
        40 => Ok(&POOL_40),
        other => Err(ScheduleError::UnknownSlot(other)),
    }
}
