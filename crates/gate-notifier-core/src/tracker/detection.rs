//! Reconciling the schedule with chat announcements.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::state::PollState;
use crate::events::{Event, SlotRole};
use crate::gate::{match_announcement, GateType};
use crate::schedule::time_until_next_gate;

/// Base chat type of system messages, which carry GATE announcements.
pub const SYSTEM_MESSAGE_CHANNEL: u16 = 57;

/// Chat types carry flag bits above the base category (e.g. 2105 = 0x0839).
const CHANNEL_BASE_MASK: u16 = 0x7F;

/// With no current GATE known, an announcement seen while more than this
/// many minutes remain belongs to the slot that just started.
pub const ACTIVE_SLOT_WINDOW_MINUTES: i64 = 15;

/// Whether a raw chat type tag is a system message.
///
/// Hosts use this to decide which messages to forward as announcements.
pub fn is_system_announcement(channel_tag: u16) -> bool {
    channel_tag & CHANNEL_BASE_MASK == SYSTEM_MESSAGE_CHANNEL
}

/// Promote the announced GATE once the countdown wraps.
pub(crate) fn promote_on_wrap(
    state: &mut PollState,
    current_remaining: Duration,
    now: DateTime<Utc>,
) -> Option<Event> {
    if current_remaining <= state.previous_remaining {
        return None;
    }
    state.current = state.next.take();
    debug!(current = ?state.current, "GATE cycle advanced");
    Some(Event::CycleAdvanced {
        current: state.current,
        at: now,
    })
}

/// Match `text` and record the GATE as current or next.
///
/// Returns `None` for text naming no GATE; that is not an error.
pub(crate) fn attribute_announcement(
    state: &mut PollState,
    text: &str,
    now: DateTime<Utc>,
) -> Option<(GateType, SlotRole)> {
    let gate = match_announcement(text)?;
    let remaining = time_until_next_gate(now);

    let role = if state.current.is_none()
        && remaining > Duration::minutes(ACTIVE_SLOT_WINDOW_MINUTES)
    {
        state.current = Some(gate);
        SlotRole::Current
    } else {
        state.next = Some(gate);
        SlotRole::Next
    };

    info!(gate = %gate, slot = ?role, "GATE detected");
    Some((gate, role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, s).unwrap()
    }

    #[test]
    fn system_message_tags() {
        assert!(is_system_announcement(57));
        assert!(is_system_announcement(2105));
        assert!(!is_system_announcement(10));
        assert!(!is_system_announcement(56));
    }

    #[test]
    fn early_announcement_describes_active_slot() {
        // 18 minutes before 10:40.
        let now = utc(10, 22, 0);
        let mut state = PollState::new(now);
        let hit = attribute_announcement(&mut state, "Air Force One has started!", now);
        assert_eq!(hit, Some((GateType::AirForceOne, SlotRole::Current)));
        assert_eq!(state.current, Some(GateType::AirForceOne));
        assert_eq!(state.next, None);
    }

    #[test]
    fn late_announcement_describes_upcoming_slot() {
        // 10 minutes before 10:40.
        let now = utc(10, 30, 0);
        let mut state = PollState::new(now);
        let hit = attribute_announcement(&mut state, "Air Force One has started!", now);
        assert_eq!(hit, Some((GateType::AirForceOne, SlotRole::Next)));
        assert_eq!(state.current, None);
        assert_eq!(state.next, Some(GateType::AirForceOne));
    }

    #[test]
    fn exactly_fifteen_minutes_counts_as_upcoming() {
        let now = utc(10, 25, 0);
        let mut state = PollState::new(now);
        let hit = attribute_announcement(&mut state, "Cliffhanger", now);
        assert_eq!(hit, Some((GateType::Cliffhanger, SlotRole::Next)));
    }

    #[test]
    fn known_current_gate_sends_early_announcement_to_next() {
        let now = utc(10, 21, 0);
        let mut state = PollState::new(now);
        state.current = Some(GateType::LeapOfFaith);
        let hit = attribute_announcement(&mut state, "The Slice Is Right", now);
        assert_eq!(hit, Some((GateType::TheSliceIsRight, SlotRole::Next)));
        assert_eq!(state.current, Some(GateType::LeapOfFaith));
    }

    #[test]
    fn unmatched_text_leaves_state_alone() {
        let now = utc(10, 21, 0);
        let mut state = PollState::new(now);
        assert_eq!(attribute_announcement(&mut state, "Welcome to the Gold Saucer", now), None);
        assert_eq!(state, PollState::new(now));
    }

    #[test]
    fn wrap_promotes_next_and_clears_it() {
        let mut state = PollState::new(utc(10, 39, 59));
        state.current = Some(GateType::Cliffhanger);
        state.next = Some(GateType::AirForceOne);

        let event = promote_on_wrap(&mut state, Duration::minutes(19), utc(10, 41, 0));
        assert!(matches!(
            event,
            Some(Event::CycleAdvanced { current: Some(GateType::AirForceOne), .. })
        ));
        assert_eq!(state.current, Some(GateType::AirForceOne));
        assert_eq!(state.next, None);
    }

    #[test]
    fn wrap_without_announcement_clears_current() {
        let mut state = PollState::new(utc(10, 39, 59));
        state.current = Some(GateType::Cliffhanger);

        promote_on_wrap(&mut state, Duration::minutes(19), utc(10, 41, 0));
        assert_eq!(state.current, None);
    }

    #[test]
    fn countdown_does_not_promote() {
        let mut state = PollState::new(utc(10, 30, 0));
        state.next = Some(GateType::AirForceOne);
        assert!(promote_on_wrap(&mut state, Duration::minutes(9), utc(10, 31, 0)).is_none());
        let unchanged = state.previous_remaining;
        assert!(promote_on_wrap(&mut state, unchanged, utc(10, 31, 0)).is_none());
        assert_eq!(state.next, Some(GateType::AirForceOne));
    }
}
