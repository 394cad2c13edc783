//! Integration tests for the GATE tracker: ticks and announcements driven
//! through the public update path on a simulated clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gate_notifier_core::{
    update, AlertKind, Config, Event, GateTracker, GateType, Input, NotificationSink, PollState,
    SlotRole,
};

fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, h, m, s).unwrap()
}

#[derive(Default)]
struct RecordingSink {
    chat: Vec<String>,
    toasts: Vec<String>,
    sounds: Vec<u32>,
}

impl NotificationSink for RecordingSink {
    fn send_chat_message(&mut self, text: &str) {
        self.chat.push(text.to_string());
    }

    fn show_toast(&mut self, text: &str) {
        self.toasts.push(text.to_string());
    }

    fn play_sound(&mut self, effect_id: u32) {
        self.sounds.push(effect_id);
    }
}

fn announcement(text: &str, now: DateTime<Utc>) -> Input {
    Input::Announcement {
        text: text.to_string(),
        channel_tag: 57,
        now,
    }
}

/// Tick every `step` from `from` (exclusive) to `to` (inclusive).
fn run_ticks(
    tracker: &mut GateTracker,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: Duration,
    config: &Config,
    sink: &mut RecordingSink,
) -> Vec<Event> {
    let mut events = Vec::new();
    let mut now = from + step;
    while now <= to {
        events.extend(tracker.handle(&Input::Tick { now }, config, &false, sink));
        now += step;
    }
    events
}

#[test]
fn one_hour_of_ticks_alerts_twice_per_slot() {
    let config = Config::default();
    let start = utc(10, 0, 30);
    let mut tracker = GateTracker::new(start);
    let mut sink = RecordingSink::default();

    run_ticks(&mut tracker, start, utc(11, 0, 30), Duration::seconds(1), &config, &mut sink);

    // Slots at 10:20, 10:40 and 11:00, each alerted at 5 and 1 minutes.
    assert_eq!(sink.chat.len(), 6);
    assert_eq!(sink.toasts, sink.chat);
    assert!(sink.sounds.is_empty());
    assert_eq!(
        sink.chat[0],
        "[GATE] 5 minutes! Possible: Any Way the Wind Blows / The Slice Is Right / Air Force One"
    );
    assert_eq!(
        sink.chat[5],
        "[GATE] 1 minute! Possible: Air Force One / Cliffhanger / Leap of Faith"
    );
}

#[test]
fn coarse_ten_second_ticks_still_alert_once_per_lead() {
    let config = Config::default();
    let start = utc(10, 20, 3);
    let mut tracker = GateTracker::new(start);
    let mut sink = RecordingSink::default();

    let events = run_ticks(&mut tracker, start, utc(10, 40, 3), Duration::seconds(10), &config, &mut sink);
    let leads: Vec<_> = events
        .iter()
        .filter_map(Event::alert)
        .map(|a| a.kind)
        .collect();
    assert_eq!(
        leads,
        vec![AlertKind::Timer { lead_minutes: 5 }, AlertKind::Timer { lead_minutes: 1 }]
    );
}

#[test]
fn scenario_early_announcement_sets_current_gate() {
    let config = Config::default();
    // 18 minutes before the 10:40 slot.
    let now = utc(10, 22, 0);
    let (state, events) = update(
        PollState::new(now),
        &announcement("Air Force One has started!", now),
        &config,
        &false,
    );
    assert_eq!(state.current_gate(), Some(GateType::AirForceOne));
    assert_eq!(state.next_gate(), None);
    assert!(matches!(
        events[0],
        Event::GateDetected { gate: GateType::AirForceOne, slot: SlotRole::Current, .. }
    ));
}

#[test]
fn scenario_late_announcement_sets_next_gate() {
    let config = Config::default();
    // 10 minutes before the 10:40 slot.
    let now = utc(10, 30, 0);
    let (state, _) = update(
        PollState::new(now),
        &announcement("Air Force One has started!", now),
        &config,
        &false,
    );
    assert_eq!(state.current_gate(), None);
    assert_eq!(state.next_gate(), Some(GateType::AirForceOne));
}

#[test]
fn cycle_wrap_promotes_whatever_next_held() {
    let config = Config::default();
    let cases = [None, Some(GateType::Cliffhanger)];
    for announced in cases {
        let mut state = PollState::new(utc(10, 50, 0));
        if let Some(gate) = announced {
            let (s, _) = update(state, &announcement(gate.display_name(), utc(10, 50, 0)), &config, &false);
            state = s;
        }
        let (state, _) = update(state, &Input::Tick { now: utc(10, 59, 59) }, &config, &false);
        let before = state.next_gate();

        let (state, _) = update(state, &Input::Tick { now: utc(11, 0, 1) }, &config, &false);
        assert_eq!(state.current_gate(), before);
        assert_eq!(state.next_gate(), None);
    }
}

#[test]
fn timer_alerts_under_thirty_seconds_apart_dispatch_once() {
    let mut config = Config::default();
    config.alert_minutes_before = vec![5, 4];
    let start = utc(10, 34, 50);
    let mut tracker = GateTracker::new(start);
    let mut sink = RecordingSink::default();

    // 5:00 remaining at 10:35:00; 4:00 remaining at 10:36:00 (60 s apart).
    run_ticks(&mut tracker, start, utc(10, 36, 10), Duration::seconds(1), &config, &mut sink);
    assert_eq!(sink.chat.len(), 2);

    // Same leads, sampled so the two crossings land 20 s apart.
    let mut tracker = GateTracker::new(utc(10, 34, 50));
    let mut sink = RecordingSink::default();
    tracker.handle(&Input::Tick { now: utc(10, 35, 40) }, &config, &false, &mut sink);
    tracker.handle(&Input::Tick { now: utc(10, 36, 0) }, &config, &false, &mut sink);
    assert_eq!(sink.chat.len(), 1);
    assert_eq!(tracker.state().last_alert_at(), Some(utc(10, 35, 40)));
}

#[test]
fn detection_and_timer_alerts_do_not_debounce_each_other() {
    let config = Config::default();
    let mut tracker = GateTracker::new(utc(10, 34, 50));
    let mut sink = RecordingSink::default();

    // Timer alert at 10:35:00.
    tracker.handle(&Input::Tick { now: utc(10, 35, 0) }, &config, &false, &mut sink);
    // Detection alert 5 seconds later still fires.
    tracker.handle(&announcement("Leap of Faith", utc(10, 35, 5)), &config, &false, &mut sink);
    assert_eq!(sink.chat.len(), 2);
    assert_eq!(sink.chat[1], "[GATE] Upcoming GATE: Leap of Faith!");
    // ...and does not move the debounce timestamp.
    assert_eq!(tracker.state().last_alert_at(), Some(utc(10, 35, 0)));

    // Conversely, a detection right before a timer alert does not block it.
    let mut tracker = GateTracker::new(utc(10, 38, 50));
    let mut sink = RecordingSink::default();
    tracker.handle(&announcement("Leap of Faith", utc(10, 38, 55)), &config, &false, &mut sink);
    tracker.handle(&Input::Tick { now: utc(10, 39, 0) }, &config, &false, &mut sink);
    assert_eq!(
        sink.chat,
        vec![
            "[GATE] Upcoming GATE: Leap of Faith!".to_string(),
            "[GATE] Leap of Faith starts in 1 minute!".to_string(),
        ]
    );
}

#[test]
fn duty_suppression_swallows_every_alert() {
    let config = Config::default();
    let mut tracker = GateTracker::new(utc(10, 34, 50));
    let mut sink = RecordingSink::default();

    tracker.handle(&Input::Tick { now: utc(10, 35, 0) }, &config, &true, &mut sink);
    tracker.handle(&announcement("Cliffhanger", utc(10, 35, 5)), &config, &true, &mut sink);
    assert!(sink.chat.is_empty());
    // Detection still updates state while suppressed.
    assert_eq!(tracker.state().next_gate(), Some(GateType::Cliffhanger));
    assert_eq!(tracker.state().last_alert_at(), None);

    let mut relaxed = config.clone();
    relaxed.suppress_in_duty = false;
    tracker.handle(&announcement("Cliffhanger", utc(10, 35, 10)), &relaxed, &true, &mut sink);
    assert_eq!(sink.chat.len(), 1);
}

#[test]
fn sound_channel_plays_configured_effect() {
    let mut config = Config::default();
    config.notifications.chat = false;
    config.notifications.toast = false;
    config.notifications.sound = true;
    config.notifications.sound_effect = 11;

    let mut tracker = GateTracker::new(utc(10, 34, 50));
    let mut sink = RecordingSink::default();
    tracker.handle(&Input::Tick { now: utc(10, 35, 0) }, &config, &false, &mut sink);
    assert!(sink.chat.is_empty());
    assert!(sink.toasts.is_empty());
    assert_eq!(sink.sounds, vec![11]);
}

#[test]
fn config_changes_apply_on_next_tick() {
    let mut config = Config::default();
    let mut tracker = GateTracker::new(utc(10, 34, 50));
    let mut sink = RecordingSink::default();

    config.notifications.chat = false;
    tracker.handle(&Input::Tick { now: utc(10, 35, 0) }, &config, &false, &mut sink);
    assert!(sink.chat.is_empty());
    assert_eq!(sink.toasts.len(), 1);

    config.notifications.chat = true;
    tracker.handle(&Input::Tick { now: utc(10, 39, 0) }, &config, &false, &mut sink);
    assert_eq!(sink.chat.len(), 1);
}
