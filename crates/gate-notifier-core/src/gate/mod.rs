//! GATE variants and their lookup tables.
//!
//! The variant set is small and fixed, so every table is a `match` on
//! [`GateType`] rather than a runtime map.

use serde::{Deserialize, Serialize};

/// One of the five GATE kinds that can run in a slot.
///
/// Declaration order matters: announcement matching scans [`GateType::ALL`]
/// in this order and stops at the first hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateType {
    TheSliceIsRight,
    AirForceOne,
    Cliffhanger,
    LeapOfFaith,
    AnyWayTheWindBlows,
}

impl GateType {
    /// All variants in declaration order.
    pub const ALL: [GateType; 5] = [
        GateType::TheSliceIsRight,
        GateType::AirForceOne,
        GateType::Cliffhanger,
        GateType::LeapOfFaith,
        GateType::AnyWayTheWindBlows,
    ];

    /// Human-readable name, as shown in game.
    pub fn display_name(self) -> &'static str {
        match self {
            GateType::TheSliceIsRight => "The Slice Is Right",
            GateType::AirForceOne => "Air Force One",
            GateType::Cliffhanger => "Cliffhanger",
            GateType::LeapOfFaith => "Leap of Faith",
            GateType::AnyWayTheWindBlows => "Any Way the Wind Blows",
        }
    }

    /// Substring searched for in announcement text.
    ///
    /// Currently identical to the display name, but kept separate so the two
    /// can diverge (e.g. localized announcements).
    pub fn chat_substring(self) -> &'static str {
        match self {
            GateType::TheSliceIsRight => "The Slice Is Right",
            GateType::AirForceOne => "Air Force One",
            GateType::Cliffhanger => "Cliffhanger",
            GateType::LeapOfFaith => "Leap of Faith",
            GateType::AnyWayTheWindBlows => "Any Way the Wind Blows",
        }
    }

    /// Snake-case key used in configuration files and the CLI.
    pub fn config_key(self) -> &'static str {
        match self {
            GateType::TheSliceIsRight => "the_slice_is_right",
            GateType::AirForceOne => "air_force_one",
            GateType::Cliffhanger => "cliffhanger",
            GateType::LeapOfFaith => "leap_of_faith",
            GateType::AnyWayTheWindBlows => "any_way_the_wind_blows",
        }
    }

    /// Reverse lookup by exact display name.
    pub fn from_display_name(name: &str) -> Option<GateType> {
        Self::ALL.into_iter().find(|g| g.display_name() == name)
    }

    /// Parse either a config key or a display name (case-insensitive).
    pub fn parse(input: &str) -> Option<GateType> {
        let needle = input.trim();
        Self::ALL.into_iter().find(|g| {
            g.config_key().eq_ignore_ascii_case(needle)
                || g.display_name().eq_ignore_ascii_case(needle)
        })
    }
}

impl std::fmt::Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Find the GATE named in an announcement.
///
/// Case-insensitive containment against each variant's chat substring, in
/// declaration order. First match wins; if two substrings could both match the
/// same text, the earlier variant is reported and the later one is never
/// considered.
pub fn match_announcement(text: &str) -> Option<GateType> {
    let haystack = text.to_lowercase();
    GateType::ALL
        .into_iter()
        .find(|g| haystack.contains(&g.chat_substring().to_lowercase()))
}
