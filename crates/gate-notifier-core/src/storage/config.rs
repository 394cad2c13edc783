//! TOML-based alert configuration.
//!
//! Stores user preferences including:
//! - Which GATEs are tracked
//! - Alert lead-times (minutes before a slot starts)
//! - Notification channels (chat, toast, sound)
//! - Detection channels (timer, chat announcements)
//! - Duty suppression and display toggles
//!
//! Configuration is stored at `~/.config/gate-notifier/config.toml`.
//! The tracker never caches it: hosts hand the current value to every
//! update, so edits take effect on the next tick.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result, ValidationError};
use crate::gate::GateType;
use crate::schedule::SLOT_LENGTH_MINUTES;

/// Lead-times offered by the settings surface.
pub const AVAILABLE_ALERT_MINUTES: [u32; 4] = [10, 5, 3, 1];

/// Highest in-game chat sound effect id (`<se.1>` .. `<se.16>`).
pub const MAX_SOUND_EFFECT: u32 = 16;

/// Per-GATE enablement. Missing keys default to enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatesConfig {
    #[serde(default = "default_true")]
    pub the_slice_is_right: bool,
    #[serde(default = "default_true")]
    pub air_force_one: bool,
    #[serde(default = "default_true")]
    pub cliffhanger: bool,
    #[serde(default = "default_true")]
    pub leap_of_faith: bool,
    #[serde(default = "default_true")]
    pub any_way_the_wind_blows: bool,
}

/// Notification channel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub chat: bool,
    #[serde(default = "default_true")]
    pub toast: bool,
    #[serde(default)]
    pub sound: bool,
    /// Chat sound effect played when `sound` is on.
    #[serde(default = "default_sound_effect")]
    pub sound_effect: u32,
}

/// Which signal sources may raise alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Lead-time alerts from the slot schedule.
    #[serde(default = "default_true")]
    pub timer: bool,
    /// Announcement matching on system chat messages.
    #[serde(default = "default_true")]
    pub chat: bool,
}

/// Display toggles read by UI collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_overlay: bool,
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/gate-notifier/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Minutes before a slot at which to alert. Distinct, descending.
    #[serde(default = "default_alert_minutes")]
    pub alert_minutes_before: Vec<u32>,
    /// Swallow every alert while the player is bound by duty.
    #[serde(default = "default_true")]
    pub suppress_in_duty: bool,
    #[serde(default)]
    pub gates: GatesConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_sound_effect() -> u32 {
    1
}
fn default_alert_minutes() -> Vec<u32> {
    vec![5, 1]
}

impl Default for GatesConfig {
    fn default() -> Self {
        Self {
            the_slice_is_right: true,
            air_force_one: true,
            cliffhanger: true,
            leap_of_faith: true,
            any_way_the_wind_blows: true,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            chat: true,
            toast: true,
            sound: false,
            sound_effect: default_sound_effect(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            timer: true,
            chat: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_overlay: true,
            show_status_bar: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alert_minutes_before: default_alert_minutes(),
            suppress_in_duty: true,
            gates: GatesConfig::default(),
            notifications: NotificationsConfig::default(),
            detection: DetectionConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl GatesConfig {
    pub fn is_enabled(&self, gate: GateType) -> bool {
        match gate {
            GateType::TheSliceIsRight => self.the_slice_is_right,
            GateType::AirForceOne => self.air_force_one,
            GateType::Cliffhanger => self.cliffhanger,
            GateType::LeapOfFaith => self.leap_of_faith,
            GateType::AnyWayTheWindBlows => self.any_way_the_wind_blows,
        }
    }

    pub fn set_enabled(&mut self, gate: GateType, enabled: bool) {
        let slot = match gate {
            GateType::TheSliceIsRight => &mut self.the_slice_is_right,
            GateType::AirForceOne => &mut self.air_force_one,
            GateType::Cliffhanger => &mut self.cliffhanger,
            GateType::LeapOfFaith => &mut self.leap_of_faith,
            GateType::AnyWayTheWindBlows => &mut self.any_way_the_wind_blows,
        };
        *slot = enabled;
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> std::result::Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> std::result::Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without persisting.
    ///
    /// The change is applied only if the resulting config validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config is invalid.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Config::set_value`] fails or the config cannot
    /// be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()?;
        Ok(())
    }

    pub fn is_gate_enabled(&self, gate: GateType) -> bool {
        self.gates.is_enabled(gate)
    }

    pub fn set_gate_enabled(&mut self, gate: GateType, enabled: bool) {
        self.gates.set_enabled(gate, enabled);
    }

    /// Add or remove a lead-time, keeping the list distinct and descending.
    pub fn toggle_lead_time(&mut self, minutes: u32, active: bool) {
        if active {
            if !self.alert_minutes_before.contains(&minutes) {
                self.alert_minutes_before.push(minutes);
                self.alert_minutes_before.sort_unstable_by(|a, b| b.cmp(a));
            }
        } else {
            self.alert_minutes_before.retain(|&m| m != minutes);
        }
    }

    /// Check invariants the tracker relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: a lead-time outside one slot, a
    /// lead-time list that is not strictly descending, or a sound effect id
    /// outside `1..=16`.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let max_lead = SLOT_LENGTH_MINUTES - 1;
        for &minutes in &self.alert_minutes_before {
            if minutes == 0 || i64::from(minutes) > max_lead {
                return Err(ValidationError::OutOfRange {
                    field: "alert_minutes_before".into(),
                    value: i64::from(minutes),
                    min: 1,
                    max: max_lead,
                });
            }
        }
        if self.alert_minutes_before.windows(2).any(|w| w[0] <= w[1]) {
            return Err(ValidationError::InvalidValue {
                field: "alert_minutes_before".into(),
                message: "lead-times must be distinct and in descending order".into(),
            });
        }

        let effect = self.notifications.sound_effect;
        if !(1..=MAX_SOUND_EFFECT).contains(&effect) {
            return Err(ValidationError::OutOfRange {
                field: "notifications.sound_effect".into(),
                value: i64::from(effect),
                min: 1,
                max: i64::from(MAX_SOUND_EFFECT),
            });
        }
        Ok(())
    }
}
