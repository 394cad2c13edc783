pub mod config;
pub mod gate;
pub mod lead;
pub mod simulate;
pub mod slots;
pub mod status;
pub mod watch;

use chrono::{DateTime, Utc};

/// `--at` if given, otherwise the wall clock.
pub fn resolve_now(at: Option<DateTime<Utc>>) -> DateTime<Utc> {
    at.unwrap_or_else(Utc::now)
}
