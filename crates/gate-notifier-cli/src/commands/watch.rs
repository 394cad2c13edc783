use std::time::Duration as StdDuration;

use chrono::Utc;
use clap::Args;
use gate_notifier_core::tracker::SYSTEM_MESSAGE_CHANNEL;
use gate_notifier_core::{is_system_announcement, Config, CoreError, GateTracker, Input};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::sink::ConsoleSink;

#[derive(Args)]
pub struct WatchArgs {
    /// Milliseconds between ticks
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(50..=20_000))]
    interval_ms: u64,
    /// Pretend the player is bound by duty
    #[arg(long)]
    in_duty: bool,
}

/// `#<tag> <text>` carries an explicit chat type; bare lines are system
/// messages.
fn parse_line(line: &str) -> (u16, &str) {
    if let Some((tag, text)) = line.strip_prefix('#').and_then(|rest| rest.split_once(' ')) {
        if let Ok(tag) = tag.parse::<u16>() {
            return (tag, text);
        }
    }
    (SYSTEM_MESSAGE_CHANNEL, line)
}

/// Read the next stdin line into `buf`, decoding it lossily.
///
/// Bytes read before a cancelled call stay in `buf`, so this is safe to
/// race in `select!`. Returns `None` at end of input.
async fn next_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let n = reader.read_until(b'\n', buf).await?;
    if n == 0 && buf.is_empty() {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf[..])
        .trim_end_matches(['\r', '\n'])
        .to_string();
    buf.clear();
    Ok(Some(line))
}

/// Adopt a freshly loaded config, or keep the previous one on error.
///
/// A failure is logged once until the error changes or a load succeeds.
/// Returns whether a warning was emitted.
fn apply_reload(
    config: &mut Config,
    last_error: &mut Option<String>,
    loaded: Result<Config, CoreError>,
) -> bool {
    match loaded {
        Ok(fresh) => {
            *config = fresh;
            *last_error = None;
            false
        }
        Err(e) => {
            let message = e.to_string();
            if last_error.as_deref() == Some(message.as_str()) {
                return false;
            }
            warn!(error = %message, "config reload failed; keeping previous config");
            *last_error = Some(message);
            true
        }
    }
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(args))
}

async fn watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    let mut tracker = GateTracker::new(Utc::now());
    let mut sink = ConsoleSink;

    let mut ticker = tokio::time::interval(StdDuration::from_millis(args.interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut line_buf = Vec::new();
    let mut stdin_open = true;
    let mut last_config_error: Option<String> = None;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(interval_ms = args.interval_ms, "watching GATE schedule");
    // Ticks and announcements are handled on this one task, never concurrently.
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Pick up edits made by `config set` while running.
                apply_reload(&mut config, &mut last_config_error, Config::load());
                let now = Utc::now();
                tracker.handle(&Input::Tick { now }, &config, &args.in_duty, &mut sink);
            }
            line = next_line(&mut stdin, &mut line_buf), if stdin_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        debug!("stdin closed; timer alerts only");
                        stdin_open = false;
                        continue;
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin unreadable; timer alerts only");
                        stdin_open = false;
                        continue;
                    }
                };
                let (channel_tag, text) = parse_line(&line);
                if !is_system_announcement(channel_tag) {
                    debug!(channel_tag, "ignoring non-system message");
                    continue;
                }
                let input = Input::Announcement {
                    text: text.to_string(),
                    channel_tag,
                    now: Utc::now(),
                };
                tracker.handle(&input, &config, &args.in_duty, &mut sink);
            }
            _ = &mut shutdown => break,
        }
    }

    info!("stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_reads_optional_tag() {
        assert_eq!(parse_line("#2105 Air Force One"), (2105, "Air Force One"));
        assert_eq!(parse_line("#10 hello"), (10, "hello"));
        assert_eq!(parse_line("Cliffhanger"), (57, "Cliffhanger"));
        assert_eq!(parse_line("#notatag text"), (57, "#notatag text"));
    }

    #[test]
    fn failed_reload_keeps_config_and_warns_once() {
        let mut config = Config::default();
        config.alert_minutes_before = vec![10];
        let mut last_error = None;
        let broken = || -> Result<Config, CoreError> {
            let mut bad = Config::default();
            bad.alert_minutes_before = vec![1, 5];
            bad.validate()?;
            Ok(bad)
        };

        assert!(apply_reload(&mut config, &mut last_error, broken()));
        assert!(!apply_reload(&mut config, &mut last_error, broken()));
        assert_eq!(config.alert_minutes_before, vec![10]);
        assert!(last_error.is_some());

        assert!(!apply_reload(&mut config, &mut last_error, Ok(Config::default())));
        assert_eq!(config, Config::default());
        assert!(last_error.is_none());

        assert!(apply_reload(&mut config, &mut last_error, broken()));
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_stop_reading() {
        let input: &[u8] = b"Cliffhanger\n\xff\xfe bad\r\nLeap of Faith";
        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();

        let mut lines = Vec::new();
        while let Some(line) = next_line(&mut reader, &mut buf).await.unwrap() {
            lines.push(line);
        }
        assert_eq!(lines, vec!["Cliffhanger", "\u{FFFD}\u{FFFD} bad", "Leap of Faith"]);
    }
}
