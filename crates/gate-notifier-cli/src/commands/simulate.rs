use chrono::{DateTime, Duration, Utc};
use clap::Args;
use gate_notifier_core::tracker::SYSTEM_MESSAGE_CHANNEL;
use gate_notifier_core::{update, Config, Input, PollState};

#[derive(Args)]
pub struct SimulateArgs {
    /// Simulated start instant (RFC 3339)
    #[arg(long)]
    from: DateTime<Utc>,
    /// Simulated end instant (RFC 3339), inclusive
    #[arg(long)]
    to: DateTime<Utc>,
    /// Seconds between simulated ticks
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    step_secs: u32,
    /// Announcement as `<RFC 3339>=<text>`; repeatable
    #[arg(long = "announce", value_parser = parse_announcement)]
    announcements: Vec<(DateTime<Utc>, String)>,
    /// Pretend the player is bound by duty the whole time
    #[arg(long)]
    in_duty: bool,
}

fn parse_announcement(raw: &str) -> Result<(DateTime<Utc>, String), String> {
    let (at, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <time>=<text>, got '{raw}'"))?;
    let at = at
        .trim()
        .parse::<DateTime<Utc>>()
        .map_err(|e| format!("invalid time '{at}': {e}"))?;
    Ok((at, text.to_string()))
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.to <= args.from {
        return Err("--to must be after --from".into());
    }
    if let Some((at, text)) = args
        .announcements
        .iter()
        .find(|(at, _)| *at < args.from || *at > args.to)
    {
        return Err(format!(
            "announcement '{text}' at {} is outside {} ..= {}",
            at.to_rfc3339(),
            args.from.to_rfc3339(),
            args.to.to_rfc3339()
        )
        .into());
    }

    let config = Config::load()?;
    let step = Duration::seconds(i64::from(args.step_secs));

    let mut announcements = args.announcements;
    announcements.sort_by_key(|(at, _)| *at);
    let mut pending = announcements.into_iter().peekable();

    let mut state = PollState::new(args.from);
    let mut now = args.from;
    while now < args.to {
        now = (now + step).min(args.to);

        let mut inputs = Vec::new();
        while let Some((at, text)) = pending.next_if(|(at, _)| *at <= now) {
            inputs.push(Input::Announcement {
                text,
                channel_tag: SYSTEM_MESSAGE_CHANNEL,
                now: at,
            });
        }
        inputs.push(Input::Tick { now });

        for input in &inputs {
            let (next, events) = update(state, input, &config, &args.in_duty);
            state = next;
            for event in events {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }
    Ok(())
}
