use chrono::{DateTime, Utc};
use clap::Args;
use gate_notifier_core::{Config, GateView, PollState};

use super::resolve_now;

#[derive(Args)]
pub struct StatusArgs {
    /// Evaluate at this instant (RFC 3339) instead of now
    #[arg(long)]
    at: Option<DateTime<Utc>>,
    /// Print the one-line status bar text and tooltip instead of JSON
    #[arg(long)]
    line: bool,
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let now = resolve_now(args.at);
    // Detection state is not persisted, so a one-shot query starts fresh.
    let state = PollState::new(now);
    let view = GateView::new(&state, &config, now);

    if args.line {
        let line = view.status_line();
        println!("{}", line.text);
        println!("{}", line.tooltip);
    } else {
        println!("{}", serde_json::to_string_pretty(&view.overlay())?);
    }
    Ok(())
}
