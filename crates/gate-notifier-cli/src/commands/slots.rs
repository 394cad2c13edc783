use chrono::{DateTime, Utc};
use clap::Args;
use gate_notifier_core::schedule::upcoming_slots;

use super::resolve_now;

#[derive(Args)]
pub struct SlotsArgs {
    /// Number of slots to list
    #[arg(long, default_value = "3")]
    count: usize,
    /// Evaluate at this instant (RFC 3339) instead of now
    #[arg(long)]
    at: Option<DateTime<Utc>>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let slots = upcoming_slots(resolve_now(args.at), args.count);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&slots)?);
        return Ok(());
    }

    for slot in slots {
        let names: Vec<&str> = slot.gates.iter().map(|g| g.display_name()).collect();
        println!("{}  {}", slot.at.format("%H:%M"), names.join(" / "));
    }
    Ok(())
}
