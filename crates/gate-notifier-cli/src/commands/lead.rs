use clap::Subcommand;
use gate_notifier_core::storage::AVAILABLE_ALERT_MINUTES;
use gate_notifier_core::Config;

#[derive(Subcommand)]
pub enum LeadAction {
    /// Alert this many minutes before each slot
    Add { minutes: u32 },
    /// Stop alerting at this lead-time
    Remove { minutes: u32 },
    /// Show configured and suggested lead-times
    List,
}

pub fn run(action: LeadAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    match action {
        LeadAction::Add { minutes } => {
            config.toggle_lead_time(minutes, true);
            config.validate()?;
            config.save()?;
            println!("{:?}", config.alert_minutes_before);
        }
        LeadAction::Remove { minutes } => {
            config.toggle_lead_time(minutes, false);
            config.save()?;
            println!("{:?}", config.alert_minutes_before);
        }
        LeadAction::List => {
            for minutes in AVAILABLE_ALERT_MINUTES {
                let mark = if config.alert_minutes_before.contains(&minutes) { "x" } else { " " };
                println!("[{mark}] {minutes} min before");
            }
            for minutes in &config.alert_minutes_before {
                if !AVAILABLE_ALERT_MINUTES.contains(minutes) {
                    println!("[x] {minutes} min before (custom)");
                }
            }
        }
    }
    Ok(())
}
