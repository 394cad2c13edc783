use clap::Subcommand;
use gate_notifier_core::{Config, GateType};

#[derive(Subcommand)]
pub enum GateAction {
    /// Track a GATE
    Enable {
        /// Config key or display name (e.g. "leap_of_faith", "Leap of Faith")
        gate: String,
    },
    /// Stop tracking a GATE
    Disable {
        /// Config key or display name
        gate: String,
    },
    /// List every GATE with its enablement
    List,
}

fn parse_gate(input: &str) -> Result<GateType, Box<dyn std::error::Error>> {
    GateType::parse(input).ok_or_else(|| format!("unknown GATE: {input}").into())
}

pub fn run(action: GateAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    match action {
        GateAction::Enable { gate } => {
            let gate = parse_gate(&gate)?;
            config.set_gate_enabled(gate, true);
            config.save()?;
            println!("{gate}: enabled");
        }
        GateAction::Disable { gate } => {
            let gate = parse_gate(&gate)?;
            config.set_gate_enabled(gate, false);
            config.save()?;
            println!("{gate}: disabled");
        }
        GateAction::List => {
            for gate in GateType::ALL {
                let mark = if config.is_gate_enabled(gate) { "x" } else { " " };
                println!("[{mark}] {:<24} {}", gate.display_name(), gate.config_key());
            }
        }
    }
    Ok(())
}
