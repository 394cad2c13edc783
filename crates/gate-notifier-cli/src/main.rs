use clap::{Parser, Subcommand};

mod commands;
mod sink;

#[derive(Parser)]
#[command(name = "gate-notifier-cli", version, about = "GATE Notifier CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the countdown overlay snapshot as JSON
    Status(commands::status::StatusArgs),
    /// List upcoming GATE slots
    Slots(commands::slots::SlotsArgs),
    /// Track GATEs in real time; stdin lines are treated as announcements
    Watch(commands::watch::WatchArgs),
    /// Replay a simulated clock and print tracker events as JSON lines
    Simulate(commands::simulate::SimulateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Enable or disable individual GATEs
    Gate {
        #[command(subcommand)]
        action: commands::gate::GateAction,
    },
    /// Manage alert lead-times
    Lead {
        #[command(subcommand)]
        action: commands::lead::LeadAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status(args) => commands::status::run(args),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Gate { action } => commands::gate::run(action),
        Commands::Lead { action } => commands::lead::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
