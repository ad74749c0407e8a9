// crates/apogee-cli/src/main.rs

use clap::{Parser, Subcommand};

use apogee_core::FlightCommand;

mod cmd;
mod io;
mod logging;

#[derive(Parser)]
#[command(name = "apogee-cli")]
#[command(about = "Flight computer telemetry client", long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log: String,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Live session: connection, flight state, apogee, operator commands
    Monitor(cmd::monitor::MonitorArgs),

    /// Fetch the flight log and save it under a timestamped name
    Download(cmd::download::DownloadArgs),

    /// Arm a new flight and wait for the device to confirm
    Start(cmd::flight::FlightArgs),

    /// Stop the current flight and wait for the device to confirm
    Stop(cmd::flight::FlightArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log);

    match cli.cmd {
        Commands::Monitor(args) => cmd::monitor::run(args),
        Commands::Download(args) => cmd::download::run(args),
        Commands::Start(args) => cmd::flight::run(FlightCommand::Start, args),
        Commands::Stop(args) => cmd::flight::run(FlightCommand::Stop, args),
    }
}
