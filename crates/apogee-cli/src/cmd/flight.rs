// crates/apogee-cli/src/cmd/flight.rs

use std::time::Duration;

use clap::Args;
use tokio::sync::mpsc;
use tracing::info;

use apogee_core::{FlightCommand, RequestOutcome, Session, SessionConfig};

use super::device::DeviceArgs;
use crate::io::terminal::{self, Answer, TerminalView};
use crate::io::ws::{self, WsEvent, WsLink};

#[derive(Args, Debug)]
pub struct FlightArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Do not ask for confirmation
    #[arg(long)]
    pub yes: bool,

    /// How long to wait for the device to echo the command (ms)
    #[arg(long, default_value_t = 5_000)]
    pub timeout_ms: u64,
}

pub fn run(cmd: FlightCommand, args: FlightArgs) -> anyhow::Result<()> {
    let config = args.device.to_config(".".into(), args.yes)?;

    let approved = args.yes || terminal::ask(cmd.prompt())?;
    if !approved {
        println!("cancelled, nothing sent");
        return Ok(());
    }

    let limit = Duration::from_millis(args.timeout_ms);
    super::runtime()?.block_on(send_and_confirm(cmd, config, limit))?;
    println!("device confirmed: flight={}", cmd.expected_state());
    Ok(())
}

/// One connection, one command, success once the device reports the
/// matching flight state.
async fn send_and_confirm(
    cmd: FlightCommand,
    config: SessionConfig,
    limit: Duration,
) -> anyhow::Result<()> {
    let dial_timeout = config.dial_timeout;
    let mut session: Session<WsLink> = Session::new(config);
    let mut screen = TerminalView::new();
    let (tx, mut events) = mpsc::unbounded_channel();

    let url = session
        .connect()
        .ok_or_else(|| anyhow::anyhow!("session refused to dial"))?;
    ws::spawn_dial(url, dial_timeout, tx);

    let exchange = async {
        let mut sent = false;
        while let Some(ev) = events.recv().await {
            match ev {
                WsEvent::Opened(link) => {
                    session.on_open(link, &mut screen);
                    match session.request(cmd, &mut Answer(true)) {
                        RequestOutcome::Sent => {
                            info!(payload = cmd.payload(), "command sent");
                            sent = true;
                        }
                        other => anyhow::bail!("{cmd:?} was not sent ({other:?})"),
                    }
                }
                WsEvent::Text(raw) => {
                    let msg = session.on_message(&raw, &mut screen);
                    if sent && msg.flight_state() == Some(cmd.expected_state()) {
                        return Ok(());
                    }
                }
                WsEvent::Closed(reason) => anyhow::bail!(
                    "connection closed before the device confirmed: {}",
                    reason.unwrap_or_else(|| "no reason given".into())
                ),
            }
        }
        anyhow::bail!("socket task ended without reporting a close")
    };

    match tokio::time::timeout(limit, exchange).await {
        Ok(result) => result,
        Err(_) => anyhow::bail!("device did not confirm {cmd:?} within {limit:?}"),
    }
}
