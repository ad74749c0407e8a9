// crates/apogee-cli/src/cmd/monitor.rs

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant as TokioInstant};
use tracing::{debug, info, warn};

use apogee_core::{FlightCommand, RequestOutcome, Session, SessionConfig};

use super::device::DeviceArgs;
use crate::io::fetch;
use crate::io::terminal::{self, Answer, TerminalView};
use crate::io::ws::{self, WsEvent, WsLink};

const HELP: &str = "commands: start | stop | download | status | help | quit";

#[derive(Args, Debug)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Directory downloaded logs are written into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Do not ask before sending start/stop
    #[arg(long)]
    pub yes: bool,
}

pub fn run(args: MonitorArgs) -> anyhow::Result<()> {
    let config = args.device.to_config(args.out_dir, args.yes)?;
    super::runtime()?.block_on(monitor(config))
}

enum Flow {
    Continue,
    Quit,
}

struct Monitor {
    session: Session<WsLink>,
    screen: TerminalView,
    events: mpsc::UnboundedSender<WsEvent>,
    /// Command waiting for the operator's y/N.
    pending: Option<FlightCommand>,
}

async fn monitor(config: SessionConfig) -> anyhow::Result<()> {
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let (lines_tx, mut lines) = mpsc::unbounded_channel();
    spawn_stdin_reader(lines_tx);

    let mut m = Monitor {
        session: Session::new(config),
        screen: TerminalView::new(),
        events: events_tx,
        pending: None,
    };

    println!("{HELP}");
    println!("gateway={}", m.session.connection().gateway());
    println!("{}", m.screen.status_line(&m.session.snapshot()));
    m.connect();

    loop {
        let deadline = m.session.reconnect_deadline();
        let wake = deadline
            .map(TokioInstant::from_std)
            .unwrap_or_else(TokioInstant::now);

        tokio::select! {
            Some(ev) = events.recv() => m.on_event(ev),
            line = lines.recv() => {
                let Some(line) = line else {
                    info!("stdin closed, leaving");
                    break;
                };
                if let Flow::Quit = m.on_line(&line) {
                    break;
                }
            }
            _ = sleep_until(wake), if deadline.is_some() => {
                if let Some(url) = m.session.poll_reconnect(Instant::now()) {
                    m.dial(url);
                }
            }
        }
    }

    Ok(())
}

impl Monitor {
    fn connect(&mut self) {
        if let Some(url) = self.session.connect() {
            self.dial(url);
        }
    }

    fn dial(&self, url: String) {
        let limit = self.session.config().dial_timeout;
        ws::spawn_dial(url, limit, self.events.clone());
    }

    fn on_event(&mut self, ev: WsEvent) {
        match ev {
            WsEvent::Opened(link) => self.session.on_open(link, &mut self.screen),
            WsEvent::Text(raw) => {
                self.session.on_message(&raw, &mut self.screen);
            }
            WsEvent::Closed(reason) => {
                if let Some(reason) = reason {
                    debug!(%reason, "socket closed");
                }
                self.session.on_close(Instant::now(), &mut self.screen);
            }
        }
    }

    fn on_line(&mut self, line: &str) -> Flow {
        if let Some(cmd) = self.pending.take() {
            let approved = terminal::parse_answer(line);
            // The device may have moved while the prompt was open.
            let snapshot = self.session.snapshot();
            if approved && !snapshot.controls.allows(cmd) {
                println!(
                    "{} is no longer available, flight={}",
                    command_name(cmd),
                    snapshot.flight
                );
            } else {
                self.send(cmd, approved);
            }
            return Flow::Continue;
        }

        let controls = self.session.snapshot().controls;
        match line.trim() {
            "" => {}
            "start" if !controls.start => println!("start is not available while armed"),
            "stop" if !controls.stop => println!("stop is only available while armed"),
            "download" if !controls.download => println!("download is not available while armed"),
            "start" => self.ask(FlightCommand::Start),
            "stop" => self.ask(FlightCommand::Stop),
            "download" => self.download(),
            "status" => println!("{}", self.screen.status_line(&self.session.snapshot())),
            "help" | "?" => println!("{HELP}"),
            "quit" | "exit" => return Flow::Quit,
            other => println!("unknown command: {other} ({HELP})"),
        }
        Flow::Continue
    }

    fn ask(&mut self, cmd: FlightCommand) {
        if self.session.config().auto_confirm {
            self.send(cmd, true);
        } else {
            terminal::print_prompt(cmd.prompt());
            self.pending = Some(cmd);
        }
    }

    fn send(&mut self, cmd: FlightCommand, approved: bool) {
        match self.session.request(cmd, &mut Answer(approved)) {
            RequestOutcome::Declined => println!("cancelled"),
            RequestOutcome::Sent => println!("sent {}, waiting for the device", cmd.payload()),
            RequestOutcome::Dropped => println!("not connected, {} was not sent", cmd.payload()),
        }
    }

    fn download(&self) {
        let req = self.session.request_download(&Local::now().naive_local());
        let dir = self.session.config().out_dir.clone();
        println!("downloading {} -> {}", req.url, req.target_in(&dir).display());
        tokio::spawn(async move {
            match fetch::save(&req, &dir).await {
                Ok(path) => println!("saved {}", path.display()),
                Err(e) => {
                    let error = format!("{e:#}");
                    warn!(%error, "download failed");
                }
            }
        });
    }
}

fn command_name(cmd: FlightCommand) -> &'static str {
    match cmd {
        FlightCommand::Start => "start",
        FlightCommand::Stop => "stop",
    }
}

/// Operator input arrives on its own thread so the loop never blocks on it.
fn spawn_stdin_reader(tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });
}
