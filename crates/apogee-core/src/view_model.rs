// crates/apogee-core/src/view_model.rs

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::connection::{ConnectionManager, Link};
use crate::download::DownloadRequest;
use crate::message::{FlightCommand, Inbound};
use crate::state::{FlightState, Snapshot};

/// Whatever draws the session. Pulls state from the snapshot it is handed.
pub trait View {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Operator confirmation for destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Outbound side of the connection as the view model sees it.
pub trait CommandSink {
    fn send(&mut self, payload: &str) -> bool;
}

impl<L: Link> CommandSink for ConnectionManager<L> {
    fn send(&mut self, payload: &str) -> bool {
        ConnectionManager::send(self, payload)
    }
}

/// Outcome of a start/stop request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    Declined,
    Sent,
    /// Confirmed, but the connection dropped the payload.
    Dropped,
}

/// Session state derived from inbound messages.
#[derive(Clone, Debug, Default)]
pub struct TelemetryViewModel {
    flight: FlightState,
    apogee: f64,
}

impl TelemetryViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flight(&self) -> FlightState {
        self.flight
    }

    pub fn apogee(&self) -> f64 {
        self.apogee
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            flight: self.flight,
            apogee: self.apogee,
            controls: self.flight.controls(),
        }
    }

    /// Applies one inbound frame. Unrecognized payloads change nothing and
    /// do not trigger a render.
    pub fn on_message(&mut self, raw: &str, view: &mut impl View) -> Inbound {
        let msg = Inbound::parse(raw);
        match msg {
            Inbound::Armed | Inbound::Waiting => {
                if let Some(next) = msg.flight_state() {
                    if next != self.flight {
                        info!(from = %self.flight, to = %next, "flight state changed");
                    }
                    self.flight = next;
                }
            }
            Inbound::Apogee(v) => self.apogee = v,
            Inbound::Unrecognized => {
                debug!(raw, "ignoring unrecognized message");
                return msg;
            }
        }
        view.render(&self.snapshot());
        msg
    }

    pub fn request_start(
        &self,
        confirm: &mut impl Confirm,
        sink: &mut impl CommandSink,
    ) -> RequestOutcome {
        self.request(FlightCommand::Start, confirm, sink)
    }

    pub fn request_stop(
        &self,
        confirm: &mut impl Confirm,
        sink: &mut impl CommandSink,
    ) -> RequestOutcome {
        self.request(FlightCommand::Stop, confirm, sink)
    }

    /// Local state is left alone; the device's echo is what moves it.
    pub fn request(
        &self,
        cmd: FlightCommand,
        confirm: &mut impl Confirm,
        sink: &mut impl CommandSink,
    ) -> RequestOutcome {
        if !confirm.confirm(cmd.prompt()) {
            debug!(?cmd, "operator declined");
            return RequestOutcome::Declined;
        }
        if sink.send(cmd.payload()) {
            RequestOutcome::Sent
        } else {
            RequestOutcome::Dropped
        }
    }

    pub fn request_download(&self, now: &NaiveDateTime, url: &str) -> DownloadRequest {
        DownloadRequest::new(url, now)
    }
}
