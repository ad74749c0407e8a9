// crates/apogee-core/src/session.rs

use std::time::Instant;

use chrono::NaiveDateTime;

use crate::config::SessionConfig;
use crate::connection::{ConnectionManager, Link, StatusObserver};
use crate::download::DownloadRequest;
use crate::message::{FlightCommand, Inbound};
use crate::state::{ConnectionState, Snapshot};
use crate::view_model::{Confirm, RequestOutcome, TelemetryViewModel, View};

/// One operator session against one device. Built when the client starts,
/// dropped when it exits; nothing outlives it.
pub struct Session<L> {
    config: SessionConfig,
    connection: ConnectionManager<L>,
    telemetry: TelemetryViewModel,
}

impl<L: Link> Session<L> {
    pub fn new(config: SessionConfig) -> Self {
        let connection = ConnectionManager::new(&config);
        Self {
            config,
            connection,
            telemetry: TelemetryViewModel::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn connection(&self) -> &ConnectionManager<L> {
        &self.connection
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.telemetry.snapshot()
    }

    pub fn connect(&mut self) -> Option<String> {
        self.connection.connect().map(str::to_owned)
    }

    pub fn reconnect_deadline(&self) -> Option<Instant> {
        self.connection.reconnect_deadline()
    }

    pub fn poll_reconnect(&mut self, now: Instant) -> Option<String> {
        self.connection.poll_reconnect(now).map(str::to_owned)
    }

    pub fn on_open(&mut self, link: L, observer: &mut impl StatusObserver) {
        self.connection.on_open(link, observer);
    }

    pub fn on_close(&mut self, now: Instant, observer: &mut impl StatusObserver) {
        self.connection.on_close(now, observer);
    }

    pub fn on_message(&mut self, raw: &str, view: &mut impl View) -> Inbound {
        self.telemetry.on_message(raw, view)
    }

    pub fn request(&mut self, cmd: FlightCommand, confirm: &mut impl Confirm) -> RequestOutcome {
        self.telemetry.request(cmd, confirm, &mut self.connection)
    }

    pub fn request_start(&mut self, confirm: &mut impl Confirm) -> RequestOutcome {
        self.telemetry.request_start(confirm, &mut self.connection)
    }

    pub fn request_stop(&mut self, confirm: &mut impl Confirm) -> RequestOutcome {
        self.telemetry.request_stop(confirm, &mut self.connection)
    }

    pub fn request_download(&self, now: &NaiveDateTime) -> DownloadRequest {
        self.telemetry.request_download(now, &self.config.download_url())
    }
}
