// crates/apogee-core/src/connection.rs

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::state::ConnectionState;

/// Write half of a live socket.
pub trait Link {
    fn send_text(&mut self, payload: &str) -> Result<()>;
}

/// Told about every connection state change.
pub trait StatusObserver {
    fn connection_changed(&mut self, state: ConnectionState);
}

/// Socket lifecycle without the socket: the caller dials, reads and reports
/// back through `on_open` / `on_close`; this type decides when to dial and
/// whether an outbound payload may go out.
pub struct ConnectionManager<L> {
    gateway: String,
    reconnect_delay: Duration,
    state: ConnectionState,
    link: Option<L>,
    dialing: bool,
    reconnect_at: Option<Instant>,
}

impl<L: Link> ConnectionManager<L> {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            gateway: config.gateway_url(),
            reconnect_delay: config.reconnect_delay,
            state: ConnectionState::Disconnected,
            link: None,
            dialing: false,
            reconnect_at: None,
        }
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_dialing(&self) -> bool {
        self.dialing
    }

    /// Returns the URL to dial, or `None` while a socket is live or a dial is
    /// already in flight. Cancels any pending reconnect.
    pub fn connect(&mut self) -> Option<&str> {
        if self.link.is_some() || self.dialing {
            return None;
        }
        self.reconnect_at = None;
        self.dialing = true;
        info!(gateway = %self.gateway, "trying to open a websocket connection");
        Some(self.gateway.as_str())
    }

    pub fn on_open(&mut self, link: L, observer: &mut impl StatusObserver) {
        self.dialing = false;
        self.reconnect_at = None;
        self.link = Some(link);
        self.state = ConnectionState::Connected;
        info!(gateway = %self.gateway, "connection opened");
        observer.connection_changed(self.state);
    }

    /// Close, read error and failed dial all land here.
    pub fn on_close(&mut self, now: Instant, observer: &mut impl StatusObserver) {
        self.dialing = false;
        self.link = None;
        self.state = ConnectionState::Disconnected;

        if self.reconnect_at.is_none() {
            self.reconnect_at = Some(now + self.reconnect_delay);
        }
        info!(
            retry_in_ms = self.reconnect_delay.as_millis() as u64,
            "connection closed"
        );
        observer.connection_changed(self.state);
    }

    pub fn reconnect_deadline(&self) -> Option<Instant> {
        self.reconnect_at
    }

    /// Fires the one-shot reconnect once `now` has reached the deadline.
    pub fn poll_reconnect(&mut self, now: Instant) -> Option<&str> {
        match self.reconnect_at {
            Some(at) if now >= at => {
                self.reconnect_at = None;
                self.connect()
            }
            _ => None,
        }
    }

    /// Fire-and-forget. Payloads offered while disconnected are dropped.
    pub fn send(&mut self, payload: &str) -> bool {
        let Some(link) = self.link.as_mut() else {
            debug!(payload, "not connected, dropping outbound message");
            return false;
        };
        match link.send_text(payload) {
            Ok(()) => {
                debug!(payload, "sent");
                true
            }
            Err(e) => {
                warn!(payload, error = %e, "send failed");
                false
            }
        }
    }
}
