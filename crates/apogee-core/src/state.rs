// crates/apogee-core/src/state.rs

use std::fmt;

use crate::message::FlightCommand;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connected => "Connected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Device-side flight sequence as last reported by the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlightState {
    #[default]
    Waiting,
    Armed,
}

impl FlightState {
    pub fn label(self) -> &'static str {
        match self {
            FlightState::Waiting => "Waiting",
            FlightState::Armed => "Armed",
        }
    }

    /// Which operator controls make sense in this state.
    pub fn controls(self) -> Controls {
        match self {
            FlightState::Waiting => Controls {
                download: true,
                start: true,
                stop: false,
            },
            FlightState::Armed => Controls {
                download: false,
                start: false,
                stop: true,
            },
        }
    }
}

impl fmt::Display for FlightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub download: bool,
    pub start: bool,
    pub stop: bool,
}

impl Controls {
    pub fn allows(&self, cmd: FlightCommand) -> bool {
        match cmd {
            FlightCommand::Start => self.start,
            FlightCommand::Stop => self.stop,
        }
    }

    /// Names of the visible controls, in display order.
    pub fn visible(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(3);
        if self.download {
            out.push("download");
        }
        if self.start {
            out.push("start");
        }
        if self.stop {
            out.push("stop");
        }
        out
    }
}

/// What the renderer pulls from the view model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub flight: FlightState,
    pub apogee: f64,
    pub controls: Controls,
}

impl Snapshot {
    /// Apogee as the status page shows it: shortest round-trip decimal,
    /// with `Infinity` / `-Infinity` for the non-finite readings the lenient
    /// parse can produce.
    pub fn apogee_text(&self) -> String {
        if self.apogee == f64::INFINITY {
            "Infinity".to_string()
        } else if self.apogee == f64::NEG_INFINITY {
            "-Infinity".to_string()
        } else {
            self.apogee.to_string()
        }
    }
}
