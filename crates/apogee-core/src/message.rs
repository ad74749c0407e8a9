// crates/apogee-core/src/message.rs

use crate::state::FlightState;

pub const ARMED_LITERAL: &str = "true";
pub const WAITING_LITERAL: &str = "false";

/// One inbound text frame, classified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inbound {
    /// Literal `true`: the device armed a flight.
    Armed,
    /// Literal `false`: the device is back to waiting.
    Waiting,
    /// Anything with a numeric prefix: a new apogee reading.
    Apogee(f64),
    Unrecognized,
}

impl Inbound {
    /// Literals are matched exactly and case-sensitively before any numeric
    /// interpretation is attempted.
    pub fn parse(raw: &str) -> Self {
        if raw == ARMED_LITERAL {
            Inbound::Armed
        } else if raw == WAITING_LITERAL {
            Inbound::Waiting
        } else if let Some(v) = parse_float_prefix(raw) {
            Inbound::Apogee(v)
        } else {
            Inbound::Unrecognized
        }
    }

    pub fn flight_state(self) -> Option<FlightState> {
        match self {
            Inbound::Armed => Some(FlightState::Armed),
            Inbound::Waiting => Some(FlightState::Waiting),
            _ => None,
        }
    }
}

/// Operator commands sent to the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightCommand {
    Start,
    Stop,
}

impl FlightCommand {
    pub fn payload(self) -> &'static str {
        match self {
            FlightCommand::Start => ARMED_LITERAL,
            FlightCommand::Stop => WAITING_LITERAL,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            FlightCommand::Start => "Start a new flight? The latest flight data will be lost.",
            FlightCommand::Stop => "Stop the flight? No data will be lost.",
        }
    }

    /// State the device reports once it has accepted the command.
    pub fn expected_state(self) -> FlightState {
        match self {
            FlightCommand::Start => FlightState::Armed,
            FlightCommand::Stop => FlightState::Waiting,
        }
    }
}

/// Lenient decimal parse: skips leading whitespace and reads the longest
/// numeric prefix, ignoring whatever follows ("12.5abc" -> 12.5).
/// Accepts `[+-]Infinity`; never yields NaN.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let b = s.as_bytes();

    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i = 1;
    }

    if s[i..].starts_with("Infinity") {
        return Some(if b[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&b[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if b.get(i) == Some(&b'.') {
        frac_digits = count_digits(&b[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&b[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    s[..i].parse::<f64>().ok()
}

fn count_digits(b: &[u8]) -> usize {
    b.iter().take_while(|c| c.is_ascii_digit()).count()
}
