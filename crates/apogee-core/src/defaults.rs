// crates/apogee-core/src/defaults.rs

use std::time::Duration;

/// Soft-AP gateway address the flight computer hands out.
pub const DEFAULT_HOST: &str = "192.168.4.1";

/// Path of the real-time socket on the device.
pub const GATEWAY_PATH: &str = "/ws";

/// Path of the CSV flight log served by the device.
pub const DEFAULT_DOWNLOAD_PATH: &str = "/data.csv";

/// Fixed delay between a close and the next connect attempt.
pub const RECONNECT_DELAY_MS: u64 = 2_000;

pub const fn reconnect_delay() -> Duration {
    Duration::from_millis(RECONNECT_DELAY_MS)
}

/// Upper bound on a single dial, so a hung handshake cannot stall the
/// reconnect cadence.
pub const DIAL_TIMEOUT_MS: u64 = 5_000;

pub const fn dial_timeout() -> Duration {
    Duration::from_millis(DIAL_TIMEOUT_MS)
}
