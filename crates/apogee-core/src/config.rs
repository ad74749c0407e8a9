// crates/apogee-core/src/config.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::defaults;
use crate::error::Result;
use crate::validate::validate_config;

/// Everything a session needs to know about the device it talks to.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Bare hostname or address of the device, optionally with `:port`.
    pub host: String,
    pub reconnect_delay: Duration,
    /// Give up on a dial that has not completed the handshake by then.
    pub dial_timeout: Duration,
    /// Absolute path of the CSV log on the device, e.g. `/data.csv`.
    pub download_path: String,
    /// Directory downloaded logs are written into.
    pub out_dir: PathBuf,
    /// Skip the operator confirmation on start/stop.
    pub auto_confirm: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            reconnect_delay: defaults::reconnect_delay(),
            dial_timeout: defaults::dial_timeout(),
            download_path: defaults::DEFAULT_DOWNLOAD_PATH.to_string(),
            out_dir: PathBuf::from("."),
            auto_confirm: false,
        }
    }
}

impl SessionConfig {
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Returns the config unchanged if it passes validation.
    pub fn validated(self) -> Result<Self> {
        validate_config(&self)?;
        Ok(self)
    }

    pub fn gateway_url(&self) -> String {
        format!("ws://{}{}", self.host, defaults::GATEWAY_PATH)
    }

    pub fn download_url(&self) -> String {
        format!("http://{}{}", self.host, self.download_path)
    }
}
