use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use apogee_core::defaults;
use apogee_core::SessionConfig;

/// Where the device lives. Shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Device hostname or address, optionally host:port
    #[arg(long, env = "APOGEE_HOST", default_value = defaults::DEFAULT_HOST)]
    pub host: String,

    /// Delay before reconnecting after the socket closes (ms)
    #[arg(long, default_value_t = defaults::RECONNECT_DELAY_MS)]
    pub reconnect_ms: u64,

    /// Give up on a connection attempt after this long (ms)
    #[arg(long, default_value_t = defaults::DIAL_TIMEOUT_MS)]
    pub dial_timeout_ms: u64,

    /// Path of the CSV flight log on the device
    #[arg(long, default_value = defaults::DEFAULT_DOWNLOAD_PATH)]
    pub download_path: String,
}

impl DeviceArgs {
    pub fn to_config(&self, out_dir: PathBuf, auto_confirm: bool) -> anyhow::Result<SessionConfig> {
        let config = SessionConfig {
            host: self.host.clone(),
            reconnect_delay: Duration::from_millis(self.reconnect_ms),
            dial_timeout: Duration::from_millis(self.dial_timeout_ms),
            download_path: self.download_path.clone(),
            out_dir,
            auto_confirm,
        }
        .validated()?;
        Ok(config)
    }
}
