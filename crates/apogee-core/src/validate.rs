use crate::config::SessionConfig;
use crate::error::{ApogeeError, Result};

pub fn validate_config(c: &SessionConfig) -> Result<()> {
    validate_host(&c.host)?;

    // A zero delay would turn a dead device into a busy dial loop.
    if c.reconnect_delay.is_zero() {
        return Err(ApogeeError::Config("reconnect delay must be non-zero".into()));
    }
    if c.dial_timeout.is_zero() {
        return Err(ApogeeError::Config("dial timeout must be non-zero".into()));
    }

    if !c.download_path.starts_with('/') {
        return Err(ApogeeError::Config(format!(
            "download path must start with '/': {}",
            c.download_path
        )));
    }
    if c.download_path.chars().any(char::is_whitespace) {
        return Err(ApogeeError::Config(
            "download path must not contain whitespace".into(),
        ));
    }

    Ok(())
}

/// Host is spliced into both `ws://` and `http://` URLs, so it must be a bare
/// authority: no scheme, no path, no whitespace.
pub fn validate_host(host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(ApogeeError::Config("host must not be empty".into()));
    }
    if host.contains("://") {
        return Err(ApogeeError::Config(format!(
            "host must not carry a scheme: {host}"
        )));
    }
    if host.contains('/') {
        return Err(ApogeeError::Config(format!(
            "host must not carry a path: {host}"
        )));
    }
    if host.chars().any(char::is_whitespace) {
        return Err(ApogeeError::Config(format!(
            "host must not contain whitespace: {host:?}"
        )));
    }
    Ok(())
}
