// crates/apogee-cli/src/cmd/mod.rs

pub mod device;
pub mod download;
pub mod flight;
pub mod monitor;

/// Everything touching session state runs on this one thread.
pub fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt)
}
