use std::path::PathBuf;

use chrono::Local;
use clap::Args;

use apogee_core::DownloadRequest;

use super::device::DeviceArgs;
use crate::io::fetch;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Directory the log is written into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn run(args: DownloadArgs) -> anyhow::Result<()> {
    let config = args.device.to_config(args.out_dir, false)?;
    let req = DownloadRequest::new(&config.download_url(), &Local::now().naive_local());

    let path = super::runtime()?.block_on(fetch::save(&req, &config.out_dir))?;
    println!("{}", path.display());
    Ok(())
}
