// crates/apogee-core/src/download.rs

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// `YYYY-MM-DD-HH-mm-ss.csv`, every field zero-padded.
pub const FILE_NAME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S.csv";

pub fn timestamp_file_name(now: &NaiveDateTime) -> String {
    now.format(FILE_NAME_FORMAT).to_string()
}

/// A log fetch: where it comes from and what it is called locally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub file_name: String,
}

impl DownloadRequest {
    pub fn new(url: &str, now: &NaiveDateTime) -> Self {
        Self {
            url: url.to_string(),
            file_name: timestamp_file_name(now),
        }
    }

    pub fn target_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}
