// crates/apogee-cli/src/io/fetch.rs

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use apogee_core::DownloadRequest;

/// GETs the log and stores it under the request's timestamped name.
pub async fn save(req: &DownloadRequest, dir: &Path) -> anyhow::Result<PathBuf> {
    let resp = reqwest::get(&req.url)
        .await
        .with_context(|| format!("GET {}", req.url))?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("GET {} returned {status}", req.url);
    }
    let body = resp
        .bytes()
        .await
        .with_context(|| format!("read body of {}", req.url))?;

    let path = write_atomic(dir, &req.file_name, &body)?;
    info!(url = %req.url, path = %path.display(), bytes = body.len(), "log saved");
    Ok(path)
}

/// Writes through a temp file in `dir` so a partial log never carries the
/// final name.
pub fn write_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("create dir: {}", dir.display()))?;
    let target = dir.join(file_name);

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(bytes).context("write log bytes")?;
    tmp.persist(&target)
        .with_context(|| format!("persist {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_atomic_creates_dir_and_leaves_only_the_target() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs");

        let path = write_atomic(&dir, "2024-03-05-09-07-02.csv", b"t,alt\n0,1.5\n").unwrap();
        assert_eq!(path, dir.join("2024-03-05-09-07-02.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"t,alt\n0,1.5\n");

        let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_atomic_replaces_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_atomic(dir.path(), "a.csv", b"old").unwrap();
        let path = write_atomic(dir.path(), "a.csv", b"new").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }
}
