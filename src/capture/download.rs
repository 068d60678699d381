use std::path::{Path, PathBuf};

use crate::foundation::error::{CardError, CardResult};

/// Destination for finished exports.
pub trait DownloadSink {
    /// Store `bytes` under `filename`.
    fn save(&mut self, filename: &str, bytes: &[u8]) -> CardResult<()>;
}

/// Writes exports into a directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl DirectorySink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            saved: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, oldest first.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> CardResult<()> {
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(CardError::capture(format!(
                "invalid export filename '{filename}'"
            )));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CardError::capture(format!(
                "failed to create download dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes).map_err(|e| {
            CardError::capture(format!("failed to write '{}': {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "export saved");
        self.saved.push(path);
        Ok(())
    }
}

/// Keeps exports in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    /// Saved `(filename, bytes)` pairs, oldest first.
    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> CardResult<()> {
        self.files.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/download.rs"]
mod tests;
