use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};

/// Persisted "last logo" cache consulted on startup.
pub trait LogoStorage {
    /// Stored logo URL, if any.
    fn load(&self) -> CardResult<Option<String>>;
    /// Replace the stored URL; `None` clears it.
    fn save(&mut self, url: Option<&str>) -> CardResult<()>;
}

/// Process-local storage, used when no file is configured.
#[derive(Clone, Debug, Default)]
pub struct MemoryLogoStorage {
    value: Option<String>,
}

impl LogoStorage for MemoryLogoStorage {
    fn load(&self) -> CardResult<Option<String>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, url: Option<&str>) -> CardResult<()> {
        self.value = url.map(str::to_string);
        Ok(())
    }
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct StoredLogo {
    #[serde(default)]
    logo_url: Option<String>,
}

/// JSON file storage: `{ "logo_url": "..." }`.
#[derive(Clone, Debug)]
pub struct FileLogoStorage {
    path: PathBuf,
}

impl FileLogoStorage {
    /// Storage backed by `path`; the file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogoStorage for FileLogoStorage {
    fn load(&self) -> CardResult<Option<String>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read logo storage '{}'", self.path.display()))
                    .into());
            }
        };
        let stored: StoredLogo = serde_json::from_str(&text)
            .map_err(|e| CardError::serde(format!("logo storage json: {e}")))?;
        Ok(stored.logo_url.filter(|u| !u.trim().is_empty()))
    }

    fn save(&mut self, url: Option<&str>) -> CardResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create storage dir '{}'", parent.display()))?;
        }
        let stored = StoredLogo {
            logo_url: url.map(str::to_string),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| CardError::serde(format!("logo storage json: {e}")))?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write logo storage '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/logo_storage.rs"]
mod tests;
