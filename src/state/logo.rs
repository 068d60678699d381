use std::path::{Path, PathBuf};

use crate::assets::object_url::ObjectUrl;
use crate::foundation::error::{CardError, CardResult};

/// Where the current logo lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogoRef {
    /// Upload held by the object URL registry; revoked when replaced.
    Object(ObjectUrl),
    /// URL restored from storage or loaded from a state document.
    Persisted(String),
}

impl LogoRef {
    /// URL text for either variant.
    pub fn url(&self) -> &str {
        match self {
            Self::Object(url) => url.as_str(),
            Self::Persisted(url) => url,
        }
    }
}

/// An uploaded file, as handed over by a file picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoFile {
    /// File name shown to the user.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Source path when the upload came from disk.
    pub origin: Option<PathBuf>,
}

impl LogoFile {
    /// Read `path`, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> CardResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CardError::asset(format!("failed to read logo '{}': {e}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime: mime_for_path(path).to_string(),
            bytes,
            origin: Some(path.to_path_buf()),
        })
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub(crate) mod serde_logo_url {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::LogoRef;

    pub(crate) fn serialize<S: Serializer>(
        logo: &Option<LogoRef>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match logo {
            Some(logo) => serializer.serialize_some(logo.url()),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<LogoRef>, D::Error> {
        let url = Option::<String>::deserialize(deserializer)?;
        Ok(url
            .filter(|u| !u.trim().is_empty())
            .map(LogoRef::Persisted))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/logo.rs"]
mod tests;
