use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{CardError, CardResult};

/// Opaque handle to an in-memory upload, in `blob:` URL form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// URL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug)]
struct Blob {
    mime: String,
    bytes: Arc<Vec<u8>>,
}

/// Owner of every live object URL handed out for uploads.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    next_id: u64,
    live: HashMap<String, Blob>,
    revoked: u64,
}

impl ObjectUrlRegistry {
    const SCHEME_PREFIX: &'static str = "blob:cardsmith/";

    /// Register `bytes` and return a fresh URL for them.
    pub fn create(&mut self, bytes: Vec<u8>, mime: &str) -> ObjectUrl {
        self.next_id += 1;
        let url = format!("{}{}", Self::SCHEME_PREFIX, self.next_id);
        self.live.insert(
            url.clone(),
            Blob {
                mime: mime.to_string(),
                bytes: Arc::new(bytes),
            },
        );
        tracing::debug!(%url, mime, "object url created");
        ObjectUrl(url)
    }

    /// Release `url`; returns false when it was not live.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        let removed = self.live.remove(url.as_str()).is_some();
        if removed {
            self.revoked += 1;
            tracing::debug!(url = %url, "object url revoked");
        }
        removed
    }

    /// Bytes behind a live URL.
    pub fn resolve(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.live.get(url).map(|b| Arc::clone(&b.bytes))
    }

    /// MIME type recorded at creation.
    pub fn mime(&self, url: &str) -> Option<&str> {
        self.live.get(url).map(|b| b.mime.as_str())
    }

    /// Number of URLs not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of successful revocations so far.
    pub fn revoked_count(&self) -> u64 {
        self.revoked
    }

    /// True when `url` uses the registry's scheme.
    pub fn is_object_url(url: &str) -> bool {
        url.starts_with(Self::SCHEME_PREFIX)
    }
}

/// Resolves a logo reference into encoded image bytes.
pub trait LogoSource {
    /// Fetch the encoded bytes behind `url`.
    fn fetch(&self, url: &str) -> CardResult<Arc<Vec<u8>>>;
}

impl LogoSource for ObjectUrlRegistry {
    fn fetch(&self, url: &str) -> CardResult<Arc<Vec<u8>>> {
        if Self::is_object_url(url) {
            return self
                .resolve(url)
                .ok_or_else(|| CardError::asset(format!("object url '{url}' is not live")));
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            return Err(CardError::asset(format!(
                "remote logo '{url}' cannot be fetched"
            )));
        }
        let path = url.strip_prefix("file://").unwrap_or(url);
        std::fs::read(path).map(Arc::new).map_err(|e| {
            CardError::asset(format!("failed to read logo '{path}': {e}"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/object_url.rs"]
mod tests;
