//! On-disk response cache.
//!
//! One file per URL, named by the SHA-256 of the URL with its fragment
//! removed. The cache only saves round trips: a hit returns the same bytes
//! the network returned when the entry was stored, and any I/O problem is
//! logged and treated as a miss.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{debug, instrument, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    /// `None` means entries never expire.
    ttl: Option<Duration>,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Option<Duration>) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache key for `url`: lowercase hex SHA-256 of the fragment-less URL.
    pub fn key(url: &Url) -> String {
        let mut normalized = url.clone();
        normalized.set_fragment(None);
        format!("{:x}", Sha256::digest(normalized.as_str().as_bytes()))
    }

    fn entry_path(&self, url: &Url) -> PathBuf {
        self.dir.join(Self::key(url))
    }

    /// Return the stored body for `url` if present and fresh.
    #[instrument(level = "debug", skip_all, fields(url = %url))]
    pub async fn get(&self, url: &Url) -> Option<Vec<u8>> {
        let path = self.entry_path(url);
        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot stat cache entry; ignoring cache");
                return None;
            }
        };

        if let Some(ttl) = self.ttl {
            let age = meta
                .modified()
                .ok()
                .and_then(|m| SystemTime::now().duration_since(m).ok())
                .unwrap_or_default();
            if age > ttl {
                debug!(age_secs = age.as_secs(), "Cache entry expired");
                return None;
            }
        }

        match fs::read(&path).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read cache entry; ignoring cache");
                None
            }
        }
    }

    /// Store `body` for `url`. Failures are logged, never returned.
    #[instrument(level = "debug", skip_all, fields(url = %url, bytes = body.len()))]
    pub async fn put(&self, url: &Url, body: &[u8]) {
        if let Err(e) = fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), error = %e, "Cannot create cache directory");
            return;
        }

        let path = self.entry_path(url);
        let tmp = path.with_extension("tmp");
        let result = match fs::write(&tmp, body).await {
            Ok(()) => fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => debug!(path = %path.display(), "Stored response in cache"),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot write cache entry");
                let _ = fs::remove_file(&tmp).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_key_ignores_fragment() {
        let a = ResponseCache::key(&url("https://sic.pt/Programas/governo-sombra/videos"));
        let b = ResponseCache::key(&url("https://sic.pt/Programas/governo-sombra/videos#top"));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_differs_per_url() {
        let a = ResponseCache::key(&url("https://sic.pt/a"));
        let b = ResponseCache::key(&url("https://sic.pt/b"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("cache"), None);
        let page = url("https://sic.pt/Programas/governo-sombra/videos");

        assert!(cache.get(&page).await.is_none());
        cache.put(&page, b"<article></article>").await;
        assert_eq!(cache.get(&page).await.unwrap(), b"<article></article>");
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), Some(Duration::ZERO));
        let page = url("https://sic.pt/videos");

        cache.put(&page, b"body").await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get(&page).await.is_none());
    }

    #[tokio::test]
    async fn test_unwritable_cache_dir_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let cache = ResponseCache::new(blocker.join("cache"), None);
        let page = url("https://sic.pt/videos");
        cache.put(&page, b"body").await;
        assert!(cache.get(&page).await.is_none());
    }
}
