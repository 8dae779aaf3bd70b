use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tokio::fs;

use super::CacheKey;

// Image cache for status images - stored on disk as `<key>.jpg`, forever
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the cache directory (and its parents) if it does not exist yet.
    pub async fn init(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Read a cached image. A missing file is a miss, any other error is returned.
    pub async fn get_image(&self, key: &CacheKey) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn store_image(&self, key: &CacheKey, data: &[u8]) -> io::Result<()> {
        fs::write(self.path_for(key), data).await
    }

    /// Returns `false` when there was nothing to remove.
    pub async fn remove_image(&self, key: &CacheKey) -> io::Result<bool> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(raw: &str) -> CacheKey {
        CacheKey::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn init_creates_nested_directory() {
        let temp = tempdir().unwrap();
        let cache = ImageCache::new(temp.path().join("a/b/cats"));

        cache.init().await.unwrap();
        assert!(cache.dir().is_dir());

        // Second call on an existing directory is fine
        cache.init().await.unwrap();
    }

    #[tokio::test]
    async fn missing_image_is_a_miss() {
        let temp = tempdir().unwrap();
        let cache = ImageCache::new(temp.path());

        assert_eq!(cache.get_image(&key("418")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_overwrites_and_get_returns_last_bytes() {
        let temp = tempdir().unwrap();
        let cache = ImageCache::new(temp.path());
        let code = key("200");

        cache.store_image(&code, b"first").await.unwrap();
        cache.store_image(&code, b"second").await.unwrap();

        assert_eq!(cache.get_image(&code).await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(
            std::fs::read(temp.path().join("200.jpg")).unwrap(),
            b"second".to_vec()
        );
    }

    #[tokio::test]
    async fn empty_image_is_still_cached() {
        let temp = tempdir().unwrap();
        let cache = ImageCache::new(temp.path());
        let code = key("204");

        cache.store_image(&code, &[]).await.unwrap();

        assert_eq!(cache.get_image(&code).await.unwrap(), Some(Vec::new()));
        assert_eq!(std::fs::metadata(cache.path_for(&code)).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn remove_reports_whether_file_existed() {
        let temp = tempdir().unwrap();
        let cache = ImageCache::new(temp.path());
        let code = key("500");

        assert!(!cache.remove_image(&code).await.unwrap());

        cache.store_image(&code, b"img").await.unwrap();
        assert!(cache.remove_image(&code).await.unwrap());
        assert_eq!(cache.get_image(&code).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unreadable_entry_is_an_error_not_a_miss() {
        let temp = tempdir().unwrap();
        let cache = ImageCache::new(temp.path());
        let code = key("301");

        // A directory where the file should be cannot be read as an image
        std::fs::create_dir(cache.path_for(&code)).unwrap();

        assert!(cache.get_image(&code).await.is_err());
    }
}
