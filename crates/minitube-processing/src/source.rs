use bytes::Bytes;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the bytes of a media file live
#[derive(Debug, Clone)]
pub enum MediaSource {
    /// A file on local disk
    Path(PathBuf),
    /// An in-memory buffer with a display name (e.g. read from stdin)
    Memory { name: String, data: Bytes },
}

impl MediaSource {
    pub fn name(&self) -> String {
        match self {
            MediaSource::Path(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("video")
                .to_string(),
            MediaSource::Memory { name, .. } => name.clone(),
        }
    }

    /// Acquire a path a probe can read. Released when the handle drops.
    ///
    /// In-memory data is written out on the blocking pool; buffers can be gigabytes.
    pub(crate) async fn acquire(&self) -> io::Result<LocalHandle<'_>> {
        match self {
            MediaSource::Path(path) => Ok(LocalHandle::Borrowed(path)),
            MediaSource::Memory { name, data } => {
                // Keep the extension so probes can sniff the container
                let suffix = Path::new(name)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| format!(".{}", e))
                    .unwrap_or_default();
                let data = data.clone();
                let temp = tokio::task::spawn_blocking(move || -> io::Result<NamedTempFile> {
                    let mut temp = tempfile::Builder::new()
                        .prefix("minitube-probe-")
                        .suffix(&suffix)
                        .tempfile()?;
                    temp.write_all(&data)?;
                    temp.flush()?;
                    Ok(temp)
                })
                .await
                .map_err(io::Error::other)??;
                Ok(LocalHandle::Temporary(temp))
            }
        }
    }
}

/// Scoped local handle on a media source.
///
/// In-memory sources are materialized into a temporary file that is removed on drop.
pub(crate) enum LocalHandle<'a> {
    Borrowed(&'a Path),
    Temporary(NamedTempFile),
}

impl LocalHandle<'_> {
    pub(crate) fn path(&self) -> &Path {
        match self {
            LocalHandle::Borrowed(path) => path,
            LocalHandle::Temporary(temp) => temp.path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_handle_is_removed_on_drop() {
        let source = MediaSource::Memory {
            name: "clip.mp4".to_string(),
            data: Bytes::from_static(b"not really a video"),
        };

        let handle = source.acquire().await.unwrap();
        let path = handle.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp4"));
        assert_eq!(std::fs::read(&path).unwrap(), b"not really a video");

        drop(handle);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_path_handle_borrows() {
        let source = MediaSource::Path(PathBuf::from("/videos/trip.mov"));
        let handle = source.acquire().await.unwrap();
        assert_eq!(handle.path(), Path::new("/videos/trip.mov"));
        assert_eq!(source.name(), "trip.mov");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_staging_leaves_runtime_free() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let data = Bytes::from(vec![3u8; 16 * 1024 * 1024]);
        let source = MediaSource::Memory {
            name: "big.mov".to_string(),
            data: data.clone(),
        };

        // Only runs if acquire yields the single runtime thread
        let ticked = Arc::new(AtomicBool::new(false));
        let flag = ticked.clone();
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        let handle = source.acquire().await.unwrap();
        assert!(ticked.load(Ordering::SeqCst));
        let staged = std::fs::metadata(handle.path()).unwrap();
        assert_eq!(staged.len(), data.len() as u64);
    }
}
