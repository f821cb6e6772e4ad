#![allow(dead_code)]

use async_trait::async_trait;
use minitube_api_client::{ApiClient, Auth, UploadCoordinator, UploadProgress, VideoFile};
use minitube_processing::{DurationProbe, ProbeError};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::NamedTempFile;

pub const TEST_TOKEN: &str = "test-token";

/// Probe that always reports the same duration and counts its calls.
pub struct FixedProbe {
    seconds: f64,
    calls: AtomicUsize,
}

impl FixedProbe {
    pub fn new(seconds: f64) -> Arc<Self> {
        Arc::new(Self {
            seconds,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DurationProbe for FixedProbe {
    async fn probe_seconds(&self, _path: &Path) -> Result<f64, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.seconds)
    }
}

pub struct FailingProbe;

#[async_trait]
impl DurationProbe for FailingProbe {
    async fn probe_seconds(&self, _path: &Path) -> Result<f64, ProbeError> {
        Err(ProbeError::Timeout(Duration::from_secs(30)))
    }
}

pub fn authed_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Auth::bearer(TEST_TOKEN), Duration::from_secs(10))
        .expect("client")
}

pub fn anonymous_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Auth::Anonymous, Duration::from_secs(10)).expect("client")
}

pub fn coordinator(base_url: &str, probe: Arc<dyn DurationProbe>) -> UploadCoordinator {
    UploadCoordinator::new(authed_client(base_url), probe).with_chunk_size(1024)
}

/// On-disk video of `size` bytes with the given extension.
pub async fn video_on_disk(size: usize, suffix: &str) -> (NamedTempFile, VideoFile) {
    let mut temp = tempfile::Builder::new()
        .prefix("minitube-test-")
        .suffix(suffix)
        .tempfile()
        .expect("tempfile");
    temp.write_all(&vec![7u8; size]).expect("write fixture");
    temp.flush().expect("flush fixture");
    let file = VideoFile::open(temp.path()).await.expect("open fixture");
    (temp, file)
}

/// Callback that records every percentage it receives.
pub fn progress_recorder() -> (
    impl FnMut(UploadProgress) + Send + 'static,
    Arc<Mutex<Vec<u8>>>,
) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let callback = move |p: UploadProgress| sink.lock().unwrap().push(p.percent_complete);
    (callback, seen)
}

pub fn grant_body(upload_url: &str) -> String {
    serde_json::json!({ "uploadUrl": upload_url, "videoId": 42 }).to_string()
}
