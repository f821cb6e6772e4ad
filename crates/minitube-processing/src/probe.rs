//! Media duration probes

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid probe executable: {0}")]
    InvalidExecutable(String),

    #[error("Failed to run probe: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("Probe failed: {0}")]
    Failed(String),

    #[error("Could not parse probe output: {0}")]
    Parse(String),
}

/// Reads the duration of a local media file.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    /// Duration in seconds
    async fn probe_seconds(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// Validate that an executable path doesn't contain shell metacharacters
fn validate_executable(path: &str) -> Result<(), ProbeError> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.is_empty() || path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(ProbeError::InvalidExecutable(path.to_string()));
    }
    Ok(())
}

/// Probe backed by the `ffprobe` executable.
///
/// The child process is killed if the probe is dropped or times out.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: impl Into<String>, timeout: Duration) -> Result<Self, ProbeError> {
        let ffprobe_path = ffprobe_path.into();
        validate_executable(&ffprobe_path)?;
        Ok(Self {
            ffprobe_path,
            timeout,
        })
    }
}

/// Extract `format.duration` from ffprobe's JSON output
fn parse_ffprobe_duration(stdout: &[u8]) -> Result<f64, ProbeError> {
    let probe_data: serde_json::Value =
        serde_json::from_slice(stdout).map_err(|e| ProbeError::Parse(e.to_string()))?;

    let duration = &probe_data["format"]["duration"];
    duration
        .as_str()
        .and_then(|d| d.parse::<f64>().ok())
        .or_else(|| duration.as_f64())
        .ok_or_else(|| ProbeError::Parse("missing format.duration".to_string()))
}

#[async_trait]
impl DurationProbe for FfprobeProbe {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path
    ))]
    async fn probe_seconds(&self, path: &Path) -> Result<f64, ProbeError> {
        let start = std::time::Instant::now();

        let child = Command::new(&self.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(path)
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        if !output.status.success() {
            return Err(ProbeError::Failed(format!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let seconds = parse_ffprobe_duration(&output.stdout)?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis(),
            video_duration = seconds,
            "Video probe completed"
        );

        Ok(seconds)
    }
}
