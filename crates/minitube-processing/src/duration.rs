use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::probe::DurationProbe;
use crate::source::MediaSource;

/// Duration as registered with the metadata API: "MM:SS", or "H:MM:SS" from one hour up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub struct DurationLabel {
    total_seconds: u64,
}

impl DurationLabel {
    pub const ZERO: DurationLabel = DurationLabel { total_seconds: 0 };

    /// Whole seconds, truncating any fraction. Non-finite or negative input is zero.
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::ZERO;
        }
        DurationLabel {
            total_seconds: seconds.floor() as u64,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }
}

impl Display for DurationLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let hours = self.total_seconds / 3600;
        let minutes = (self.total_seconds % 3600) / 60;
        let seconds = self.total_seconds % 60;
        if hours > 0 {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(f, "{:02}:{:02}", minutes, seconds)
        }
    }
}

impl From<DurationLabel> for String {
    fn from(label: DurationLabel) -> Self {
        label.to_string()
    }
}

/// Read the duration of `source`, degrading to `00:00` on any failure.
///
/// In-memory sources are written to a temporary file for the probe; that file is
/// removed before this function returns, on success and failure alike.
pub async fn extract_duration(probe: &dyn DurationProbe, source: &MediaSource) -> DurationLabel {
    let handle = match source.acquire().await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, source = %source.name(), "Could not stage media for probing");
            return DurationLabel::ZERO;
        }
    };

    let result = probe.probe_seconds(handle.path()).await;
    drop(handle);

    match result {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => {
            let label = DurationLabel::from_seconds(seconds);
            tracing::debug!(source = %source.name(), duration = %label, "Extracted duration");
            label
        }
        Ok(seconds) => {
            tracing::warn!(source = %source.name(), seconds, "Probe returned an invalid duration");
            DurationLabel::ZERO
        }
        Err(e) => {
            tracing::warn!(error = %e, source = %source.name(), "Duration probe failed, using 00:00");
            DurationLabel::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    struct FixedProbe(Result<f64, ()>);

    #[async_trait]
    impl DurationProbe for FixedProbe {
        async fn probe_seconds(&self, _path: &Path) -> Result<f64, ProbeError> {
            self.0
                .map_err(|_| ProbeError::Failed("cannot decode".to_string()))
        }
    }

    /// Records the path it was given and whether it existed during the probe
    #[derive(Default)]
    struct RecordingProbe {
        seen: Mutex<Option<(PathBuf, bool)>>,
    }

    #[async_trait]
    impl DurationProbe for RecordingProbe {
        async fn probe_seconds(&self, path: &Path) -> Result<f64, ProbeError> {
            *self.seen.lock().unwrap() = Some((path.to_path_buf(), path.exists()));
            Err(ProbeError::Failed("decode error".to_string()))
        }
    }

    fn memory_source() -> MediaSource {
        MediaSource::Memory {
            name: "trip.mp4".to_string(),
            data: Bytes::from_static(&[0u8; 64]),
        }
    }

    #[test]
    fn test_label_formatting() {
        assert_eq!(DurationLabel::ZERO.to_string(), "00:00");
        assert_eq!(DurationLabel::from_seconds(135.9).to_string(), "02:15");
        assert_eq!(DurationLabel::from_seconds(59.0).to_string(), "00:59");
        assert_eq!(DurationLabel::from_seconds(3599.0).to_string(), "59:59");
        assert_eq!(DurationLabel::from_seconds(3600.0).to_string(), "1:00:00");
        assert_eq!(DurationLabel::from_seconds(37230.0).to_string(), "10:20:30");
        assert_eq!(DurationLabel::from_seconds(f64::INFINITY), DurationLabel::ZERO);
        assert_eq!(DurationLabel::from_seconds(-3.0), DurationLabel::ZERO);
    }

    #[test]
    fn test_label_serializes_as_text() {
        let json = serde_json::to_string(&DurationLabel::from_seconds(75.0)).unwrap();
        assert_eq!(json, r#""01:15""#);
    }

    #[tokio::test]
    async fn test_extract_uses_probe_result() {
        let label = extract_duration(&FixedProbe(Ok(135.2)), &memory_source()).await;
        assert_eq!(label.to_string(), "02:15");
    }

    #[tokio::test]
    async fn test_extract_falls_back_on_failure() {
        let label = extract_duration(&FixedProbe(Err(())), &memory_source()).await;
        assert_eq!(label.to_string(), "00:00");

        let label = extract_duration(&FixedProbe(Ok(f64::NAN)), &memory_source()).await;
        assert_eq!(label, DurationLabel::ZERO);
    }

    #[tokio::test]
    async fn test_extract_releases_temporary_file() {
        let probe = RecordingProbe::default();
        let label = extract_duration(&probe, &memory_source()).await;
        assert_eq!(label, DurationLabel::ZERO);

        let (path, existed) = probe.seen.lock().unwrap().clone().unwrap();
        assert!(existed, "probe should see the staged file");
        assert!(!path.exists(), "staged file must be removed after extraction");
    }

    #[tokio::test]
    async fn test_extract_missing_path_falls_back() {
        let source = MediaSource::Path(PathBuf::from("/nonexistent/clip.mp4"));
        let label = extract_duration(&FixedProbe(Err(())), &source).await;
        assert_eq!(label, DurationLabel::ZERO);
    }
}
