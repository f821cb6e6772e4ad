//! Upload coordinator.
//!
//! One upload runs validate -> extract duration -> request grant -> transfer,
//! strictly in sequence. The file body goes straight to object storage; the
//! metadata API only hands out a single-use destination URL for it.

mod file;
mod grant;
mod progress;
mod state;
mod transfer;

pub use file::VideoFile;
pub use grant::UploadGrant;
pub use progress::UploadProgress;
pub use state::{InvalidTransition, UploadState, UploadStateMachine};

use minitube_core::models::ResourceId;
use minitube_core::{validate_upload_fields, ClientConfig, ErrorMetadata, LogLevel, UploadError};
use minitube_processing::{extract_duration, DurationLabel, DurationProbe, FfprobeProbe, ProbeError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::ApiClient;
use progress::ProgressReporter;

const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// What the user asked to upload
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub title: String,
    pub description: Option<String>,
    pub file: VideoFile,
}

impl UploadRequest {
    pub fn new(title: impl Into<String>, file: VideoFile) -> Self {
        Self {
            title: title.into(),
            description: None,
            file,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Result of a completed upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub video_id: Option<ResourceId>,
    pub title: String,
    pub duration: DurationLabel,
    pub bytes: u64,
}

/// Final state of a session, the states it went through, and the receipt on success.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub state: UploadState,
    pub history: Vec<UploadState>,
    pub receipt: Option<UploadReceipt>,
}

impl UploadOutcome {
    pub fn into_result(self) -> Result<UploadReceipt, UploadError> {
        match (self.state, self.receipt) {
            (UploadState::Failed(err), _) => Err(err),
            (_, Some(receipt)) => Ok(receipt),
            (state, None) => Err(UploadError::TransferFailed(format!(
                "upload ended in state {} without a receipt",
                state
            ))),
        }
    }
}

/// Runs uploads against one API client and duration probe.
#[derive(Clone)]
pub struct UploadCoordinator {
    client: ApiClient,
    probe: Arc<dyn DurationProbe>,
    chunk_size: usize,
}

impl UploadCoordinator {
    pub fn new(client: ApiClient, probe: Arc<dyn DurationProbe>) -> Self {
        Self {
            client,
            probe,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Coordinator using `ffprobe` and the configured chunk size.
    pub fn from_config(config: &ClientConfig, client: ApiClient) -> Result<Self, ProbeError> {
        let probe = FfprobeProbe::new(
            config.ffprobe_path.clone(),
            Duration::from_secs(config.probe_timeout_secs),
        )?;
        Ok(Self::new(client, Arc::new(probe)).with_chunk_size(config.transfer_chunk_size))
    }

    pub fn with_probe(mut self, probe: Arc<dyn DurationProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// A fresh single-shot session. Grab its cancel token before running it.
    pub fn session(&self) -> UploadSession {
        UploadSession {
            client: self.client.clone(),
            probe: self.probe.clone(),
            chunk_size: self.chunk_size,
            cancel: CancellationToken::new(),
        }
    }

    /// Run one upload to completion.
    pub async fn upload(
        &self,
        request: UploadRequest,
        on_progress: impl FnMut(UploadProgress) + Send + 'static,
    ) -> Result<UploadReceipt, UploadError> {
        self.session().run(request, on_progress).await.into_result()
    }
}

/// One upload attempt. Consumed by [`UploadSession::run`]; retrying means a new session.
pub struct UploadSession {
    client: ApiClient,
    probe: Arc<dyn DurationProbe>,
    chunk_size: usize,
    cancel: CancellationToken,
}

impl UploadSession {
    /// Cancelling this token aborts the transfer step.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    #[tracing::instrument(skip_all, fields(file = %request.file.name(), size = request.file.size()))]
    pub async fn run(
        self,
        request: UploadRequest,
        on_progress: impl FnMut(UploadProgress) + Send + 'static,
    ) -> UploadOutcome {
        let mut machine = UploadStateMachine::new();
        let result = self.drive(&mut machine, &request, on_progress).await;

        let receipt = match result {
            Ok(receipt) => {
                enter(&mut machine, UploadState::Completed);
                tracing::info!(
                    video_id = ?receipt.video_id,
                    duration = %receipt.duration,
                    bytes = receipt.bytes,
                    "Upload completed"
                );
                Some(receipt)
            }
            Err(err) => {
                log_failure(&err);
                enter(&mut machine, UploadState::Failed(err));
                None
            }
        };

        let (state, history) = machine.into_parts();
        UploadOutcome {
            state,
            history,
            receipt,
        }
    }

    async fn drive(
        &self,
        machine: &mut UploadStateMachine,
        request: &UploadRequest,
        on_progress: impl FnMut(UploadProgress) + Send + 'static,
    ) -> Result<UploadReceipt, UploadError> {
        let file = &request.file;

        enter(machine, UploadState::Validating);
        let mut grant_request = validate_upload_fields(
            &request.title,
            request.description.as_deref(),
            &DurationLabel::ZERO.to_string(),
        )?;
        file.validate()?;

        enter(machine, UploadState::ExtractingMetadata);
        let duration = extract_duration(self.probe.as_ref(), file.source()).await;
        grant_request.duration = duration.to_string();

        enter(machine, UploadState::RequestingGrant);
        let grant = self.client.request_grant(&grant_request).await?;
        let video_id = grant.video_id().cloned();

        enter(machine, UploadState::Transferring);
        let reporter = ProgressReporter::new(file.size(), on_progress);
        let bytes = transfer::stream_to_storage(
            self.client.storage_client(),
            grant,
            file,
            &reporter,
            &self.cancel,
            self.chunk_size,
        )
        .await?;

        Ok(UploadReceipt {
            video_id,
            title: grant_request.title,
            duration,
            bytes,
        })
    }
}

fn enter(machine: &mut UploadStateMachine, next: UploadState) {
    if let Err(e) = machine.advance(next) {
        tracing::error!(error = %e, "Upload state machine rejected a transition");
    }
}

fn log_failure(err: &UploadError) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, code, "Upload failed"),
        LogLevel::Warn => tracing::warn!(error = %err, code, "Upload failed"),
        LogLevel::Error => tracing::error!(error = %err, code, "Upload failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Auth;

    #[test]
    fn test_outcome_into_result() {
        let failed = UploadOutcome {
            state: UploadState::Failed(UploadError::TransferAborted),
            history: vec![UploadState::Idle],
            receipt: None,
        };
        assert_eq!(failed.into_result().unwrap_err(), UploadError::TransferAborted);

        let done = UploadOutcome {
            state: UploadState::Completed,
            history: vec![],
            receipt: Some(UploadReceipt {
                video_id: Some(ResourceId::from(3)),
                title: "Trip".to_string(),
                duration: DurationLabel::from_seconds(61.0),
                bytes: 10,
            }),
        };
        let receipt = done.into_result().unwrap();
        assert_eq!(receipt.duration.to_string(), "01:01");
    }

    #[test]
    fn test_receipt_json_shape() {
        let receipt = UploadReceipt {
            video_id: Some(ResourceId::from(7)),
            title: "Trip".to_string(),
            duration: DurationLabel::from_seconds(135.0),
            bytes: 2048,
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "videoId": 7, "title": "Trip", "duration": "02:15", "bytes": 2048 })
        );
    }

    #[test]
    fn test_sessions_have_independent_tokens() {
        let client =
            ApiClient::new("http://localhost:3000", Auth::Anonymous, Duration::from_secs(5))
                .unwrap();
        let probe = FfprobeProbe::new("ffprobe", Duration::from_secs(1)).unwrap();
        let coordinator = UploadCoordinator::new(client, Arc::new(probe));

        let first = coordinator.session();
        let second = coordinator.session();
        first.cancel_token().cancel();
        assert!(first.cancel_token().is_cancelled());
        assert!(!second.cancel_token().is_cancelled());
    }
}
