use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use minitube_core::format::error_message;
use minitube_core::UploadError;
use minitube_processing::MediaSource;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client};
use std::io;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

use super::file::VideoFile;
use super::grant::UploadGrant;
use super::progress::{ProgressReporter, UploadProgress};
use super::DEFAULT_CHUNK_SIZE;
use crate::ApiClient;

const BLOB_TYPE_HEADER: &str = "x-ms-blob-type";
const BLOB_TYPE_BLOCK: &str = "BlockBlob";

async fn chunks(
    source: &MediaSource,
    chunk_size: usize,
) -> io::Result<BoxStream<'static, io::Result<Bytes>>> {
    match source {
        MediaSource::Path(path) => {
            let file = tokio::fs::File::open(path).await?;
            Ok(ReaderStream::with_capacity(file, chunk_size).boxed())
        }
        MediaSource::Memory { data, .. } => {
            let data = data.clone();
            let len = data.len();
            let parts: Vec<io::Result<Bytes>> = (0..len)
                .step_by(chunk_size)
                .map(|start| Ok(data.slice(start..(start + chunk_size).min(len))))
                .collect();
            Ok(stream::iter(parts).boxed())
        }
    }
}

fn cancelled() -> io::Error {
    io::Error::new(io::ErrorKind::Interrupted, "upload cancelled")
}

impl ApiClient {
    /// Stream `file` to the grant's destination, reporting monotonic progress.
    ///
    /// Cancelling `cancel` aborts the transfer and silences `on_progress` immediately.
    pub async fn transfer(
        &self,
        grant: UploadGrant,
        file: &VideoFile,
        on_progress: impl FnMut(UploadProgress) + Send + 'static,
        cancel: &CancellationToken,
    ) -> Result<u64, UploadError> {
        let reporter = ProgressReporter::new(file.size(), on_progress);
        stream_to_storage(
            &self.storage,
            grant,
            file,
            &reporter,
            cancel,
            DEFAULT_CHUNK_SIZE,
        )
        .await
    }
}

/// Stream `file` to the grant's destination with a single PUT.
///
/// The API credential is never sent to storage. Returns the number of bytes sent.
pub(crate) async fn stream_to_storage(
    storage: &Client,
    grant: UploadGrant,
    file: &VideoFile,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
    chunk_size: usize,
) -> Result<u64, UploadError> {
    let (destination, _) = grant.into_parts();

    if cancel.is_cancelled() {
        reporter.halt();
        return Err(UploadError::TransferAborted);
    }

    let source = chunks(file.source(), chunk_size.max(1))
        .await
        .map_err(|e| UploadError::TransferFailed(format!("could not read {}: {}", file.name(), e)))?;

    let body_reporter = reporter.clone();
    let body_cancel = cancel.clone();
    let body = source.map(move |chunk| {
        if body_cancel.is_cancelled() {
            return Err(cancelled());
        }
        let chunk = chunk?;
        body_reporter.advance(chunk.len() as u64);
        Ok(chunk)
    });

    let request = storage
        .put(&destination)
        .header(BLOB_TYPE_HEADER, BLOB_TYPE_BLOCK)
        .header(CONTENT_TYPE, file.content_type())
        .header(CONTENT_LENGTH, file.size())
        .body(Body::wrap_stream(body))
        .send();

    tracing::info!(file = %file.name(), bytes = file.size(), "Transferring to storage");

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        result = request => Some(result),
    };

    let response = match outcome {
        Some(Ok(response)) if !cancel.is_cancelled() => response,
        Some(Err(e)) if !cancel.is_cancelled() => {
            reporter.halt();
            return Err(UploadError::TransferFailed(e.to_string()));
        }
        _ => {
            reporter.halt();
            tracing::info!(file = %file.name(), sent = reporter.bytes_sent(), "Transfer cancelled");
            return Err(UploadError::TransferAborted);
        }
    };

    let status = response.status();
    if !status.is_success() {
        reporter.halt();
        let body = response.text().await.unwrap_or_default();
        return Err(UploadError::TransferFailed(format!(
            "storage responded {}: {}",
            status.as_u16(),
            error_message(&body, status.canonical_reason())
        )));
    }

    reporter.finish();
    Ok(file.size())
}
