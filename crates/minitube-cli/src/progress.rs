use indicatif::{ProgressBar, ProgressStyle};
use minitube_api_client::{UploadOutcome, UploadProgress, UploadRequest, UploadSession};

/// Percentage bar for a transfer, drawn on stderr.
pub fn upload_bar(name: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar.set_message(name.to_string());
    bar
}

/// Run `session` with a progress bar; Ctrl-C cancels the transfer.
pub async fn run_with_progress(session: UploadSession, request: UploadRequest) -> UploadOutcome {
    let bar = upload_bar(&request.file.name());
    let token = session.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling upload");
            token.cancel();
        }
    });

    let updates = bar.clone();
    let outcome = session
        .run(request, move |progress: UploadProgress| {
            updates.set_position(u64::from(progress.percent_complete));
        })
        .await;
    interrupt.abort();

    if outcome.receipt.is_some() {
        bar.finish_with_message("uploaded");
    } else {
        bar.abandon_with_message(outcome.state.to_string());
    }
    outcome
}
