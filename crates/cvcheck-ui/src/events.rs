use cvcheck_types::{AppEvent, Route, UiEvent};

use crate::progress::AnalysisProgress;
use crate::prompt;
use crate::state::{Next, UiState};
use crate::views;

/// Update UI state for `event` and return the text to print, if any
pub fn render(event: &AppEvent, state: &mut UiState) -> Option<String> {
    let palette = state.palette.clone();

    match event {
        AppEvent::Navigated(route) => {
            state.finish_progress();
            state.route = route.clone();
            state.has_results = false;
            tracing::debug!("[UI] Navigated to {route}");

            let header = views::header(&state.prefs, &palette);
            let body = match route {
                Route::Landing => views::landing(&palette),
                Route::Upload => views::upload_picker(&palette),
                Route::Results { .. } => return Some(header),
            };
            Some(format!("{header}\n{body}\n"))
        }
        AppEvent::PreferencesChanged(prefs) => {
            state.set_prefs(*prefs);
            Some(views::preferences(prefs, &state.palette))
        }
        AppEvent::UploadRejected(message) => Some(views::error(message, &palette)),
        AppEvent::UploadStarted(file) => {
            state.finish_progress();
            state.progress = Some(AnalysisProgress::start());
            Some(views::processing(file, &palette))
        }
        AppEvent::AnalysisProgress(update) => {
            let progress = state.progress.as_mut()?;
            let lines = progress.update(update, &palette);
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        AppEvent::UploadFailed(message) => {
            state.finish_progress();
            Some(views::error(message, &palette))
        }
        AppEvent::ResultsLoading(id) => Some(views::loading(id, &palette)),
        AppEvent::ResultsLoaded(result) => {
            state.has_results = true;
            Some(views::results(result, &palette))
        }
        AppEvent::ResultsFailed(message) => Some(views::error(message, &palette)),
        // Raw report for piping, no styling
        AppEvent::FeedbackText(text) => Some(text.trim_end().to_string()),
        AppEvent::ReportSaved(path) => Some(views::report_saved(path, &palette)),
        AppEvent::Toast(message) => Some(views::toast(message, &palette)),
        AppEvent::ExportFailed(message) => Some(views::error(message, &palette)),
    }
}

/// Decide what to do after `event`: wait for more, send the next intent, or
/// finish the session
pub async fn next_intent(event: &AppEvent, state: &mut UiState) -> anyhow::Result<Next> {
    match event {
        AppEvent::UploadRejected(message) => {
            tracing::warn!("Upload rejected: {message}");
            recover_upload(state, message, false).await
        }
        AppEvent::UploadFailed(message) => {
            tracing::warn!("Upload failed: {message}");
            recover_upload(state, message, true).await
        }
        AppEvent::ResultsFailed(message) => {
            tracing::warn!("Results failed: {message}");
            recover_results(state, message).await
        }
        AppEvent::ExportFailed(message) => {
            tracing::warn!("Export failed: {message}");
            // Later exports may still succeed; the run still ends as failed
            state.record_failure(message);
            proceed(state).await
        }
        AppEvent::Navigated(Route::Results { .. })
        | AppEvent::UploadStarted(_)
        | AppEvent::AnalysisProgress(_)
        | AppEvent::ResultsLoading(_) => Ok(Next::Wait),
        AppEvent::Navigated(_)
        | AppEvent::PreferencesChanged(_)
        | AppEvent::ResultsLoaded(_)
        | AppEvent::FeedbackText(_)
        | AppEvent::ReportSaved(_)
        | AppEvent::Toast(_) => proceed(state).await,
    }
}

/// Send the next queued intent, or ask the user when the queue is empty
pub async fn proceed(state: &mut UiState) -> anyhow::Result<Next> {
    if let Some(intent) = state.advance() {
        return Ok(Next::Send(intent));
    }

    if !state.interactive {
        return Ok(Next::Finish);
    }

    match &state.route {
        Route::Landing => {
            if prompt::confirm("Upload a CV now?").await? {
                Ok(Next::Send(UiEvent::Navigate("/upload".into())))
            } else {
                Ok(Next::Finish)
            }
        }
        Route::Upload => ask_for_file().await,
        Route::Results { .. } if state.has_results => {
            let choice = prompt::choose(
                "What next?",
                &[
                    ('d', "download PDF"),
                    ('c', "copy"),
                    ('p', "print"),
                    ('a', "analyze another"),
                    ('q', "quit"),
                ],
            )
            .await?;

            Ok(match choice {
                Some('d') => Next::Send(UiEvent::DownloadReport { dir: None }),
                Some('c') => Next::Send(UiEvent::CopyFeedback),
                Some('p') => Next::Send(UiEvent::PrintFeedback),
                Some('a') => Next::Send(UiEvent::AnalyzeAnother),
                _ => Next::Finish,
            })
        }
        Route::Results { .. } => Ok(Next::Finish),
    }
}

async fn ask_for_file() -> anyhow::Result<Next> {
    match prompt::file_path("Path to your CV (blank to quit):").await? {
        Some(path) => Ok(Next::Send(UiEvent::SelectFile(path))),
        None => Ok(Next::Finish),
    }
}

/// A rejected file keeps the picker; a failed upload needs a reset first
async fn recover_upload(state: &mut UiState, message: &str, needs_reset: bool) -> anyhow::Result<Next> {
    if !state.interactive {
        state.record_failure(message);
        return Ok(Next::Finish);
    }

    let Some(path) = prompt::file_path("Try again with file (blank to quit):").await? else {
        state.record_failure(message);
        return Ok(Next::Finish);
    };

    if needs_reset {
        state.script.push_front(UiEvent::SelectFile(path));
        Ok(Next::Send(UiEvent::ResetUpload))
    } else {
        Ok(Next::Send(UiEvent::SelectFile(path)))
    }
}

async fn recover_results(state: &mut UiState, message: &str) -> anyhow::Result<Next> {
    if !state.interactive {
        state.record_failure(message);
        return Ok(Next::Finish);
    }

    let choice = prompt::choose(
        "Results unavailable.",
        &[('r', "retry"), ('u', "go to upload"), ('q', "quit")],
    )
    .await?;

    Ok(match choice {
        Some('r') => Next::Send(UiEvent::RetryResults),
        Some('u') => {
            state.script.clear();
            Next::Send(UiEvent::Navigate("/upload".into()))
        }
        _ => {
            state.record_failure(message);
            Next::Finish
        }
    })
}
