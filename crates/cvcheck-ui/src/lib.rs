//! Terminal front end: renders app events and feeds user intents back.

use console::Term;
use kanal::{AsyncReceiver, AsyncSender};
use cvcheck_types::{AppEvent, UiEvent};

pub mod events;
pub mod progress;
pub mod prompt;
pub mod state;
pub mod theme;
pub mod views;

pub use state::{Next, UiOptions, UiOutcome, UiState};

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<UiEvent>,
    options: UiOptions,
) -> anyhow::Result<UiOutcome> {
    if !options.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let term = Term::stdout();
    let mut state = UiState::new(options);
    let mut next = events::proceed(&mut state).await?;

    loop {
        match next {
            Next::Send(intent) => {
                tracing::debug!("[UI] Sending {:?}", intent);
                if ui_to_app_tx.send(intent).await.is_err() {
                    tracing::warn!("[UI] App loop closed");
                    break;
                }
            }
            Next::Finish => break,
            Next::Wait => {}
        }

        let Ok(event) = app_to_ui_rx.recv().await else {
            tracing::warn!("[UI] Event channel closed");
            break;
        };

        if let Some(text) = events::render(&event, &mut state) {
            state.print(&term, &text)?;
        }
        next = events::next_intent(&event, &mut state).await?;
    }

    state.finish_progress();
    let _ = ui_to_app_tx.send(UiEvent::Quit).await;

    let outcome = state.outcome();
    tracing::debug!("[UI] Session finished: {:?}", outcome);
    Ok(outcome)
}
