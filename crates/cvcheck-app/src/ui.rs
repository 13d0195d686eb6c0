use cvcheck_types::{AppEvent, UiEvent};
use cvcheck_ui::{UiOptions, UiOutcome};
use kanal::{AsyncReceiver, AsyncSender};

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<UiEvent>,
    options: UiOptions,
) -> anyhow::Result<UiOutcome> {
    tracing::debug!(
        interactive = options.interactive,
        queued = options.script.len(),
        "Starting UI"
    );
    cvcheck_ui::ui_loop(app_to_ui_rx, ui_to_app_tx, options).await
}
