use cvcheck_core::results::ResultsState;
use cvcheck_core::router;
use cvcheck_types::{AppEvent, Route};

use crate::context::WorkflowContext;
use crate::events::ViewState;

use super::load_results::spawn_results_fetch;

pub async fn handle_navigation(
    ctx: &WorkflowContext,
    view: &mut ViewState,
    path: &str,
) -> anyhow::Result<()> {
    let navigation = router::resolve(path);
    if navigation.redirected {
        tracing::info!("Redirected {} to {}", navigation.requested, navigation.route);
    }

    enter_route(ctx, view, navigation.route).await;
    Ok(())
}

/// Mount `route`. Every visit is a fresh mount: the upload view starts
/// empty and the results view refetches.
pub async fn enter_route(ctx: &WorkflowContext, view: &mut ViewState, route: Route) {
    if view.route == Route::Upload || route == Route::Upload {
        view.stop_poller(&ctx.state);
        view.upload.reset();
    }
    view.results = ResultsState::default();
    view.route = route.clone();

    ctx.emit(AppEvent::Navigated(route.clone())).await;

    if let Route::Results { id: Some(id) } = route {
        view.results = ResultsState::mount(id.clone());
        ctx.emit(AppEvent::ResultsLoading(id.clone())).await;
        spawn_results_fetch(ctx, id);
    }
}

/// "Try again": clear the upload view back to its picker
pub async fn handle_reset(ctx: &WorkflowContext, view: &mut ViewState) -> anyhow::Result<()> {
    view.stop_poller(&ctx.state);
    view.upload.reset();

    if view.route == Route::Upload {
        ctx.emit(AppEvent::Navigated(Route::Upload)).await;
    } else {
        tracing::debug!("Upload reset outside the upload view");
    }

    Ok(())
}
