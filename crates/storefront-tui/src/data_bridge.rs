//! Data bridges: background tasks that turn core state changes into
//! [`Action`]s on the TUI's action channel.

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use storefront_core::{CategoryDataSource, CategoryList, FetchState};

use crate::action::Action;

/// Forward every controller snapshot as [`Action::ProductsChanged`] until
/// cancelled or the controller is dropped.
pub async fn spawn_fetch_bridge(
    mut state: watch::Receiver<FetchState>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let (items, status) = {
                    let snap = state.borrow_and_update();
                    (snap.items().len(), snap.status.to_string())
                };
                debug!(items, status = %status, "dispatching ProductsChanged");
                if action_tx.send(Action::ProductsChanged).is_err() {
                    break;
                }
            }
        }
    }
    debug!("fetch bridge shut down");
}

/// Load the category list once and report the outcome.
pub async fn load_categories<S: CategoryDataSource>(
    source: S,
    action_tx: mpsc::UnboundedSender<Action>,
) {
    let mut list = CategoryList::new(source);
    list.load().await;
    let state = list.into_state();
    debug!(
        categories = state.categories.len(),
        failed = state.error.is_some(),
        "categories loaded"
    );
    let _ = action_tx.send(Action::CategoriesLoaded(state));
}
