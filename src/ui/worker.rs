//! Async side of the UI: turns [`UiCommand`]s into API calls and store updates.

use crate::api::{ApiClient, CancelHandle, RequestOptions};
use crate::store::vendor::{VendorAction, VendorList};
use crate::store::Store;
use crate::ui::app::{UiCommand, UiCommandSender};
use regex::Regex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

const COMMAND_QUEUE: usize = 32;

/// Spawn the command worker on `handle` and return its sender.
///
/// Fetches run as separate tasks so a cancel command is never queued behind
/// the request it should cancel.
pub fn spawn_worker(
    handle: &Handle,
    client: ApiClient,
    store: Store,
    vendors_path: String,
) -> Result<UiCommandSender, regex::Error> {
    let vendors_pattern = Regex::new(&regex::escape(&vendors_path))?;
    let (tx, mut rx) = mpsc::channel(COMMAND_QUEUE);
    let task_handle = handle.clone();

    handle.spawn(async move {
        while let Some(command) = rx.recv().await {
            match command {
                UiCommand::FetchVendors { cancel } => {
                    let client = client.clone();
                    let store = store.clone();
                    let path = vendors_path.clone();
                    task_handle.spawn(async move {
                        fetch_vendors(&client, &store, &path, &cancel).await;
                    });
                }
                UiCommand::CancelVendorRequests => {
                    client.cancel_requests_by_pattern(&vendors_pattern, None);
                }
            }
        }
        tracing::debug!("UI command channel closed, worker exiting");
    });

    Ok(tx)
}

/// Load the vendor list into the store.
///
/// A cancelled fetch leaves the store alone: the request that replaced it (or
/// the page reset that cancelled it) owns the state now. That includes a
/// response that arrived just before `cancel` fired.
pub async fn fetch_vendors(
    client: &ApiClient,
    store: &Store,
    path: &str,
    cancel: &CancelHandle,
) {
    let options = RequestOptions::default().cancel_with(cancel.clone());
    match client.get_json::<VendorList>(path, None, options).await {
        Ok(_) if cancel.is_cancelled() => {
            tracing::debug!("Vendor page closed before the list was applied");
        }
        Ok(list) => {
            let vendors = list.into_vendors();
            tracing::debug!(count = vendors.len(), "Vendors loaded");
            store.dispatch(VendorAction::FetchSucceeded { vendors });
        }
        Err(err) if err.is_cancelled() || cancel.is_cancelled() => {
            tracing::debug!(reason = %err, "Vendor fetch cancelled");
        }
        Err(err) => {
            tracing::warn!(error = %err, "Vendor fetch failed");
            let message = err.detail().map(str::to_string).unwrap_or_else(|| err.to_string());
            store.dispatch(VendorAction::FetchFailed { message });
        }
    }
}
