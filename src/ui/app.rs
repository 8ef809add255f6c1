use crate::api::CancelHandle;
use crate::store::vendor::VendorAction;
use crate::store::Store;
use crate::ui::router::{Location, Route};
use tokio::sync::mpsc;

/// Reason given to vendor requests still running when the page is left.
pub const PAGE_CLOSED_REASON: &str = "Vendor page closed";

/// Work the UI thread hands to the async worker.
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// Load the vendor list; `cancel` is the token of the page mount.
    FetchVendors { cancel: CancelHandle },
    CancelVendorRequests,
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

pub struct App {
    should_quit: bool,
    location: Location,
    store: Store,
    commands: Option<UiCommandSender>,
    vendors_mount: Option<CancelHandle>,
}

impl App {
    pub fn new(store: Store) -> Self {
        Self {
            should_quit: false,
            location: Location::default(),
            store,
            commands: None,
            vendors_mount: None,
        }
    }

    pub fn attach_commands(&mut self, sender: UiCommandSender) {
        self.commands = Some(sender);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn route(&self) -> Option<Route> {
        self.location.route()
    }

    /// Move to `target`, unmounting the page being left and mounting the new one.
    ///
    /// Changing only the query string keeps the current page mounted.
    pub fn navigate(&mut self, target: &str) {
        let next = Location::parse(target);
        if next == self.location {
            return;
        }

        let previous = self.location.route();
        tracing::debug!(from = %self.location, to = %next, "Navigating");
        self.location = next;
        let current = self.location.route();
        if previous == current {
            return;
        }

        if previous == Some(Route::Vendors) {
            self.unmount_vendors();
        }
        if current == Some(Route::Vendors) {
            self.mount_vendors();
        }
    }

    pub fn reload_vendors(&mut self) {
        if self.route() == Some(Route::Vendors) {
            self.mount_vendors();
        }
    }

    pub fn select_next(&mut self) {
        if self.route() == Some(Route::Vendors) {
            self.store.dispatch(VendorAction::SelectNext);
        }
    }

    pub fn select_previous(&mut self) {
        if self.route() == Some(Route::Vendors) {
            self.store.dispatch(VendorAction::SelectPrevious);
        }
    }

    fn mount_vendors(&mut self) {
        let cancel = self
            .vendors_mount
            .get_or_insert_with(CancelHandle::new)
            .clone();
        self.store.dispatch(VendorAction::FetchStarted);
        self.send_command(UiCommand::FetchVendors { cancel });
    }

    /// Cancelling the mount token here, on the UI thread, stops fetches the
    /// worker has not started yet as well as those already in flight.
    fn unmount_vendors(&mut self) {
        if let Some(mount) = self.vendors_mount.take() {
            mount.cancel(PAGE_CLOSED_REASON);
        }
        self.send_command(UiCommand::CancelVendorRequests);
        self.store.dispatch(VendorAction::Reset);
    }

    fn send_command(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.commands else {
            return false;
        };

        match sender.try_send(command) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(command)) => {
                tracing::warn!(?command, "UI command queue is full, dropping command");
                false
            }
            Err(mpsc::error::TrySendError::Closed(command)) => {
                tracing::warn!(?command, "UI worker has stopped, dropping command");
                self.commands = None;
                false
            }
        }
    }
}
