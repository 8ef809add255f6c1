use crate::api::{ApiClient, SessionEvent};
use crate::config::Config;
use crate::store::Store;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::spawn_worker;
use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use tokio::runtime::Handle;

/// Run the portal until the user quits. `initial` is the first location.
pub fn run(config: &Config, client: ApiClient, initial: &str, handle: &Handle) -> io::Result<()> {
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    let store = Store::new();
    let events = EventHandler::new(tick_rate);

    let store_tx = events.sender();
    store.subscribe(move |_| {
        let _ = store_tx.send(AppEvent::StoreChanged);
    });

    let session_tx = events.sender();
    client.session_events().subscribe(move |event| match event {
        SessionEvent::Expired { reason, redirect } => {
            tracing::info!(?reason, redirect = %redirect, "Session expired, redirecting");
            let _ = session_tx.send(AppEvent::Navigate(redirect.clone()));
        }
    });

    let commands = spawn_worker(
        handle,
        client.clone(),
        store.clone(),
        config.api.vendors_path.clone(),
    )
    .map_err(io::Error::other)?;

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(store);
    app.attach_commands(commands);
    app.navigate(initial);
    tracing::info!(location = %app.location(), base_url = %client.base_url(), "Portal started");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Input(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Navigate(target)) => app.navigate(&target),
            Ok(AppEvent::Tick | AppEvent::Resize | AppEvent::StoreChanged) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let cancelled = client.cancel_all_requests(None);
    tracing::info!(cancelled, "Portal stopped");
    drop(guard);
    Ok(())
}
