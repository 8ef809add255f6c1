//! Page views rendered into the shell's content slot.

pub mod home;
pub mod vendors;

use crate::store::RootState;
use crate::ui::router::Route;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Render the page for `route`; unrouted locations leave the slot empty.
pub fn render_page(frame: &mut Frame<'_>, area: Rect, route: Option<Route>, state: &RootState) {
    match route {
        Some(Route::Home) => home::render(frame, area),
        Some(Route::Vendors) => vendors::render(frame, area, &state.vendor),
        None => {}
    }
}
