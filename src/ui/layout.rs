use ratatui::layout::Rect;

const NAV_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

/// Split the screen into navigation bar, content slot and footer.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let nav_height = area.height.min(NAV_HEIGHT);
    let footer_height = FOOTER_HEIGHT.min(area.height.saturating_sub(nav_height));
    let nav = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: nav_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let content = Rect {
        x: area.x,
        y: area.y + nav_height,
        width: area.width,
        height: area.height.saturating_sub(nav_height + footer_height),
    };
    (nav, content, footer)
}
