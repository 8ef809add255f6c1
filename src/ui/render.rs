use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::pages::render_page;
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let (nav, content, footer) = layout_regions(frame.area());
    let route = app.route();

    frame.render_widget(Header::new(route).widget(), nav);

    let state = app.store().state();
    render_page(frame, content, route, &state);

    let location = app.location().to_string();
    frame.render_widget(Footer::new(&location).widget(footer), footer);
}
