use crate::ui::theme::{BODY_BACKGROUND, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

pub fn render(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::styled("Home", Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::styled(
            "Press 2 to open the vendor list.",
            Style::default().fg(HEADER_SEPARATOR),
        ),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().style(Style::default().bg(BODY_BACKGROUND)));
    frame.render_widget(widget, area);
}
