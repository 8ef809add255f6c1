use crate::ui::router::Route;
use crate::ui::theme::{ACTIVE_HIGHLIGHT, BRAND, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Top navigation bar with one link per route.
pub struct Header {
    active: Option<Route>,
}

impl Header {
    pub fn new(active: Option<Route>) -> Self {
        Self { active }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let active_style = Style::default()
            .fg(BRAND)
            .bg(ACTIVE_HIGHLIGHT)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled("Vendor Portal", Style::default().fg(BRAND).add_modifier(Modifier::BOLD)),
        ];
        for (idx, route) in Route::ALL.into_iter().enumerate() {
            spans.push(Span::styled("  │  ", separator_style));
            let style = if self.active == Some(route) {
                active_style
            } else {
                text_style
            };
            spans.push(Span::styled(format!("[{}] {}", idx + 1, route.title()), style));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
