use crate::store::vendor::{FetchStatus, Vendor, VendorState};
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, BODY_BACKGROUND, BRAND, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT,
    STATUS_ERROR, STATUS_OK, STATUS_WARN,
};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use ratatui::Frame;

const PLACEHOLDER: &str = "—";

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &VendorState) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Vendor List ({}) ", state.vendors.len()),
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(status_line(state))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
        .style(Style::default().bg(BODY_BACKGROUND));

    if state.vendors.is_empty() {
        let message = match state.status {
            FetchStatus::Idle | FetchStatus::Loading => "Loading vendors...",
            FetchStatus::Loaded => "No vendors found.",
            FetchStatus::Failed => "Could not load vendors.",
        };
        let widget = Paragraph::new(Line::styled(
            message,
            Style::default().fg(HEADER_SEPARATOR),
        ))
        .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let header = Row::new(["ID", "Name", "Email", "Phone", "Address", "Status"]).style(
        Style::default()
            .fg(HEADER_TEXT)
            .add_modifier(Modifier::BOLD),
    );
    let rows = state.vendors.iter().map(vendor_row);
    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(18),
        Constraint::Percentage(20),
        Constraint::Length(14),
        Constraint::Percentage(24),
        Constraint::Min(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT).fg(BRAND))
        .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn vendor_row(vendor: &Vendor) -> Row<'static> {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
    Row::new(vec![
        vendor.id.to_string(),
        vendor.name.clone(),
        text(&vendor.email),
        text(&vendor.phone),
        text(&vendor.address),
        text(&vendor.status),
    ])
    .style(Style::default().fg(HEADER_TEXT))
}

fn status_line(state: &VendorState) -> Line<'static> {
    match state.status {
        FetchStatus::Idle => Line::from(""),
        FetchStatus::Loading => Line::styled(" loading… ", Style::default().fg(STATUS_WARN)),
        FetchStatus::Loaded => Line::styled(" up to date ", Style::default().fg(STATUS_OK)),
        FetchStatus::Failed => Line::styled(
            format!(" {} ", state.error.as_deref().unwrap_or("request failed")),
            Style::default().fg(STATUS_ERROR),
        ),
    }
}
