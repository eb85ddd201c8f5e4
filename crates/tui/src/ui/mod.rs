pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::FormMode;

use crate::app::{AppState, Focus};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::transactions::render(frame, layout[1], state, &theme);
    render_bottom_bar(frame, layout[2], state, &theme);

    components::confirm::render(frame, area, state.pending_delete.as_ref(), &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cache = state.controller.cache();
    let refresh = cache
        .last_refresh()
        .map(|dt| {
            dt.with_timezone(&state.controller.codec().timezone())
                .format("%H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());
    let mode = match state.controller.form().mode() {
        FormMode::Create => "Add".to_string(),
        FormMode::Edit(id) => format!("Edit #{id}"),
    };

    let line = Line::from(vec![
        Span::styled("Server", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Transactions", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", cache.transactions().len())),
        Span::styled("Mode", Style::default().fg(theme.dim)),
        Span::raw(format!(": {mode}  ")),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints: &[(&str, &str)] = if state.pending_delete.is_some() {
        &[("y", "delete"), ("n/Esc", "keep")]
    } else {
        match state.focus {
            Focus::Table => &[
                ("↑↓", "select"),
                ("n", "new"),
                ("e/Enter", "edit"),
                ("d", "delete"),
                ("r", "refresh"),
                ("Tab", "form"),
                ("q", "quit"),
            ],
            Focus::Field(engine::FormField::Member | engine::FormField::Game) => &[
                ("↑↓", "choose"),
                ("Tab", "next"),
                ("Enter", "save"),
                ("Esc", "cancel"),
            ],
            Focus::Field(_) => &[("Tab", "next"), ("Enter", "save"), ("Esc", "cancel")],
        }
    };

    let mut parts = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        parts.push(Span::styled(*key, Style::default().fg(theme.accent)));
        parts.push(Span::raw(format!(" {action}")));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
