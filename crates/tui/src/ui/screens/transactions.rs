use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

use engine::{
    FormField,
    lookup::{self, Named},
    view::{self, NO_DATA},
};

use crate::{
    app::{AppState, Focus},
    ui::theme::Theme,
};

const FORM_WIDTH: u16 = 44;
const HEADER: [&str; 6] = ["ID", "Member", "Game", "Play Hrs", "Cost", "Date"];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(0)])
        .split(area);

    render_form(frame, layout[0], state, theme);
    render_table(frame, layout[1], state, theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let form = state.controller.form();
    let cache = state.controller.cache();
    let action = if form.is_editing() {
        "Update Transaction"
    } else {
        "Add Transaction"
    };

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = state.focus == Focus::Field(field);
        let value = form.field(field);
        let shown = match field {
            FormField::Member => select_label(cache.members(), value, "Select member"),
            FormField::Game => select_label(cache.games(), value, "Select game"),
            FormField::TransactionDate if value.is_empty() => {
                "YYYY-MM-DDTHH:MM (UTC)".to_string()
            }
            _ => value.to_string(),
        };
        let value_style = if value.is_empty() {
            Style::default().fg(theme.dim)
        } else {
            Style::default().fg(theme.text)
        };
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };

        lines.push(Line::from(Span::styled(format!("{}:", field.label()), label_style)));
        let mut value_line = vec![Span::styled(shown, value_style)];
        if focused {
            value_line.push(Span::styled("▏", Style::default().fg(theme.accent)));
        }
        lines.push(Line::from(value_line));
        lines.push(Line::from(""));
    }

    let mut footer = vec![
        Span::styled("Enter", Style::default().fg(theme.positive)),
        Span::raw(format!(" {action}")),
    ];
    if form.is_editing() {
        footer.push(Span::raw("   "));
        footer.push(Span::styled("Esc", Style::default().fg(theme.error)));
        footer.push(Span::raw(" Cancel"));
    }
    lines.push(Line::from(footer));

    let focused = matches!(state.focus, Focus::Field(_));
    let block = Block::default()
        .title(format!(" {action} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { theme.accent } else { theme.border }));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Member/game select text: the option label when the id is known.
fn select_label<T: Named>(items: &[T], value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return placeholder.to_string();
    }
    trimmed
        .parse::<i64>()
        .ok()
        .and_then(|id| items.iter().find(|item| item.id() == id))
        .map(lookup::option_label)
        .unwrap_or_else(|| trimmed.to_string())
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Table;
    let block = Block::default()
        .title(" Transactions ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { theme.accent } else { theme.border }));

    if state.is_loading() {
        frame.render_widget(
            Paragraph::new("Loading...")
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let rows = view::rows(state.controller.cache(), state.controller.codec())
        .into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            view::Row::Empty => Row::new(vec![Cell::from(NO_DATA)])
                .style(Style::default().fg(theme.dim)),
            view::Row::Transaction(tx) => {
                let style = if index % 2 == 0 {
                    Style::default().bg(theme.stripe)
                } else {
                    Style::default()
                };
                Row::new(tx.cells().map(Cell::from)).style(style)
            }
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(17),
    ];
    let header = Row::new(HEADER).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let mut table_state = TableState::default();
    if !state.controller.cache().transactions().is_empty() {
        table_state.select(Some(state.selected));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(table, area, &mut table_state);
}
