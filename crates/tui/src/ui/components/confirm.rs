use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use engine::PendingDelete;

use crate::ui::theme::Theme;

const WIDTH: u16 = 40;
const HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame<'_>, area: Rect, pending: Option<&PendingDelete>, theme: &Theme) {
    let Some(pending) = pending else {
        return;
    };
    let rect = centered(area, WIDTH, HEIGHT);

    let lines = vec![
        Line::from(Span::styled(
            pending.prompt(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error)),
            Span::raw(" delete   "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" keep"),
        ]),
    ];

    let block = Block::default()
        .title(format!(" Transaction #{} ", pending.id()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        rect,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
