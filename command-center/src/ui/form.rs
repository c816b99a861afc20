use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use taskdeck_models::Field;

use super::dialog::centered_rect;
use crate::form::{input_limit, TaskForm};

fn field_help(field: Field) -> Option<&'static str> {
    match field {
        Field::Name => None,
        Field::Owner => Some("Person or team responsible for this task"),
        Field::Command => Some("Shell command run by the backend, e.g. echo 'Hello World'"),
    }
}

pub fn draw(frame: &mut Frame, form: &TaskForm) {
    let area = centered_rect(70, 70, frame.size());
    let muted = Style::default().fg(Color::DarkGray);

    let mut text = Text::default();
    for field in Field::ALL {
        let focused = field == form.focus();
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let value = form.draft().value(field);
        text.extend(Text::from(Line::from(vec![
            Span::styled(format!("{}:", field.label()), label_style),
            Span::styled(
                format!("  ({}/{})", value.chars().count(), input_limit(field)),
                muted,
            ),
        ])));

        let cursor = if focused { "▏" } else { "" };
        text.extend(Text::from(Line::from(format!("  {value}{cursor}"))));

        if let Some(message) = form.error_for(field) {
            text.extend(Text::from(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::Red),
            ))));
        } else if let Some(help) = field_help(field).filter(|_| focused) {
            text.extend(Text::from(Line::from(Span::styled(
                format!("  {help}"),
                muted,
            ))));
        }
        text.extend(Text::from(Line::from("")));
    }

    if form.is_saving() {
        text.extend(Text::from(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(Color::Yellow),
        ))));
    }
    text.extend(Text::from(Line::from(format!(
        "Enter/Ctrl+S: {}   Ctrl+R: Reset   Esc: Cancel   Tab/Shift+Tab: Move",
        form.submit_label()
    ))));

    let block = Block::default().title(form.title()).borders(Borders::ALL);
    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(Clear, area);
    frame.render_widget(para, area);
}
