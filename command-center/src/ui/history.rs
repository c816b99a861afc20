use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use taskdeck_models::TaskExecution;

use super::dialog::centered_rect;
use crate::{
    format::{local_datetime, plural},
    history::ExecutionHistoryView,
};

pub fn draw(frame: &mut Frame, view: &ExecutionHistoryView) {
    let area = centered_rect(80, 80, frame.size());
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .title(format!("Execution History: {}", view.task().name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(inner);

    let task = view.task();
    let label = Style::default().fg(Color::DarkGray);
    let command = if task.has_command() {
        Span::raw(task.command.clone())
    } else {
        Span::styled("No command", label)
    };
    let info = Text::from(vec![
        Line::from(vec![Span::styled("Name:    ", label), Span::raw(task.name.clone())]),
        Line::from(vec![Span::styled("Owner:   ", label), Span::raw(task.owner.clone())]),
        Line::from(vec![Span::styled("Command: ", label), command]),
        Line::from(vec![
            Span::styled("Total:   ", label),
            Span::raw(plural(task.execution_count(), "execution")),
        ]),
    ]);
    frame.render_widget(
        Paragraph::new(info).block(
            Block::default()
                .title("Task Information")
                .borders(Borders::BOTTOM),
        ),
        chunks[0],
    );

    if view.is_empty() {
        let empty = Paragraph::new("No executions yet")
            .style(label)
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = view.executions().iter().map(execution_item).collect();
    let mut state = ListState::default();
    state.select(Some(view.selected()));
    let list = List::new(items)
        .block(Block::default().title("Timeline"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn execution_item(execution: &TaskExecution) -> ListItem<'static> {
    let status = execution.status();
    let marker = if status.is_failure() {
        Span::styled("● ", Style::default().fg(Color::Red))
    } else {
        Span::styled("● ", Style::default().fg(Color::Green))
    };
    let mut lines = vec![Line::from(vec![
        marker,
        Span::styled(
            local_datetime(&execution.start_time),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {}  {}",
            execution.formatted_duration(),
            status.label()
        )),
    ])];

    if execution.has_output() {
        lines.extend(
            execution
                .output
                .lines()
                .map(|line| Line::from(format!("    {line}"))),
        );
    } else {
        lines.push(Line::from(Span::styled(
            "    No output",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}
