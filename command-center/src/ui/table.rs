use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use taskdeck_models::Task;

use crate::{
    format::{local_datetime, plural, truncate_cell},
    task_list::TaskList,
};

const COMMAND_CELL_CHARS: usize = 32;

pub fn draw(frame: &mut Frame, area: Rect, list: &TaskList, spinner: &str) {
    let banner_height = if list.search_term().is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_search(frame, chunks[0], list);
    if let Some(term) = list.search_term() {
        let banner = Line::from(vec![
            Span::styled(
                format!("Search results for \"{term}\""),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled("  (c to clear)", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(banner), chunks[1]);
    }
    draw_rows(frame, chunks[2], list, spinner);
    draw_footer(frame, chunks[3], list);
}

fn draw_search(frame: &mut Frame, area: Rect, list: &TaskList) {
    let search = list.search_box();
    let border = if search.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let line = if search.input.is_empty() && !search.editing {
        Line::from(Span::styled(
            "Search tasks by name...",
            Style::default().fg(Color::DarkGray),
        ))
    } else if search.editing {
        Line::from(format!("{}▏", search.input))
    } else {
        Line::from(search.input.as_str())
    };
    let para = Paragraph::new(line).block(
        Block::default()
            .title("Search (/)")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(para, area);
}

fn draw_rows(frame: &mut Frame, area: Rect, list: &TaskList, spinner: &str) {
    let rows = list.rows();
    if rows.is_empty() {
        let message = if list.is_loading() {
            format!("{spinner} Loading tasks...")
        } else if let Some(term) = list.search_term() {
            format!("No tasks match \"{term}\"")
        } else {
            "No tasks found. Press n to create one.".to_string()
        };
        let placeholder = Paragraph::new(Line::from(Span::raw(message)))
            .block(Block::default().title("Tasks").borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, area);
        return;
    }

    let header_cells = ["Name", "Owner", "Command", "Executions", "Actions"]
        .into_iter()
        .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).style(Style::default().fg(Color::Cyan));

    let page = list.page_range();
    let table_rows: Vec<Row> = rows[page.clone()]
        .iter()
        .map(|task| task_row(list, task, spinner))
        .collect();

    let mut table_state = TableState::default();
    table_state.select(Some(list.selected().saturating_sub(page.start)));

    let widths = [
        Constraint::Percentage(22),
        Constraint::Percentage(12),
        Constraint::Percentage(26),
        Constraint::Percentage(22),
        Constraint::Min(18),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(Block::default().title("Tasks").borders(Borders::ALL))
        .column_spacing(1)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("");

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn task_row<'a>(list: &TaskList, task: &'a Task, spinner: &str) -> Row<'a> {
    let muted = Style::default().fg(Color::DarkGray);

    let command = if task.has_command() {
        Cell::from(truncate_cell(&task.command, COMMAND_CELL_CHARS))
    } else {
        Cell::from(Span::styled("No command", muted))
    };

    let executions = match task.last_execution() {
        Some(last) => Cell::from(format!(
            "{} · Last: {}",
            plural(task.execution_count(), "execution"),
            local_datetime(&last.start_time)
        )),
        None => Cell::from(Span::styled("No executions", muted)),
    };

    let enabled = Style::default().fg(Color::Yellow);
    let run = if list.is_executing(task) {
        Span::styled(format!("{spinner}run "), enabled)
    } else if list.can_execute(task) {
        Span::styled("[x]run ", enabled)
    } else {
        Span::styled("[x]run ", muted)
    };
    let history = if task.executions.is_empty() {
        Span::styled("[h]ist ", muted)
    } else {
        Span::styled("[h]ist ", enabled)
    };
    let actions = Line::from(vec![
        Span::styled("[e]dit ", enabled),
        run,
        history,
        Span::styled("[d]el", Style::default().fg(Color::Red)),
    ]);

    let name = if task.has_command() {
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::raw(task.name.as_str()),
        ])
    } else {
        Line::from(vec![Span::raw("  "), Span::raw(task.name.as_str())])
    };

    Row::new(vec![
        Cell::from(name),
        Cell::from(task.owner.as_str()),
        command,
        executions,
        Cell::from(actions),
    ])
}

fn draw_footer(frame: &mut Frame, area: Rect, list: &TaskList) {
    let page = list.page_range();
    let mut spans = vec![Span::raw(if list.total() == 0 {
        "0 tasks".to_string()
    } else {
        format!("{}-{} of {}", page.start + 1, page.end, plural(list.total(), "task"))
    })];
    spans.push(Span::styled(
        format!("   sort: {}", list.sort().label()),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(task) = list.selected_task().filter(|task| task.has_command()) {
        spans.push(Span::styled(
            format!("   $ {}", task.command),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
