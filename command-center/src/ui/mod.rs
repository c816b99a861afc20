mod dialog;
mod form;
mod history;
mod table;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    format::local_time,
    notify::Level,
    shell::{ApiStatus, Shell},
    task_list::Overlay,
};

pub fn draw(frame: &mut Frame, shell: &Shell) {
    let summary = match shell.status() {
        ApiStatus::Connected => shell.last_execution(),
        _ => None,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(if summary.is_some() { 3 } else { 0 }),
            Constraint::Min(3),    // list or connection panel
            Constraint::Length(1), // status bar
            Constraint::Length(1), // key hints
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], shell);
    if let Some(execution) = summary {
        draw_summary(frame, chunks[1], execution);
    }

    match shell.status() {
        ApiStatus::Loading => draw_connecting(frame, chunks[2], shell),
        ApiStatus::Disconnected => draw_disconnected(frame, chunks[2], shell),
        ApiStatus::Connected => {
            let list = shell.task_list();
            table::draw(frame, chunks[2], list, shell.spinner());
            match list.overlay() {
                Overlay::None => {}
                Overlay::Form(task_form) => form::draw(frame, task_form),
                Overlay::History(view) => history::draw(frame, view),
                Overlay::ConfirmDelete { name, .. } => dialog::draw_confirm_delete(frame, name),
            }
        }
    }

    draw_status_bar(frame, chunks[3], shell);
    draw_hints(frame, chunks[4], shell);
}

fn draw_header(frame: &mut Frame, area: Rect, shell: &Shell) {
    let (badge, style) = match shell.status() {
        ApiStatus::Loading => (
            format!(" {} Checking connection... ", shell.spinner()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        ApiStatus::Connected => (
            " ● API Connected ".to_string(),
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
        ApiStatus::Disconnected => (
            " ● API Disconnected ".to_string(),
            Style::default().fg(Color::White).bg(Color::Red),
        ),
    };

    let line = Line::from(vec![
        Span::styled(
            "Task Management Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(badge, style),
        Span::raw("  "),
        Span::styled(shell.api_url().to_string(), Style::default().fg(Color::DarkGray)),
    ]);

    let bar = Paragraph::new(line).block(
        Block::default()
            .title("Command Center")
            .borders(Borders::ALL),
    );
    frame.render_widget(bar, area);
}

fn draw_summary(frame: &mut Frame, area: Rect, execution: &taskdeck_models::TaskExecution) {
    let status = execution.status();
    let status_style = if status.is_failure() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    let line = Line::from(vec![
        Span::raw("Status: "),
        Span::styled(status.label(), status_style),
        Span::raw("   Duration: "),
        Span::raw(format!("{}ms", execution.duration_ms())),
        Span::raw("   Started: "),
        Span::raw(local_time(&execution.start_time)),
    ]);
    let para = Paragraph::new(line).block(
        Block::default()
            .title("Last Execution")
            .borders(Borders::ALL),
    );
    frame.render_widget(para, area);
}

fn draw_connecting(frame: &mut Frame, area: Rect, shell: &Shell) {
    let para = Paragraph::new(format!("{} Connecting to API...", shell.spinner()))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}

fn draw_disconnected(frame: &mut Frame, area: Rect, shell: &Shell) {
    let muted = Style::default().fg(Color::DarkGray);
    let text = Text::from(vec![
        Line::from(Span::styled(
            "API Connection Failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Cannot connect to the Task Management API."),
        Line::from(Span::styled(
            format!("Please ensure the backend is running on {}", shell.api_url()),
            muted,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[r] Retry Connection",
            Style::default().fg(Color::Yellow),
        )),
    ]);
    let para = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, shell: &Shell) {
    let (line, style) = if let Some(notification) = shell.notification() {
        let (symbol, color) = match notification.level {
            Level::Info => ("ℹ", Color::Cyan),
            Level::Success => ("✔", Color::Green),
            Level::Warning => ("!", Color::Yellow),
            Level::Error => ("✖", Color::Red),
        };
        (
            format!("{symbol} {}", notification.message),
            Style::default().fg(color),
        )
    } else if shell.status() == ApiStatus::Connected && shell.task_list().is_loading() {
        (
            format!(" {} Loading tasks...", shell.spinner()),
            Style::default().fg(Color::Yellow),
        )
    } else {
        ("Ready.".to_string(), Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(line, style))), area);
}

fn draw_hints(frame: &mut Frame, area: Rect, shell: &Shell) {
    let hints = match shell.status() {
        ApiStatus::Loading => "q: Quit",
        ApiStatus::Disconnected => "r: Retry   q: Quit",
        ApiStatus::Connected => {
            let list = shell.task_list();
            match list.overlay() {
                Overlay::Form(_) => "Tab: Next field   Enter/Ctrl+S: Save   Ctrl+R: Reset   Esc: Cancel",
                Overlay::History(_) => "↑/↓: Select   y: Copy output   Esc: Close",
                Overlay::ConfirmDelete { .. } => "y: Delete   n: Cancel",
                Overlay::None if list.search_box().editing => "Enter: Search   Esc: Stop editing",
                Overlay::None => {
                    "n: New  e: Edit  d: Delete  x: Execute  h: History  /: Search  c: Clear  s: Sort  r: Refresh  t: Test API  q: Quit"
                }
            }
        }
    };
    let para = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(para, area);
}
