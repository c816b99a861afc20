use std::fmt::Write;

use taskdeck_models::Task;
use taskdeck_utilities::format::{local_datetime, truncate_cell};

pub fn task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let headers = ["id", "name", "owner", "command", "runs", "last run"];
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|task| {
            vec![
                task.id.clone().unwrap_or_else(|| "-".to_string()),
                task.name.clone(),
                task.owner.clone(),
                if task.has_command() {
                    truncate_cell(&task.command, 40)
                } else {
                    "-".to_string()
                },
                task.execution_count().to_string(),
                task.last_execution()
                    .map(|execution| local_datetime(&execution.start_time))
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    render_table(&headers, &rows)
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|v| v.chars().count()).collect();
    for row in rows {
        for (idx, value) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(value.chars().count());
        }
    }

    let mut out = String::new();
    border(&mut out, '╔', '╦', '╗', &widths);
    let header_row: Vec<String> = headers.iter().map(|v| (*v).to_string()).collect();
    row_line(&mut out, &header_row, &widths);
    border(&mut out, '╠', '╬', '╣', &widths);
    for row in rows {
        row_line(&mut out, row, &widths);
    }
    border(&mut out, '╚', '╩', '╝', &widths);
    out
}

fn border(out: &mut String, left: char, middle: char, right: char, widths: &[usize]) {
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"═".repeat(*width + 2));
        out.push(if idx + 1 == widths.len() { right } else { middle });
    }
    out.push('\n');
}

fn row_line(out: &mut String, values: &[String], widths: &[usize]) {
    out.push('║');
    for (idx, value) in values.iter().enumerate() {
        let padding = widths[idx].saturating_sub(value.chars().count());
        let _ = write!(out, " {}{} ║", value, " ".repeat(padding));
    }
    out.push('\n');
}
