use crossterm::event::{KeyCode, KeyEvent};
use taskdeck_models::{Task, TaskExecution};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    None,
    Copy(String),
    Close,
}

/// Read-only view over one task's executions, oldest first.
#[derive(Debug, Clone)]
pub struct ExecutionHistoryView {
    task: Task,
    selected: usize,
}

impl ExecutionHistoryView {
    /// Opens with the most recent execution selected.
    pub fn new(task: Task) -> Self {
        let selected = task.execution_count().saturating_sub(1);
        Self { task, selected }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn executions(&self) -> &[TaskExecution] {
        &self.task.executions
    }

    pub fn is_empty(&self) -> bool {
        self.task.executions.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_execution(&self) -> Option<&TaskExecution> {
        self.task.executions.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> HistoryEvent {
        let last = self.task.execution_count().saturating_sub(1);
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => HistoryEvent::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                HistoryEvent::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(last);
                HistoryEvent::None
            }
            KeyCode::Home => {
                self.selected = 0;
                HistoryEvent::None
            }
            KeyCode::End => {
                self.selected = last;
                HistoryEvent::None
            }
            KeyCode::Char('y') | KeyCode::Char('c') => self
                .selected_execution()
                .map(|execution| HistoryEvent::Copy(execution.output.clone()))
                .unwrap_or(HistoryEvent::None),
            _ => HistoryEvent::None,
        }
    }
}
