use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};
use taskdeck_models::TaskExecution;

use crate::{
    notify::{NoticeBar, Notification},
    task_list::{Outcome, TaskList},
    worker::{Msg, Request},
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Loading,
    Connected,
    Disconnected,
}

/// Top-level application state: connection gate, notifications and the task
/// list it hosts once the API is reachable.
#[derive(Debug)]
pub struct Shell {
    api_url: String,
    status: ApiStatus,
    task_list: TaskList,
    last_execution: Option<TaskExecution>,
    notices: NoticeBar,
    spinner_idx: usize,
    clipboard: Option<String>,
    should_quit: bool,
}

impl Shell {
    pub fn new(api_url: impl Into<String>, page_size: usize) -> Self {
        Self {
            api_url: api_url.into(),
            status: ApiStatus::Loading,
            task_list: TaskList::new(page_size),
            last_execution: None,
            notices: NoticeBar::default(),
            spinner_idx: 0,
            clipboard: None,
            should_quit: false,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn status(&self) -> ApiStatus {
        self.status
    }

    pub fn task_list(&self) -> &TaskList {
        &self.task_list
    }

    pub fn last_execution(&self) -> Option<&TaskExecution> {
        self.last_execution.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notices.current()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Clipboard payload waiting to be written to the terminal.
    pub fn take_clipboard(&mut self) -> Option<String> {
        self.clipboard.take()
    }

    pub fn start(&mut self) -> Vec<Request> {
        self.check_connection()
    }

    pub fn check_connection(&mut self) -> Vec<Request> {
        info!("Checking API connection at {}", self.api_url);
        self.status = ApiStatus::Loading;
        vec![Request::Health]
    }

    pub fn tick(&mut self, now: Instant) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
        self.notices.expire(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Request> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }
        match self.status {
            ApiStatus::Loading => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
                Vec::new()
            }
            ApiStatus::Disconnected => match key.code {
                KeyCode::Char('r') | KeyCode::Char('t') => self.check_connection(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                    Vec::new()
                }
                _ => Vec::new(),
            },
            ApiStatus::Connected => {
                if !self.task_list.captures_input() && key.code == KeyCode::Char('t') {
                    return self.check_connection();
                }
                let outcome = self.task_list.handle_key(key);
                self.absorb(outcome, now)
            }
        }
    }

    pub fn apply(&mut self, msg: Msg, now: Instant) -> Vec<Request> {
        match msg {
            Msg::Health(Ok(_)) => {
                self.status = ApiStatus::Connected;
                self.notices
                    .push(Notification::success("Connected to Task Management API"), now);
                let outcome = self.task_list.mount();
                self.absorb(outcome, now)
            }
            Msg::Health(Err(err)) => {
                warn!("{err}");
                self.status = ApiStatus::Disconnected;
                self.notices.push(
                    Notification::error(
                        "Cannot connect to API server. Please ensure the backend is running.",
                    ),
                    now,
                );
                Vec::new()
            }
            other => {
                let outcome = self.task_list.apply(other);
                self.absorb(outcome, now)
            }
        }
    }

    fn absorb(&mut self, outcome: Outcome, now: Instant) -> Vec<Request> {
        for notification in outcome.notifications {
            self.notices.push(notification, now);
        }
        if let Some(run) = outcome.executed.as_ref().and_then(|task| task.last_execution()) {
            self.last_execution = Some(run.clone());
        }
        if outcome.clipboard.is_some() {
            self.clipboard = outcome.clipboard;
        }
        if outcome.quit {
            self.should_quit = true;
        }
        outcome.requests
    }
}
