//! In-memory `TaskService` used by the UI tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use taskdeck_api::{ApiError, ClientResult, HealthStatus, TaskClientError, TaskService};
use taskdeck_models::{Task, TaskExecution, TaskSubmission};
use url::Url;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub list: usize,
    pub get: usize,
    pub search: usize,
    pub upsert: usize,
    pub remove: usize,
    pub execute: usize,
    pub health: usize,
}

impl Calls {
    pub fn network_total(&self) -> usize {
        self.list + self.get + self.search + self.upsert + self.remove + self.execute + self.health
    }
}

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    next_id: usize,
    calls: Calls,
    offline: bool,
    fail_execute: bool,
    fail_upsert: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<State>>,
}

impl FakeService {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let service = Self::default();
        service.state.lock().tasks = tasks;
        service
    }

    pub fn task(id: &str, name: &str, command: &str) -> Task {
        Task {
            id: Some(id.to_string()),
            name: name.to_string(),
            owner: "ops".to_string(),
            command: command.to_string(),
            executions: Vec::new(),
        }
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().calls
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    pub fn fail_execute(&self) {
        self.state.lock().fail_execute = true;
    }

    pub fn fail_upsert(&self) {
        self.state.lock().fail_upsert = true;
    }

    fn server_error() -> ApiError {
        ApiError::Server {
            url: Url::parse("http://fake/api/tasks").expect("static url"),
            message: "boom".into(),
        }
    }

    fn not_found() -> ApiError {
        ApiError::NotFound {
            url: Url::parse("http://fake/api/tasks").expect("static url"),
        }
    }
}

impl TaskService for FakeService {
    fn list_all(&self) -> ClientResult<Vec<Task>> {
        let mut state = self.state.lock();
        state.calls.list += 1;
        if state.offline {
            return Err(TaskClientError::Fetch(Self::server_error()));
        }
        Ok(state.tasks.clone())
    }

    fn get_by_id(&self, id: &str) -> ClientResult<Task> {
        let mut state = self.state.lock();
        state.calls.get += 1;
        state
            .tasks
            .iter()
            .find(|task| task.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| TaskClientError::NotFound(Self::not_found()))
    }

    fn search_by_name(&self, term: &str) -> ClientResult<Vec<Task>> {
        let mut state = self.state.lock();
        state.calls.search += 1;
        if state.offline {
            return Err(TaskClientError::Search(Self::server_error()));
        }
        let needle = term.to_lowercase();
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn upsert(&self, submission: &TaskSubmission) -> ClientResult<Task> {
        let mut state = self.state.lock();
        state.calls.upsert += 1;
        if state.fail_upsert {
            return Err(TaskClientError::Save(Self::server_error()));
        }
        let draft = submission.draft().clone();
        match submission {
            TaskSubmission::Update { id, .. } => {
                let task = state
                    .tasks
                    .iter_mut()
                    .find(|task| task.id.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| TaskClientError::Save(Self::not_found()))?;
                task.name = draft.name;
                task.owner = draft.owner;
                task.command = draft.command;
                Ok(task.clone())
            }
            TaskSubmission::Create(_) => {
                state.next_id += 1;
                let task = Task {
                    id: Some(format!("task-{}", state.next_id)),
                    name: draft.name,
                    owner: draft.owner,
                    command: draft.command,
                    executions: Vec::new(),
                };
                state.tasks.push(task.clone());
                Ok(task)
            }
        }
    }

    fn remove(&self, id: &str) -> ClientResult<()> {
        let mut state = self.state.lock();
        state.calls.remove += 1;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id.as_deref() != Some(id));
        if state.tasks.len() == before {
            Err(TaskClientError::Delete(Self::not_found()))
        } else {
            Ok(())
        }
    }

    fn execute(&self, id: &str) -> ClientResult<Task> {
        let mut state = self.state.lock();
        state.calls.execute += 1;
        if state.fail_execute {
            return Err(TaskClientError::Execution(Self::server_error()));
        }
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id.as_deref() == Some(id))
            .ok_or_else(|| TaskClientError::Execution(Self::not_found()))?;
        let start = Utc::now();
        task.executions.push(TaskExecution {
            start_time: start,
            end_time: start + Duration::milliseconds(250),
            output: format!("ran: {}", task.command),
            exit_code: Some(0),
        });
        Ok(task.clone())
    }

    fn health_check(&self) -> ClientResult<HealthStatus> {
        let mut state = self.state.lock();
        state.calls.health += 1;
        if state.offline {
            Err(TaskClientError::HealthCheck(Self::server_error()))
        } else {
            Ok(HealthStatus::Up)
        }
    }
}
