use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::draft::TaskDraft;

/// A persisted shell command together with its execution history.
///
/// `executions` belongs to the backend: it is append-only and kept in
/// chronological order. The client only ever replaces it by re-fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub command: String,
    #[serde(
        default,
        rename = "taskExecutions",
        deserialize_with = "null_as_default"
    )]
    pub executions: Vec<TaskExecution>,
}

impl Task {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_command(&self) -> bool {
        !self.command.trim().is_empty()
    }

    /// Execution needs both a server-assigned id and something to run.
    pub fn can_execute(&self) -> bool {
        self.is_persisted() && self.has_command()
    }

    pub fn execution_count(&self) -> usize {
        self.executions.len()
    }

    pub fn last_execution(&self) -> Option<&TaskExecution> {
        self.executions.last()
    }

    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            name: self.name.clone(),
            owner: self.owner.clone(),
            command: self.command.clone(),
        }
    }
}

/// One historical run of a task's command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskExecution {
    #[serde(with = "crate::timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub end_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl TaskExecution {
    /// Wall time of the run; a clock skew that puts `end` before `start` reads as zero.
    pub fn duration(&self) -> Duration {
        let elapsed = self.end_time - self.start_time;
        if elapsed < Duration::zero() {
            Duration::zero()
        } else {
            elapsed
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration().num_milliseconds()
    }

    pub fn formatted_duration(&self) -> String {
        format_duration_ms(self.duration_ms())
    }

    pub fn has_output(&self) -> bool {
        !self.output.trim().is_empty()
    }

    pub fn status(&self) -> ExecutionStatus {
        match self.exit_code {
            Some(0) => ExecutionStatus::Succeeded,
            Some(code) => ExecutionStatus::Failed(code),
            None => ExecutionStatus::Completed,
        }
    }
}

/// Outcome of an execution as far as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Succeeded,
    Failed(i32),
    /// The backend did not report an exit code.
    Completed,
}

impl ExecutionStatus {
    pub fn label(&self) -> String {
        match self {
            ExecutionStatus::Succeeded => "SUCCESS".to_string(),
            ExecutionStatus::Failed(code) => format!("FAILED (exit {code})"),
            ExecutionStatus::Completed => "COMPLETED".to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionStatus::Failed(_))
    }
}

/// Milliseconds under one second, seconds with two decimals otherwise.
pub fn format_duration_ms(ms: i64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.2}s", ms as f64 / 1000.0)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
