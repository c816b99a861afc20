use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use taskdeck_api::{API_URL_ENV, DEFAULT_API_URL};
use taskdeck_models::TaskDraft;

#[derive(Debug, Parser)]
#[command(name = "taskctl", about = "Scriptable client for the task management API")]
pub struct Cli {
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Print list and search results as JSON instead of a table.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Args)]
pub struct TaskFields {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub owner: String,

    #[arg(long)]
    pub command: String,
}

impl From<TaskFields> for TaskDraft {
    fn from(fields: TaskFields) -> Self {
        TaskDraft::new(fields.name, fields.owner, fields.command)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every task.
    List,
    /// Show one task and its executions as JSON.
    Get { id: String },
    /// Find tasks whose name contains the term.
    Search { name: String },
    /// Create a new task.
    Create {
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Replace the editable fields of an existing task.
    Update {
        id: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    Delete { id: String },
    /// Run the task's command on the backend and show the result.
    Execute { id: String },
    /// Check that the API is reachable.
    Health,
}
