use crate::{
    core::Task,
    errors::{Field, FieldError, ValidationError},
};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const OWNER_MIN_CHARS: usize = 2;
pub const OWNER_MAX_CHARS: usize = 50;
pub const COMMAND_MAX_CHARS: usize = 200;

/// User-editable part of a task, not yet confirmed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub owner: String,
    pub command: String,
}

impl TaskDraft {
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            command: command.into(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Owner => &self.owner,
            Field::Command => &self.command,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Owner => &mut self.owner,
            Field::Command => &mut self.command,
        }
    }

    /// Checks one field, returning the first rule it breaks.
    pub fn check(&self, field: Field) -> Option<FieldError> {
        let value = self.value(field);
        let chars = value.chars().count();
        let blank = value.trim().is_empty();
        let message = match field {
            Field::Name if blank => "Please enter task name".to_string(),
            Field::Name if chars < NAME_MIN_CHARS => {
                format!("Name must be at least {NAME_MIN_CHARS} characters")
            }
            Field::Name if chars > NAME_MAX_CHARS => {
                format!("Name must not exceed {NAME_MAX_CHARS} characters")
            }
            Field::Owner if blank => "Please enter assignee name".to_string(),
            Field::Owner if chars < OWNER_MIN_CHARS => {
                format!("Assignee name must be at least {OWNER_MIN_CHARS} characters")
            }
            Field::Owner if chars > OWNER_MAX_CHARS => {
                format!("Assignee name must not exceed {OWNER_MAX_CHARS} characters")
            }
            Field::Command if blank => "Please enter command to execute".to_string(),
            Field::Command if chars > COMMAND_MAX_CHARS => {
                format!("Command must not exceed {COMMAND_MAX_CHARS} characters")
            }
            _ => return None,
        };
        Some(FieldError::new(field, message))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let errors: Vec<FieldError> = Field::ALL
            .iter()
            .filter_map(|field| self.check(*field))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }
}

/// What a completed form asks the backend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSubmission {
    Create(TaskDraft),
    Update { id: String, draft: TaskDraft },
}

impl TaskSubmission {
    /// Updates when the original task was persisted, creates otherwise.
    pub fn for_original(original: Option<&Task>, draft: TaskDraft) -> Self {
        match original.and_then(|task| task.id.clone()) {
            Some(id) => TaskSubmission::Update { id, draft },
            None => TaskSubmission::Create(draft),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            TaskSubmission::Create(_) => None,
            TaskSubmission::Update { id, .. } => Some(id),
        }
    }

    pub fn draft(&self) -> &TaskDraft {
        match self {
            TaskSubmission::Create(draft) => draft,
            TaskSubmission::Update { draft, .. } => draft,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, TaskSubmission::Update { .. })
    }
}
