use std::fmt;

use thiserror::Error;

pub type SendableError = Box<dyn std::error::Error + Send + Sync>;

/// Editable fields of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Owner,
    Command,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Owner, Field::Command];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Task Name",
            Field::Owner => "Assignee",
            Field::Command => "Command",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Client-side rejection of a draft. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields: {}", summarize(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
