pub mod core;
pub mod draft;
pub mod errors;
pub mod timestamp;

pub use crate::core::{ExecutionStatus, Task, TaskExecution};
pub use crate::draft::{TaskDraft, TaskSubmission};
pub use crate::errors::{Field, FieldError, SendableError, ValidationError};
