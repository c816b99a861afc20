use serde::Serialize;
use taskdeck_models::TaskSubmission;

/// Body of `PUT /api/tasks`. Executions are never sent; the backend owns them.
#[derive(Debug, Serialize)]
pub(crate) struct TaskPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub name: &'a str,
    pub owner: &'a str,
    pub command: &'a str,
}

impl<'a> From<&'a TaskSubmission> for TaskPayload<'a> {
    fn from(submission: &'a TaskSubmission) -> Self {
        let draft = submission.draft();
        Self {
            id: submission.id(),
            name: &draft.name,
            owner: &draft.owner,
            command: &draft.command,
        }
    }
}

/// Liveness as observed through the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_models::TaskDraft;

    #[test]
    fn create_payload_omits_id() {
        let submission = TaskSubmission::Create(TaskDraft::new("build", "ci", "make"));
        let json = serde_json::to_value(TaskPayload::from(&submission)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "build", "owner": "ci", "command": "make"})
        );
    }

    #[test]
    fn update_payload_carries_id() {
        let submission = TaskSubmission::Update {
            id: "abc".into(),
            draft: TaskDraft::new("build", "ci", "make"),
        };
        let json = serde_json::to_value(TaskPayload::from(&submission)).unwrap();
        assert_eq!(json["id"], "abc");
        assert!(json.get("taskExecutions").is_none());
    }
}
