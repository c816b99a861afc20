use std::{sync::mpsc, thread};

use log::debug;
use taskdeck_api::{ClientResult, HealthStatus, TaskService};
use taskdeck_models::{Task, TaskSubmission};

/// Work the UI asks the background to perform against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Health,
    /// Full listing; `seq` orders it against other listings.
    List { seq: u64 },
    Search { seq: u64, term: String },
    /// `form` identifies the form that submitted, so a late result cannot
    /// close a form opened after it.
    Save { form: u64, submission: TaskSubmission },
    Delete { id: String },
    Execute { id: String },
}

/// Results flowing back from background workers to the UI.
#[derive(Debug)]
pub enum Msg {
    Health(ClientResult<HealthStatus>),
    Listed {
        seq: u64,
        term: Option<String>,
        result: ClientResult<Vec<Task>>,
    },
    Saved {
        form: u64,
        update: bool,
        result: ClientResult<Task>,
    },
    Deleted {
        id: String,
        result: ClientResult<()>,
    },
    Executed {
        id: String,
        result: ClientResult<Task>,
    },
}

/// Runs `request` on its own thread and posts the result to `tx`.
pub fn spawn_request<S>(tx: mpsc::Sender<Msg>, api: S, request: Request)
where
    S: TaskService,
{
    thread::spawn(move || {
        let msg = run_request(&api, request);
        let _ = tx.send(msg);
    });
}

pub fn run_request<S>(api: &S, request: Request) -> Msg
where
    S: TaskService,
{
    debug!("Running {request:?}");
    match request {
        Request::Health => Msg::Health(api.health_check()),
        Request::List { seq } => Msg::Listed {
            seq,
            term: None,
            result: api.list_all(),
        },
        Request::Search { seq, term } => {
            let result = api.search_by_name(&term);
            Msg::Listed {
                seq,
                term: Some(term),
                result,
            }
        }
        Request::Save { form, submission } => Msg::Saved {
            form,
            update: submission.is_update(),
            result: api.upsert(&submission),
        },
        Request::Delete { id } => {
            let result = api.remove(&id);
            Msg::Deleted { id, result }
        }
        Request::Execute { id } => {
            let result = api.execute(&id);
            Msg::Executed { id, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeService;
    use std::time::Duration;

    #[test]
    fn search_result_carries_its_term() {
        let api = FakeService::with_tasks(vec![FakeService::task("1", "build app", "make")]);
        let msg = run_request(
            &api,
            Request::Search {
                seq: 4,
                term: "build".into(),
            },
        );
        match msg {
            Msg::Listed { seq, term, result } => {
                assert_eq!(seq, 4);
                assert_eq!(term.as_deref(), Some("build"));
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn spawned_requests_report_back() {
        let api = FakeService::with_tasks(Vec::new());
        let (tx, rx) = mpsc::channel();
        spawn_request(tx, api.clone(), Request::Health);
        let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(msg, Msg::Health(Ok(HealthStatus::Up))));
        assert_eq!(api.calls().health, 1);
    }
}
