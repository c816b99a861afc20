use taskdeck_models::{Task, TaskSubmission};

use crate::{
    blocking_client::BlockingApiClient, error::ClientResult, locator::BlockingServiceLocator,
    payload::HealthStatus,
};

/// Blocking view of the task API, as consumed by front-ends.
pub trait TaskService: Clone + Send + Sync + 'static {
    fn list_all(&self) -> ClientResult<Vec<Task>>;

    fn get_by_id(&self, id: &str) -> ClientResult<Task>;

    fn search_by_name(&self, term: &str) -> ClientResult<Vec<Task>>;

    fn upsert(&self, submission: &TaskSubmission) -> ClientResult<Task>;

    fn remove(&self, id: &str) -> ClientResult<()>;

    fn execute(&self, id: &str) -> ClientResult<Task>;

    fn health_check(&self) -> ClientResult<HealthStatus>;
}

impl<L> TaskService for BlockingApiClient<L>
where
    L: BlockingServiceLocator + 'static,
{
    fn list_all(&self) -> ClientResult<Vec<Task>> {
        BlockingApiClient::list_all(self)
    }

    fn get_by_id(&self, id: &str) -> ClientResult<Task> {
        BlockingApiClient::get_by_id(self, id)
    }

    fn search_by_name(&self, term: &str) -> ClientResult<Vec<Task>> {
        BlockingApiClient::search_by_name(self, term)
    }

    fn upsert(&self, submission: &TaskSubmission) -> ClientResult<Task> {
        BlockingApiClient::upsert(self, submission)
    }

    fn remove(&self, id: &str) -> ClientResult<()> {
        BlockingApiClient::remove(self, id)
    }

    fn execute(&self, id: &str) -> ClientResult<Task> {
        BlockingApiClient::execute(self, id)
    }

    fn health_check(&self) -> ClientResult<HealthStatus> {
        BlockingApiClient::health_check(self)
    }
}
