use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    Method, Url,
};
use serde::{de::DeserializeOwned, Serialize};
use taskdeck_models::{Task, TaskSubmission};

use crate::{
    error::{ApiError, ClientResult, ErrorKind, Result, TaskClientError},
    locator::BlockingServiceLocator,
    payload::{HealthStatus, TaskPayload},
    routes::Route,
};

/// Blocking API client that wraps `reqwest::blocking::Client`.
#[derive(Clone)]
pub struct BlockingApiClient<L> {
    client: Client,
    locator: L,
}

impl<L> BlockingApiClient<L>
where
    L: BlockingServiceLocator,
{
    /// Construct a client whose requests give up after `timeout`.
    pub fn new(locator: L, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, locator })
    }

    /// Fetch every task, in backend order.
    pub fn list_all(&self) -> ClientResult<Vec<Task>> {
        self.send_json(Method::GET, Route::Tasks)
            .map_err(TaskClientError::Fetch)
    }

    /// Fetch a single task by identifier.
    pub fn get_by_id(&self, id: &str) -> ClientResult<Task> {
        self.send_json(Method::GET, Route::Task(id))
            .map_err(TaskClientError::lookup)
    }

    /// Tasks whose name matches `term`; a 404 from the backend means no matches.
    pub fn search_by_name(&self, term: &str) -> ClientResult<Vec<Task>> {
        match self.send_json(Method::GET, Route::Search(term)) {
            Ok(tasks) => Ok(tasks),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(TaskClientError::Search(err)),
        }
    }

    /// Create or update a task and return the canonical record.
    pub fn upsert(&self, submission: &TaskSubmission) -> ClientResult<Task> {
        let saved: Task = self
            .put_json(Route::Tasks, &TaskPayload::from(submission))
            .map_err(TaskClientError::Save)?;
        info!(
            "{} task '{}' ({})",
            if submission.is_update() { "Updated" } else { "Created" },
            saved.name,
            saved.id.as_deref().unwrap_or("-")
        );
        Ok(saved)
    }

    /// Delete a task by identifier.
    pub fn remove(&self, id: &str) -> ClientResult<()> {
        self.request(Method::DELETE, Route::Task(id))
            .map(|_| info!("Deleted task {id}"))
            .map_err(TaskClientError::Delete)
    }

    /// Run the task's command and return the task with the new execution appended.
    pub fn execute(&self, id: &str) -> ClientResult<Task> {
        let task: Task = self
            .send_json(Method::PUT, Route::Execute(id))
            .map_err(TaskClientError::Execution)?;
        info!(
            "Executed task {id}; {} execution(s) recorded",
            task.execution_count()
        );
        Ok(task)
    }

    /// Probe the list endpoint; there is no dedicated liveness route.
    pub fn health_check(&self) -> ClientResult<HealthStatus> {
        self.request(Method::GET, Route::Tasks)
            .map(|_| HealthStatus::Up)
            .map_err(TaskClientError::HealthCheck)
    }

    fn send_json<T>(&self, method: Method, route: Route<'_>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.request(method, route)?;
        let url = response.url().clone();
        Self::decode(url, response)
    }

    fn put_json<T, B>(&self, route: Route<'_>, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.build_url(route)?;
        let request = self.client.put(url.clone()).json(body);
        let response = Self::send(url.clone(), request)?;
        Self::decode(url, response)
    }

    fn request(&self, method: Method, route: Route<'_>) -> Result<Response> {
        let url = self.build_url(route)?;
        let request = self.client.request(method, url.clone());
        Self::send(url, request)
    }

    fn build_url(&self, route: Route<'_>) -> Result<Url> {
        let base = self
            .locator
            .wait_for_service_url()
            .map_err(ApiError::discovery)?;
        route.url(&base)
    }

    fn send(url: Url, request: RequestBuilder) -> Result<Response> {
        debug!("Sending request to {url}");
        let response = request
            .send()
            .map_err(|source| ApiError::from_transport(url.clone(), source))
            .inspect_err(|err| warn!("Request to {url} failed: {err}"))?;
        Self::handle_response(url, response)
    }

    fn handle_response(url: Url, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response
                .text()
                .unwrap_or_else(|_| "<unable to read body>".into());
            warn!("Task API returned {status} for {url}");
            Err(ApiError::from_status(status, url, message))
        }
    }

    fn decode<T>(url: Url, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        response
            .json::<T>()
            .map_err(|source| ApiError::Decode { url, source })
    }
}
