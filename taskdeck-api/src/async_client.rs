use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use taskdeck_models::{Task, TaskSubmission};

use crate::{
    error::{ApiError, ClientResult, ErrorKind, Result, TaskClientError},
    locator::ServiceLocator,
    payload::{HealthStatus, TaskPayload},
    routes::Route,
};

/// Asynchronous API client that wraps `reqwest::Client` and a service locator.
#[derive(Clone)]
pub struct AsyncApiClient<L> {
    client: Client,
    locator: L,
}

impl<L> AsyncApiClient<L>
where
    L: ServiceLocator,
{
    /// Construct a client whose requests give up after `timeout`.
    pub fn new(locator: L, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, locator })
    }

    /// Fetch every task, in backend order.
    pub async fn list_all(&self) -> ClientResult<Vec<Task>> {
        self.fetch_json(Route::Tasks)
            .await
            .map_err(TaskClientError::Fetch)
    }

    /// Fetch a single task by identifier.
    pub async fn get_by_id(&self, id: &str) -> ClientResult<Task> {
        self.fetch_json(Route::Task(id))
            .await
            .map_err(TaskClientError::lookup)
    }

    /// Tasks whose name matches `term`. The backend answers 404 for "no
    /// matches", which is reported as an empty list.
    pub async fn search_by_name(&self, term: &str) -> ClientResult<Vec<Task>> {
        match self.fetch_json(Route::Search(term)).await {
            Ok(tasks) => Ok(tasks),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(TaskClientError::Search(err)),
        }
    }

    /// Create or update a task and return the canonical record.
    ///
    /// Not idempotent for creates: every call without an id makes a new task.
    pub async fn upsert(&self, submission: &TaskSubmission) -> ClientResult<Task> {
        let saved: Task = self
            .put_json(Route::Tasks, &TaskPayload::from(submission))
            .await
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
    pub async fn remove(&self, id: &str) -> ClientResult<()> {
        self.request(Method::DELETE, Route::Task(id))
            .await
            .map(|_| info!("Deleted task {id}"))
            .map_err(TaskClientError::Delete)
    }

    /// Run the task's command on the backend and return the task with the new execution appended.
    pub async fn execute(&self, id: &str) -> ClientResult<Task> {
        let task: Task = self
            .send_json(Method::PUT, Route::Execute(id))
            .await
            .map_err(TaskClientError::Execution)?;
        info!(
            "Executed task {id}; {} execution(s) recorded",
            task.execution_count()
        );
        Ok(task)
    }

    /// Probe the list endpoint; there is no dedicated liveness route.
    pub async fn health_check(&self) -> ClientResult<HealthStatus> {
        self.request(Method::GET, Route::Tasks)
            .await
            .map(|_| HealthStatus::Up)
            .map_err(TaskClientError::HealthCheck)
    }

    async fn fetch_json<T>(&self, route: Route<'_>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send_json(Method::GET, route).await
    }

    async fn send_json<T>(&self, method: Method, route: Route<'_>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.request(method, route).await?;
        let url = response.url().clone();
        Self::decode(url, response).await
    }

    async fn put_json<T, B>(&self, route: Route<'_>, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.build_url(route).await?;
        let request = self.client.put(url.clone()).json(body);
        let response = Self::send(url.clone(), request).await?;
        Self::decode(url, response).await
    }

    async fn request(&self, method: Method, route: Route<'_>) -> Result<Response> {
        let url = self.build_url(route).await?;
        let request = self.client.request(method, url.clone());
        Self::send(url, request).await
    }

    async fn build_url(&self, route: Route<'_>) -> Result<Url> {
        let base = self
            .locator
            .wait_for_service_url()
            .await
            .map_err(ApiError::discovery)?;
        route.url(&base)
    }

    async fn send(url: Url, request: reqwest::RequestBuilder) -> Result<Response> {
        debug!("Sending request to {url}");
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::from_transport(url.clone(), source))
            .inspect_err(|err| warn!("Request to {url} failed: {err}"))?;
        Self::handle_response(url, response).await
    }

    async fn handle_response(url: Url, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read body>".into());
            warn!("Task API returned {status} for {url}");
            Err(ApiError::from_status(status, url, message))
        }
    }

    async fn decode<T>(url: Url, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}
