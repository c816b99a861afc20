mod async_client;
mod blocking_client;
mod error;
mod locator;
mod payload;
mod routes;
mod service;

pub use async_client::AsyncApiClient;
pub use blocking_client::BlockingApiClient;
pub use error::{ApiError, ClientResult, ErrorKind, Result, TaskClientError};
pub use locator::{BlockingServiceLocator, ServiceLocator, StaticLocator, API_URL_ENV, DEFAULT_API_URL};
pub use payload::HealthStatus;
pub use service::TaskService;

use std::time::Duration;

/// Upper bound for any single request against the task API.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
