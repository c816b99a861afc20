use std::error::Error as StdError;

use reqwest::{StatusCode, Url};
use thiserror::Error;
use url::ParseError;

/// Result alias for transport-level operations within the task API client crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Result alias for the public client operations.
pub type ClientResult<T> = std::result::Result<T, TaskClientError>;

/// Transport-level failures, normalized the same way for every request.
///
/// 404, 500 and refused connections get fixed user-facing messages; every
/// other failure keeps its original detail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resolving the base URL for the task API failed.
    #[error("failed to resolve task API base URL: {0}")]
    Discovery(#[source] Box<dyn StdError + Send + Sync>),

    /// The provided base URL is malformed.
    #[error("invalid task API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: ParseError,
    },

    /// The base URL cannot carry a path (e.g. `mailto:`).
    #[error("cannot append '{path}' to base URL '{base}'")]
    InvalidPath { base: Url, path: String },

    #[error("Resource not found")]
    NotFound { url: Url },

    #[error("Internal server error")]
    Server { url: Url, message: String },

    #[error("Cannot connect to API server. Please ensure the backend is running.")]
    Connection {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// The API returned a non-success status without a dedicated mapping.
    #[error("task API returned {status} for {url}: {message}")]
    Http {
        status: StatusCode,
        url: Url,
        message: String,
    },

    /// The underlying HTTP client returned an error.
    #[error("task API request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// Coarse category of a failure, for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Server,
    Connection,
    Timeout,
    Other,
}

impl ApiError {
    pub(crate) fn discovery<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ApiError::Discovery(Box::new(error))
    }

    /// Maps a non-success status onto the error taxonomy.
    pub fn from_status(status: StatusCode, url: Url, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound { url },
            StatusCode::INTERNAL_SERVER_ERROR => ApiError::Server { url, message },
            _ => ApiError::Http {
                status,
                url,
                message,
            },
        }
    }

    /// Maps a failure raised before any response arrived.
    pub fn from_transport(url: Url, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ApiError::Timeout { url, source }
        } else if source.is_connect() {
            ApiError::Connection { url, source }
        } else if source.is_decode() {
            ApiError::Decode { url, source }
        } else {
            ApiError::Request(source)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Connection { .. } => ErrorKind::Connection,
            ApiError::Timeout { .. } => ErrorKind::Timeout,
            _ => ErrorKind::Other,
        }
    }
}

/// A failed client operation. The display text is what the user sees.
#[derive(Debug, Error)]
pub enum TaskClientError {
    #[error("Failed to fetch tasks: {0}")]
    Fetch(#[source] ApiError),

    #[error("Task not found")]
    NotFound(#[source] ApiError),

    #[error("Search failed: {0}")]
    Search(#[source] ApiError),

    #[error("Failed to save task: {0}")]
    Save(#[source] ApiError),

    #[error("Failed to delete task: {0}")]
    Delete(#[source] ApiError),

    #[error("Task execution failed: {0}")]
    Execution(#[source] ApiError),

    #[error("API health check failed: {0}")]
    HealthCheck(#[source] ApiError),
}

impl TaskClientError {
    pub fn api_error(&self) -> &ApiError {
        match self {
            TaskClientError::Fetch(err)
            | TaskClientError::NotFound(err)
            | TaskClientError::Search(err)
            | TaskClientError::Save(err)
            | TaskClientError::Delete(err)
            | TaskClientError::Execution(err)
            | TaskClientError::HealthCheck(err) => err,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.api_error().kind()
    }

    /// Lookup failures split into "no such task" and everything else.
    pub(crate) fn lookup(err: ApiError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => TaskClientError::NotFound(err),
            _ => TaskClientError::Fetch(err),
        }
    }
}
