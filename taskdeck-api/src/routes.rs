use reqwest::Url;

use crate::error::{ApiError, Result};

/// Endpoints of the task API, relative to the resolved base URL.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Route<'a> {
    Tasks,
    Task(&'a str),
    Search(&'a str),
    Execute(&'a str),
}

impl Route<'_> {
    pub(crate) fn url(&self, base: &str) -> Result<Url> {
        let mut url = Url::parse(base).map_err(|source| ApiError::InvalidBaseUrl {
            url: base.to_string(),
            source,
        })?;
        let base_url = url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidPath {
                    base: base_url,
                    path: self.to_string(),
                })?;
            segments.pop_if_empty().extend(["api", "tasks"]);
            match self {
                Route::Tasks => {}
                Route::Task(id) => {
                    segments.push(id);
                }
                Route::Search(_) => {
                    segments.push("search");
                }
                Route::Execute(id) => {
                    segments.push(id).push("execute");
                }
            }
        }
        if let Route::Search(term) = self {
            url.query_pairs_mut().append_pair("name", term);
        }
        Ok(url)
    }
}

impl std::fmt::Display for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Tasks => write!(f, "/api/tasks"),
            Route::Task(id) => write!(f, "/api/tasks/{id}"),
            Route::Search(term) => write!(f, "/api/tasks/search?name={term}"),
            Route::Execute(id) => write!(f, "/api/tasks/{id}/execute"),
        }
    }
}
