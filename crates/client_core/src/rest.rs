//! REST adapters for the directory and task collaborators.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::UserId,
    protocol::{TaskRecord, UserDirectoryEntry},
};
use thiserror::Error;

use crate::{DirectoryService, TaskService};

#[derive(Debug, Error)]
pub enum RestFetchError {
    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },
    #[error("{url} returned status {status}")]
    Status { url: String, status: StatusCode },
    #[error("invalid payload from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

async fn fetch_json<T: serde::de::DeserializeOwned>(http: &Client, url: String) -> Result<T> {
    let response = http
        .get(&url)
        .send()
        .await
        .map_err(|source| RestFetchError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RestFetchError::Status { url, status }.into());
    }

    let body = response
        .json()
        .await
        .map_err(|source| RestFetchError::Decode {
            url: url.clone(),
            source,
        })?;
    Ok(body)
}

pub struct RestDirectoryService {
    http: Client,
    base_url: String,
}

impl RestDirectoryService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DirectoryService for RestDirectoryService {
    async fn list_users(&self) -> Result<Vec<UserDirectoryEntry>> {
        fetch_json(&self.http, format!("{}/users", self.base_url)).await
    }
}

pub struct RestTaskService {
    http: Client,
    base_url: String,
}

impl RestTaskService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TaskService for RestTaskService {
    async fn tasks_for_user(&self, user_id: UserId) -> Result<Vec<TaskRecord>> {
        fetch_json(
            &self.http,
            format!("{}/users/{}/todos", self.base_url, user_id.0),
        )
        .await
    }
}
