use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{DirectoryError, Result};
use crate::store::UserSource;
use crate::types::User;

pub struct DirectoryClient {
    http: Client,
    base: Url,
}

impl DirectoryClient {
    /// `base` must end with a trailing slash so endpoint paths join below
    /// it; `Config::base_url` normalizes this.
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base.join(path)?;
        tracing::debug!(%url, "directory request");

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DirectoryError::Api {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait(?Send)]
impl UserSource for DirectoryClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("users").await
    }

    async fn user_by_id(&self, id: u64) -> Result<User> {
        self.get_json(&format!("users/{id}")).await
    }
}
