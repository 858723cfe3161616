//! HTTP implementation of the record and delete seams

use crate::config::ClientConfig;
use crate::error::{ConfigError, DeleteError, ErrorPayload, FetchError};
use crate::fetcher::{Deleter, RecordFetcher};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use timeline_types::{EditRecord, ExperimentRecord, ItemId, ItemKind, Record};

/// Timeline API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    base: Url,
    http: Client,
}

impl ApiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    /// - `ConfigError::InvalidBaseUrl` if the base URL does not parse
    /// - `ConfigError::HttpClient` if the HTTP client cannot be built
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let base = config.base()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { config, base, http })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve a target (absolute or relative to the base URL)
    ///
    /// # Errors
    /// Returns the target back if it cannot be joined onto the base URL.
    pub fn resolve(&self, target: &str) -> Result<Url, String> {
        self.base.join(target).map_err(|_| target.to_string())
    }

    /// Read endpoint for an item's record
    #[must_use]
    pub fn record_path(kind: ItemKind, id: &ItemId) -> String {
        format!("/api/{}/{}", kind.api_segment(), id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.resolve(path).map_err(FetchError::InvalidUrl)?;
        let url_text = url.to_string();

        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url_text.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url_text.clone(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_text,
                status: status.as_u16(),
                message: ErrorPayload::message_from(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url_text,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RecordFetcher for ApiClient {
    #[tracing::instrument(skip(self), fields(kind = %kind, id = %id))]
    async fn fetch(&self, kind: ItemKind, id: &ItemId) -> Result<Record, FetchError> {
        let path = Self::record_path(kind, id);
        let record = match kind {
            ItemKind::Edit | ItemKind::CreationEdit => {
                Record::Edit(self.get_json::<EditRecord>(&path).await?)
            }
            ItemKind::Experiment => {
                Record::Experiment(self.get_json::<ExperimentRecord>(&path).await?)
            }
        };
        tracing::debug!("record fetched");
        Ok(record)
    }
}

#[async_trait]
impl Deleter for ApiClient {
    #[tracing::instrument(skip(self))]
    async fn delete(&self, target_url: &str) -> Result<(), DeleteError> {
        let url = self.resolve(target_url).map_err(DeleteError::InvalidUrl)?;
        let url_text = url.to_string();

        let response = self
            .authorized(self.http.delete(url))
            .send()
            .await
            .map_err(|e| DeleteError::Transport {
                url: url_text.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "delete accepted");
            return Ok(());
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(DeleteError::Status {
            url: url_text,
            status: status.as_u16(),
            message: ErrorPayload::message_from(&body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_paths() {
        let id = ItemId::new("8").unwrap();
        assert_eq!(ApiClient::record_path(ItemKind::Edit, &id), "/api/edit/8");
        assert_eq!(ApiClient::record_path(ItemKind::CreationEdit, &id), "/api/edit/8");
        assert_eq!(
            ApiClient::record_path(ItemKind::Experiment, &id),
            "/api/experiment/8"
        );
    }

    #[test]
    fn resolves_relative_targets() {
        let client = ApiClient::new(ClientConfig::new().with_base_url("http://api.test:5000")).unwrap();
        assert_eq!(
            client.resolve("/api/edit/3").unwrap().as_str(),
            "http://api.test:5000/api/edit/3"
        );
        assert_eq!(
            client.resolve("https://other.test/api/recipes/1").unwrap().as_str(),
            "https://other.test/api/recipes/1"
        );
    }

    #[test]
    fn rejects_invalid_base() {
        let err = ApiClient::new(ClientConfig::new().with_base_url("::")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }
}
