use common::helper::error_chain_fmt;
use reqwest::{header::CONTENT_TYPE, Client, Method, RequestBuilder, Url};
use secrecy::{ExposeSecret, Secret};
use tracing::info;

use crate::configuration::BackendSettings;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP access to the whiteboard backend
///
/// One pooled client is shared by every request. Bodies are exchanged as raw
/// text, encoding is left to the caller.
pub struct BackendHttpRepository {
    client: Client,
    base_url: String,
    api_token: Option<Secret<String>>,
}

#[derive(thiserror::Error)]
pub enum BackendHttpRepositoryError {
    #[error("Invalid backend base URL {0:?}: {1}")]
    InvalidBaseUrl(String, String),
    #[error("The backend answered {method} {path} with status {status}: {body}")]
    UnsuccessfulStatus {
        method: Method,
        path: String,
        status: u16,
        body: String,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl std::fmt::Debug for BackendHttpRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl BackendHttpRepository {
    pub fn try_new(settings: &BackendSettings) -> Result<Self, BackendHttpRepositoryError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            BackendHttpRepositoryError::InvalidBaseUrl(settings.base_url.clone(), e.to_string())
        })?;

        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            base_url,
            api_token: settings.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(name = "GET from the backend", skip(self))]
    pub async fn get(&self, path: &str) -> Result<String, BackendHttpRepositoryError> {
        self.send(Method::GET, path, None).await
    }

    #[tracing::instrument(name = "POST to the backend", skip(self, json_body))]
    pub async fn post_json(
        &self,
        path: &str,
        json_body: String,
    ) -> Result<String, BackendHttpRepositoryError> {
        self.send(Method::POST, path, Some(json_body)).await
    }

    #[tracing::instrument(name = "DELETE on the backend", skip(self))]
    pub async fn delete(&self, path: &str) -> Result<String, BackendHttpRepositoryError> {
        self.send(Method::DELETE, path, None).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Any non-2xx status is an error, its body is kept for the logs
    async fn send(
        &self,
        method: Method,
        path: &str,
        json_body: Option<String>,
    ) -> Result<String, BackendHttpRepositoryError> {
        let mut request = self.request(method.clone(), path);
        if let Some(json_body) = json_body {
            request = request
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(json_body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendHttpRepositoryError::UnsuccessfulStatus {
                method,
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        info!(status = status.as_u16(), length = body.len(), "Backend answered");
        Ok(body)
    }
}
