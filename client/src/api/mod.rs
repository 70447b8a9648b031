//! REST API access to the Expirapp backend
//!
//! One `ApiClient` owns the HTTP connection pool, the configured base URL
//! and the injected session store; endpoint groups live in the submodules.

pub mod auth;
pub mod orders;
pub mod products;
pub mod stores;
pub mod users;

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::session::SessionStore;

/// Envelope used by several endpoints (`{ "data": ... }`)
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Some endpoints wrap their payload in an envelope, some return it bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybeEnveloped<T> {
    Enveloped { data: T },
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            MaybeEnveloped::Enveloped { data } => data,
            MaybeEnveloped::Bare(data) => data,
        }
    }
}

/// Error body most endpoints return (`{ "message": ... }`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the Expirapp REST API
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    asset_base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a new ApiClient from loaded configuration
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Self {
        Self::with_base_url(
            config.api.base_url.clone(),
            config.api.asset_base_url.clone(),
            session,
        )
    }

    /// Create a new ApiClient with custom base URLs (for testing)
    pub fn with_base_url(
        base_url: String,
        asset_base_url: String,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url,
            asset_base_url,
            session,
        }
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn asset_base_url(&self) -> &str {
        &self.asset_base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Attach the bearer token from the session, failing when absent.
    pub(crate) fn authorized(&self, builder: RequestBuilder) -> AppResult<RequestBuilder> {
        let token = self.session.token().ok_or(AppError::MissingToken)?;
        Ok(builder.bearer_auth(token))
    }

    /// Deserialize a successful response, or map the failure to an API
    /// error carrying the backend's message.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        response.json().await.map_err(AppError::from)
    }

    /// Check a response for success, discarding any body.
    pub(crate) async fn expect_success(response: Response) -> AppResult<()> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        Ok(())
    }

    pub(crate) async fn api_error(status: StatusCode, response: Response) -> AppError {
        let fallback = status
            .canonical_reason()
            .unwrap_or("Error de red o servidor.")
            .to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(if body.is_empty() { fallback } else { body });
        AppError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
