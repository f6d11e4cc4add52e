//! # Account API client
//!
//! [`ProfileApi`] is the seam between the token store and the network: the two
//! authenticated calls the store makes. [`ApiClient`] implements it over
//! `reqwest` against the real endpoints:
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`get_my_profile`](ProfileApi::get_my_profile) | `GET {base}/get-my-profile` |
//! | [`log_out`](ProfileApi::log_out) | `POST {base}/log-out` |
//!
//! Both send `Authorization: Bearer <token>` and `Content-Type: application/json`.
//! Non-2xx responses are logged with their body and returned as
//! [`ApiError::Status`]. These calls do not go through
//! [`crate::retry::fetch_with_retry`].

use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use store::Profile;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Authenticated account calls made on behalf of a session.
///
/// Off the browser the futures are `Send`, so a session can be driven from an
/// axum handler or a spawned task.
#[cfg(not(target_arch = "wasm32"))]
pub trait ProfileApi {
    fn get_my_profile(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Profile, ApiError>> + Send;
    fn log_out(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Authenticated account calls made on behalf of a session.
#[cfg(target_arch = "wasm32")]
pub trait ProfileApi {
    fn get_my_profile(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Profile, ApiError>>;
    fn log_out(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<(), ApiError>>;
}

/// `{ "data": { "profile": { ... } } }`
#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    data: Option<ProfileData>,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    #[serde(default)]
    profile: Option<Profile>,
}

/// Extract the profile from a `get-my-profile` response body.
pub fn parse_profile(body: &str) -> Result<Profile, ApiError> {
    let envelope: ProfileEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::MalformedProfile(e.to_string()))?;
    envelope
        .data
        .and_then(|data| data.profile)
        .ok_or_else(|| ApiError::MalformedProfile("user level not found".to_string()))
}

/// HTTP client for the account API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: ApiConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl ProfileApi for ApiClient {
    async fn get_my_profile(&self, token: &str) -> Result<Profile, ApiError> {
        let response = self
            .http
            .get(self.config.endpoint("get-my-profile"))
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("Failed to fetch user role, response: {}", body);
            return Err(ApiError::Status(status.as_u16()));
        }

        parse_profile(&body)
    }

    async fn log_out(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.config.endpoint("log-out"))
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Failed to log out, response: {}", body);
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }
}
