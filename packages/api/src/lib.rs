//! # API crate: talking to the account API on behalf of a session
//!
//! Everything the front end needs to know who is signed in, and whether they
//! may go where they are going.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`TokenStore`](auth::TokenStore) (token + profile of one session, persisted in a cookie), the route guards [`authorize`](auth::authorize) / [`redirect_if_authenticated`](auth::redirect_if_authenticated), and, off the browser, the per-request `guard_requests` axum middleware |
//! | [`client`] | [`ProfileApi`] seam and its `reqwest` implementation [`ApiClient`] (`get-my-profile`, `log-out`) |
//! | [`config`] | [`ApiConfig`]: the API base URL, from `API_BASE_URL` |
//! | [`retry`] | [`fetch_with_retry`]: JSON fetch that backs off and retries on HTTP 429 |
//! | [`error`] | [`ApiError`] and its [`FailureKind`] classification |
//!
//! Session failures stay inside the store: they are logged, the session is
//! left without a profile, and the guard turns that into a login redirect.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod retry;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{Guard, Navigation, RedirectReason, TokenStore};
pub use client::{ApiClient, ProfileApi};
pub use config::ApiConfig;
pub use error::{ApiError, ConfigError, FailureKind};
pub use retry::{fetch_with_retry, RetryPolicy};
pub use store::{AuthConfig, Profile, Role, RoutesConfig, Session};
