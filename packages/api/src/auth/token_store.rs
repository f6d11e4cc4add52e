//! # Token store: one user's session, backed by a cookie
//!
//! [`TokenStore`] owns the in-memory [`Session`] of one browser tab or one
//! server-rendered request, and keeps the token's durable copy in a
//! [`CookieStore`]. Clones share the same session.
//!
//! ## Operations
//!
//! | Method | Effect |
//! |--------|--------|
//! | [`initialize_store`](TokenStore::initialize_store) | Load the token from the cookie; fetch the profile if there is one. |
//! | [`set_token`](TokenStore::set_token) | Keep a new token in memory and write the cookie (7 days, path `/`, `SameSite=Strict`). |
//! | [`fetch_user_role`](TokenStore::fetch_user_role) | Fetch the profile and copy `level`, `name`, `status` into the session. |
//! | [`logout`](TokenStore::logout) | Tell the API, then clear the session whatever it answered. |
//! | [`null_token`](TokenStore::null_token) | Clear the session and remove the cookie. |
//!
//! Failures never leave the session half-updated: on any error the profile
//! fields keep whatever they held before, which for a fresh token is nothing.
//! The error itself is logged and handed back to the caller.

use std::sync::Arc;

use parking_lot::Mutex;
use store::{token_cookie, CookieConfig, CookieStore, Profile, Role, Session};

use crate::client::ProfileApi;
use crate::error::ApiError;

/// Session state for one user, persisted through `S` and refreshed through `A`.
#[derive(Clone, Debug)]
pub struct TokenStore<S, A> {
    session: Arc<Mutex<Session>>,
    cookies: S,
    api: A,
    config: CookieConfig,
}

impl<S: CookieStore, A: ProfileApi> TokenStore<S, A> {
    /// An empty store using the default `token` cookie.
    pub fn new(cookies: S, api: A) -> Self {
        Self::with_config(cookies, api, CookieConfig::default())
    }

    pub fn with_config(cookies: S, api: A, config: CookieConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            cookies,
            api,
            config,
        }
    }

    pub fn cookies(&self) -> &S {
        &self.cookies
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.lock().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.lock().token.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.lock().role.clone()
    }

    pub fn name(&self) -> Option<String> {
        self.session.lock().name.clone()
    }

    pub fn status(&self) -> Option<String> {
        self.session.lock().status.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.lock().has_token()
    }

    /// Load the token from the cookie store and, when there is one, fetch
    /// the profile.
    ///
    /// Returns `Ok(None)` when no token cookie is set.
    pub async fn initialize_store(&self) -> Result<Option<Profile>, ApiError> {
        let token = self.cookies.get(&self.config.name);
        {
            let mut session = self.session.lock();
            if session.token != token {
                *session = Session {
                    token: token.clone(),
                    ..Session::default()
                };
            }
        }

        if token.is_none() {
            tracing::debug!("No {} cookie found", self.config.name);
            return Ok(None);
        }
        self.fetch_user_role().await.map(Some)
    }

    /// Keep `token` in memory and persist it to the cookie store.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        {
            let mut session = self.session.lock();
            if session.token.as_deref() != Some(token.as_str()) {
                *session = Session::with_token(token.clone());
            }
        }
        self.cookies.set(token_cookie(&self.config, token));
    }

    /// Fetch the profile for the current token and copy it into the session.
    ///
    /// Fails fast with [`ApiError::MissingToken`] without a token. If the token
    /// changed while the request was in flight, the answer is returned but not
    /// applied.
    pub async fn fetch_user_role(&self) -> Result<Profile, ApiError> {
        let Some(token) = self.token() else {
            let error = ApiError::MissingToken;
            tracing::error!("Error fetching user role: {}", error);
            return Err(error);
        };

        match self.api.get_my_profile(&token).await {
            Ok(profile) => {
                let mut session = self.session.lock();
                if session.token.as_deref() == Some(token.as_str()) {
                    session.apply_profile(&profile);
                } else {
                    tracing::debug!("Token changed while fetching the profile, discarding it");
                }
                Ok(profile)
            }
            Err(e) => {
                tracing::error!("Error fetching user role: {}", e);
                Err(e)
            }
        }
    }

    /// Log out remotely, then clear the session regardless of the outcome.
    ///
    /// The returned result only reports what the API said.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = match self.token() {
            Some(token) => self.api.log_out(&token).await,
            None => Err(ApiError::MissingToken),
        };
        if let Err(e) = &result {
            tracing::error!("Error logging out: {}", e);
        }

        self.null_token();
        result
    }

    /// Remove one cookie, set at path `/`.
    pub fn remove_cookie(&self, name: &str) {
        self.cookies.remove(name, "/");
    }

    /// Forget the token and profile, in memory and in the cookie store.
    pub fn null_token(&self) {
        self.remove_cookie(&self.config.name);
        self.session.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cookies_with, FakeProfileApi};
    use store::MemoryCookies;
    use tokio::sync::Notify;

    fn admin_x() -> Profile {
        Profile {
            level: Role::Admin,
            name: Some("X".to_string()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_set_token_survives_into_fresh_store() {
        let cookies = MemoryCookies::new();
        let api = FakeProfileApi::returning(admin_x());

        let store = TokenStore::new(cookies.clone(), api.clone());
        store.set_token("abc");
        assert_eq!(store.token().as_deref(), Some("abc"));

        let fresh = TokenStore::new(cookies, api);
        assert!(fresh.token().is_none());
        fresh.initialize_store().await.unwrap();
        assert_eq!(fresh.token().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_initialize_without_cookie_skips_fetch() {
        let api = FakeProfileApi::returning(admin_x());
        let store = TokenStore::new(MemoryCookies::new(), api.clone());

        assert!(store.initialize_store().await.unwrap().is_none());
        assert_eq!(store.session(), Session::default());
        assert_eq!(api.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_initialize_fetches_profile() {
        let api = FakeProfileApi::returning(admin_x());
        let store = TokenStore::new(cookies_with(&[("token", "abc")]), api.clone());

        let profile = store.initialize_store().await.unwrap();
        assert_eq!(profile, Some(admin_x()));
        assert_eq!(store.role(), Some(Role::Admin));
        assert_eq!(store.name().as_deref(), Some("X"));
        assert_eq!(api.profile_calls(), 1);
        assert_eq!(api.last_token().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_fetch_without_token_fails_fast() {
        let api = FakeProfileApi::returning(admin_x());
        let store = TokenStore::new(MemoryCookies::new(), api.clone());

        let err = store.fetch_user_role().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
        assert_eq!(api.profile_calls(), 0);
        assert!(store.role().is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_fields_unset() {
        for api in [FakeProfileApi::failing(500), FakeProfileApi::malformed()] {
            let store = TokenStore::new(MemoryCookies::new(), api);
            store.set_token("abc");

            assert!(store.fetch_user_role().await.is_err());
            assert_eq!(store.token().as_deref(), Some("abc"));
            assert!(store.role().is_none());
            assert!(store.name().is_none());
            assert!(store.status().is_none());
        }
    }

    #[tokio::test]
    async fn test_new_token_drops_old_profile() {
        let store = TokenStore::new(MemoryCookies::new(), FakeProfileApi::returning(admin_x()));
        store.set_token("abc");
        store.fetch_user_role().await.unwrap();
        assert!(store.role().is_some());

        store.set_token("abc");
        assert!(store.role().is_some());

        store.set_token("def");
        assert_eq!(store.token().as_deref(), Some("def"));
        assert!(store.role().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_remote_fails() {
        let cookies = MemoryCookies::new();
        let api = FakeProfileApi::returning(admin_x()).with_logout_status(503);
        let store = TokenStore::new(cookies.clone(), api.clone());
        store.set_token("abc");
        store.fetch_user_role().await.unwrap();

        let err = store.logout().await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(api.logout_calls(), 1);
        assert_eq!(store.session(), Session::default());
        assert!(cookies.get("token").is_none());
    }

    #[tokio::test]
    async fn test_logout_without_token_skips_remote_call() {
        let cookies = cookies_with(&[("token", "stale")]);
        let api = FakeProfileApi::returning(admin_x());
        let store = TokenStore::new(cookies.clone(), api.clone());

        let err = store.logout().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
        assert_eq!(api.logout_calls(), 0);
        assert_eq!(store.session(), Session::default());
        assert!(cookies.get("token").is_none());
    }

    #[tokio::test]
    async fn test_profile_for_replaced_token_is_discarded() {
        let gate = Arc::new(Notify::new());
        let api = FakeProfileApi::returning(admin_x()).gated(gate.clone());
        let store = TokenStore::new(MemoryCookies::new(), api.clone());
        store.set_token("abc");

        let (fetched, ()) = tokio::join!(store.fetch_user_role(), async {
            store.set_token("def");
            gate.notify_one();
        });

        assert_eq!(fetched.unwrap(), admin_x());
        assert_eq!(api.last_token().as_deref(), Some("abc"));
        assert_eq!(store.token().as_deref(), Some("def"));
        assert!(store.role().is_none());
        assert!(store.name().is_none());
    }

    #[tokio::test]
    async fn test_logout_success() {
        let cookies = MemoryCookies::new();
        let api = FakeProfileApi::returning(admin_x());
        let store = TokenStore::new(cookies.clone(), api.clone());
        store.set_token("abc");

        store.logout().await.unwrap();
        assert_eq!(api.logout_calls(), 1);
        assert!(!store.is_authenticated());
        assert!(cookies.get("token").is_none());
    }

    #[tokio::test]
    async fn test_null_token_removes_cookie() {
        let cookies = cookies_with(&[("token", "abc")]);
        let store = TokenStore::new(cookies.clone(), FakeProfileApi::returning(admin_x()));
        store.initialize_store().await.unwrap();

        store.null_token();
        assert!(store.token().is_none());
        assert!(store.role().is_none());
        assert!(cookies.get("token").is_none());
    }

    #[tokio::test]
    async fn test_clones_share_session() {
        let store = TokenStore::new(MemoryCookies::new(), FakeProfileApi::returning(admin_x()));
        let other = store.clone();
        store.set_token("abc");
        other.fetch_user_role().await.unwrap();
        assert_eq!(store.role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_custom_cookie_name() {
        let cookies = cookies_with(&[("sid", "abc"), ("token", "ignored")]);
        let config = CookieConfig {
            name: "sid".to_string(),
            max_age_days: 1,
        };
        let store = TokenStore::with_config(cookies, FakeProfileApi::returning(admin_x()), config);
        store.initialize_store().await.unwrap();
        assert_eq!(store.token().as_deref(), Some("abc"));
    }
}
