//! # Server-rendered requests
//!
//! Every request gets its own [`TokenStore`], over a [`MemoryCookies`] jar
//! seeded from the request's `Cookie` header. Nothing is shared between
//! requests.
//!
//! [`guard_requests`] is axum middleware: it runs a [`Guard`] for the request
//! path before the page handler, answers redirects itself, and otherwise hands
//! the session to the handler as an [`Extension`](axum::Extension). Cookie
//! changes made while handling the request (a new token, a logout) go back as
//! `Set-Cookie` headers.
//!
//! ```ignore
//! let pages = Router::new()
//!     .route("/", get(home))
//!     .route_layer(middleware::from_fn_with_state(
//!         RequestGuard::authenticated(client, config),
//!         guard_requests::<ApiClient>,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use store::{AuthConfig, MemoryCookies};

use super::guard::{Guard, Navigation};
use super::token_store::TokenStore;
use crate::client::ProfileApi;

/// The session of one server-rendered request.
pub type RequestSession<A> = TokenStore<MemoryCookies, A>;

/// Middleware state: how to build each request's session, and which guard
/// to run.
#[derive(Clone, Debug)]
pub struct RequestGuard<A> {
    api: A,
    config: AuthConfig,
    guard: Guard,
}

impl<A: ProfileApi + Clone> RequestGuard<A> {
    pub fn new(api: A, config: AuthConfig, guard: Guard) -> Self {
        Self { api, config, guard }
    }

    pub fn authenticated(api: A, config: AuthConfig) -> Self {
        Self::new(api, config, Guard::Authenticated)
    }

    pub fn guest_only(api: A, config: AuthConfig) -> Self {
        Self::new(api, config, Guard::GuestOnly)
    }

    /// A fresh session seeded from every `Cookie` header of a request.
    pub fn session_for(&self, headers: &HeaderMap) -> RequestSession<A> {
        let header = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        TokenStore::with_config(
            MemoryCookies::from_header(&header),
            self.api.clone(),
            self.config.cookie.clone(),
        )
    }
}

/// Guard one request. Use with `axum::middleware::from_fn_with_state`.
pub async fn guard_requests<A>(
    State(state): State<RequestGuard<A>>,
    mut request: Request,
    next: Next,
) -> Response
where
    A: ProfileApi + Clone + Send + Sync + 'static,
{
    let session = state.session_for(request.headers());
    let target = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let navigation = state
        .guard
        .run(&session, &target, &state.config.routes)
        .await;

    let mut response = match navigation {
        Navigation::Allow => {
            request.extensions_mut().insert(session.clone());
            next.run(request).await
        }
        Navigation::Redirect { to, reason } => {
            tracing::info!(?reason, path = %target, "Redirecting to {}", to);
            Redirect::to(&to).into_response()
        }
    };

    append_set_cookies(session.cookies(), response.headers_mut());
    response
}

fn append_set_cookies(cookies: &MemoryCookies, headers: &mut HeaderMap) {
    for cookie in cookies.set_cookie_headers() {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to write Set-Cookie header: {}", e),
        }
    }
}
