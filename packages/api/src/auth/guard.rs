//! # Route guard: may this navigation proceed?
//!
//! Runs before every navigation. It only looks at the [`TokenStore`] (loading
//! it first when needed) and the target path, and answers with a
//! [`Navigation`]. Failures never escape as errors: a session that cannot be
//! established is a redirect to the login page.
//!
//! ## [`authorize`]
//!
//! 1. No token in memory → initialize the store from its cookie. Still no
//!    token → redirect to login, unless the target already is the login page.
//! 2. Token but no role → fetch the profile once (a fetch made while
//!    initializing in step 1 counts). Still no role → same outcome as having
//!    no token; the redirect reason records why the profile was unavailable.
//! 3. Signed in and heading for the login page → redirect home.
//! 4. Restricted role heading below the admin prefix → redirect home.
//! 5. Anything else is allowed.
//!
//! ## [`redirect_if_authenticated`]
//!
//! The lighter guard for guest-only pages: initialize if needed, then send a
//! signed-in user away from the login page.

use store::{CookieStore, Profile, RoutesConfig};

use super::token_store::TokenStore;
use crate::client::ProfileApi;
use crate::error::{ApiError, FailureKind};

/// Why a navigation was redirected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectReason {
    /// No token, in memory or in the cookie.
    Unauthenticated,
    /// A token exists but its profile could not be loaded.
    RoleUnavailable(FailureKind),
    /// Signed-in users never see the login page.
    AlreadyAuthenticated,
    /// The role may not enter the admin area.
    Forbidden,
}

/// Outcome of running a guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect { to: String, reason: RedirectReason },
}

impl Navigation {
    fn redirect(to: &str, reason: RedirectReason) -> Self {
        Navigation::Redirect {
            to: to.to_string(),
            reason,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Navigation::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Navigation::Allow => None,
            Navigation::Redirect { to, .. } => Some(to),
        }
    }

    pub fn reason(&self) -> Option<RedirectReason> {
        match self {
            Navigation::Allow => None,
            Navigation::Redirect { reason, .. } => Some(*reason),
        }
    }
}

/// Send the user to the login page, unless that is where they are going.
fn to_login(target: &str, routes: &RoutesConfig, reason: RedirectReason) -> Navigation {
    if routes.is_login(target) {
        Navigation::Allow
    } else {
        Navigation::redirect(&routes.login, reason)
    }
}

/// Decide whether navigating to `target` may proceed.
pub async fn authorize<S: CookieStore, A: ProfileApi>(
    store: &TokenStore<S, A>,
    target: &str,
    routes: &RoutesConfig,
) -> Navigation {
    tracing::debug!(path = target, "Auth guard running");

    let mut role_fetch: Option<Result<Profile, ApiError>> = None;
    if !store.is_authenticated() {
        role_fetch = store.initialize_store().await.transpose();
    }

    if !store.is_authenticated() {
        tracing::error!("No token found during initialization");
        return to_login(target, routes, RedirectReason::Unauthenticated);
    }

    let role = match store.role() {
        Some(role) => role,
        None => {
            let outcome = match role_fetch {
                Some(outcome) => outcome,
                None => store.fetch_user_role().await,
            };
            match store.role() {
                Some(role) => role,
                None => {
                    let kind = match outcome {
                        Err(e) => e.kind(),
                        Ok(_) => FailureKind::Transient,
                    };
                    tracing::error!(?kind, "User role not found after fetching");
                    return to_login(target, routes, RedirectReason::RoleUnavailable(kind));
                }
            }
        }
    };

    if routes.is_login(target) {
        return Navigation::redirect(&routes.home, RedirectReason::AlreadyAuthenticated);
    }

    if role == routes.restricted_role && routes.is_admin(target) {
        tracing::debug!(%role, path = target, "Role may not enter the admin area");
        return Navigation::redirect(&routes.home, RedirectReason::Forbidden);
    }

    Navigation::Allow
}

/// Keep signed-in users off the login page.
pub async fn redirect_if_authenticated<S: CookieStore, A: ProfileApi>(
    store: &TokenStore<S, A>,
    target: &str,
    routes: &RoutesConfig,
) -> Navigation {
    if !store.is_authenticated() {
        if let Err(e) = store.initialize_store().await {
            tracing::debug!("Profile unavailable on guest page: {}", e);
        }
    }

    if routes.is_login(target) && store.is_authenticated() {
        return Navigation::redirect(&routes.home, RedirectReason::AlreadyAuthenticated);
    }
    Navigation::Allow
}

/// Which guard protects a group of routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Signed-in users only; restricted roles stay out of the admin area.
    Authenticated,
    /// Pages for signed-out users; signed-in users leave the login page.
    GuestOnly,
}

impl Guard {
    /// Run [`authorize`] or [`redirect_if_authenticated`].
    pub async fn run<S: CookieStore, A: ProfileApi>(
        self,
        store: &TokenStore<S, A>,
        target: &str,
        routes: &RoutesConfig,
    ) -> Navigation {
        match self {
            Guard::Authenticated => authorize(store, target, routes).await,
            Guard::GuestOnly => redirect_if_authenticated(store, target, routes).await,
        }
    }
}
