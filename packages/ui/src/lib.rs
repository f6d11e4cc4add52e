//! Shared UI for the workspace: the session context and the navigation guards
//! that host [`api::auth`] inside a Dioxus app.

mod auth;
pub use auth::{
    make_session, use_auth_config, use_session, LogoutButton, PlatformCookies, SessionProvider,
    TokenLoginForm, WebSession,
};

mod guard;
pub use guard::use_guard;

pub use api::{Guard, Navigation, RedirectReason};
