//! Session handling: the token store and the route guards built on it.

mod guard;
#[cfg(not(target_arch = "wasm32"))]
mod request;
mod token_store;

pub use guard::{authorize, redirect_if_authenticated, Guard, Navigation, RedirectReason};
#[cfg(not(target_arch = "wasm32"))]
pub use request::{guard_requests, RequestGuard, RequestSession};
pub use token_store::TokenStore;
