//! Navigation guards as hooks.
//!
//! Layout components call [`use_guard`] with the path being entered and act on
//! the [`Navigation`] once the guard has decided. The guard re-runs whenever
//! the path changes, and a decision made for another path counts as pending,
//! so a page is never rendered before its own guard has allowed it.

use api::{Guard, Navigation};
use dioxus::prelude::*;

use crate::auth::{use_auth_config, use_session};

/// Run `guard` for `path`. `None` while the decision for `path` is pending.
pub fn use_guard(guard: Guard, path: String) -> Option<Navigation> {
    let session = use_session();
    let routes = use_auth_config().routes;

    let decision = use_resource(use_reactive((&path,), move |(path,)| {
        let session = session.clone();
        let routes = routes.clone();
        async move {
            let navigation = guard.run(&session, &path, &routes).await;
            (path, navigation)
        }
    }));

    decision_for(&path, decision.cloned())
}

/// The decision made for `path`, ignoring one left over from an earlier path.
fn decision_for(path: &str, decided: Option<(String, Navigation)>) -> Option<Navigation> {
    match decided {
        Some((decided_path, navigation)) if decided_path == path => Some(navigation),
        _ => None,
    }
}
