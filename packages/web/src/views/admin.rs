//! Admin area. Restricted roles never get here; the layout sends them home.

use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[component]
pub fn AdminHome() -> Element {
    rsx! {
        AdminSection { segments: Vec::new() }
    }
}

#[component]
pub fn AdminSection(segments: Vec<String>) -> Element {
    let session = use_session().session();
    let role = session.role.map(|role| role.to_string()).unwrap_or_default();
    let section = segments.join("/");

    rsx! {
        div { class: "page",
            h1 { "Admin" }
            if !section.is_empty() {
                h2 { "{section}" }
            }
            p { "Role: {role}" }
            Link { to: Route::Home {}, "Back home" }
        }
    }
}
