use dioxus::prelude::*;
use ui::{use_session, LogoutButton};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let session = use_session().session();
    let nav = use_navigator();

    let name = session.name.unwrap_or_else(|| "there".to_string());
    let role = session.role.map(|role| role.to_string()).unwrap_or_default();

    rsx! {
        div { class: "page",
            h1 { "Hello, {name}" }
            p { "Signed in as {role}" }
            Link { to: Route::AdminHome {}, "Admin area" }
            LogoutButton {
                on_logout: move |_| {
                    nav.replace(Route::Login {});
                },
            }
        }
    }
}
