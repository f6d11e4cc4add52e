use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");

    rsx! {
        div { class: "page",
            h1 { "Page not found" }
            p { "/{path}" }
            Link { to: Route::Home {}, "Go home" }
        }
    }
}
