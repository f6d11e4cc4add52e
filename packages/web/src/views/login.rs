use dioxus::prelude::*;
use ui::TokenLoginForm;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "page",
            h1 { "Sign in" }
            TokenLoginForm {
                on_signed_in: move |_| {
                    nav.replace(Route::Home {});
                },
            }
            Link { to: Route::ForgetPassword {}, "Forgot your password?" }
        }
    }
}
