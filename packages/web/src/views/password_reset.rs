//! Password reset flow: request a code, enter it, choose a new password.
//!
//! These pages are navigation-only placeholders. Submitting a form sends
//! nothing and only moves to the next step; none of the account API's reset
//! endpoints are called from this app.

use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn ForgetPassword() -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "page",
            h1 { "Forgot password" }
            form {
                onsubmit: move |event: FormEvent| {
                    event.prevent_default();
                    nav.push(Route::ForgetPasswordOtp {});
                },
                input { r#type: "email", placeholder: "Email" }
                button { r#type: "submit", "Send code" }
            }
            Link { to: Route::Login {}, "Back to sign in" }
        }
    }
}

#[component]
pub fn ForgetPasswordOtp() -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "page",
            h1 { "Enter code" }
            form {
                onsubmit: move |event: FormEvent| {
                    event.prevent_default();
                    nav.push(Route::NewPassword {});
                },
                input { r#type: "text", inputmode: "numeric", placeholder: "One-time code" }
                button { r#type: "submit", "Verify" }
            }
        }
    }
}

#[component]
pub fn NewPassword() -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "page",
            h1 { "New password" }
            form {
                onsubmit: move |event: FormEvent| {
                    event.prevent_default();
                    nav.replace(Route::Login {});
                },
                input { r#type: "password", placeholder: "New password" }
                input { r#type: "password", placeholder: "Repeat password" }
                button { r#type: "submit", "Save" }
            }
        }
    }
}
