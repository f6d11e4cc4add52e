use api::{AuthConfig, Navigation};
use dioxus::prelude::*;

use ui::{use_guard, Guard, SessionProvider};
use views::{
    AdminHome, AdminSection, ForgetPassword, ForgetPasswordOtp, Home, Login, NewPassword, NotFound,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(GuestLayout)]
        #[route("/auth/login")]
        Login {},
        #[route("/forget-password")]
        ForgetPassword {},
        #[route("/forget-password-otp")]
        ForgetPasswordOtp {},
        #[route("/new-password")]
        NewPassword {},
    #[end_layout]
    #[layout(AuthenticatedLayout)]
        #[route("/")]
        Home {},
        #[route("/admin")]
        AdminHome {},
        #[route("/admin/:..segments")]
        AdminSection { segments: Vec<String> },
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const AUTH_TOML: &str = include_str!("../auth.toml");

fn main() {
    dioxus::launch(App);
}

fn auth_config() -> AuthConfig {
    AuthConfig::from_toml(AUTH_TOML).unwrap_or_else(|e| {
        tracing::error!("Failed to parse {}: {}", AuthConfig::filename(), e);
        AuthConfig::default()
    })
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config: auth_config(),
            Router::<Route> {}
        }
    }
}

/// Pages that need a signed-in user.
#[component]
fn AuthenticatedLayout() -> Element {
    let route = use_route::<Route>();
    let nav = use_navigator();
    let decision = use_guard(Guard::Authenticated, route.to_string());
    follow(nav, decision)
}

/// Login and password-reset pages.
#[component]
fn GuestLayout() -> Element {
    let route = use_route::<Route>();
    let nav = use_navigator();
    let decision = use_guard(Guard::GuestOnly, route.to_string());
    follow(nav, decision)
}

fn follow(nav: Navigator, decision: Option<Navigation>) -> Element {
    match decision {
        Some(Navigation::Allow) => rsx! { Outlet::<Route> {} },
        Some(Navigation::Redirect { to, reason }) => {
            tracing::info!(?reason, "Redirecting to {}", to);
            match to.parse::<Route>() {
                Ok(route) => {
                    nav.replace(route);
                }
                Err(e) => tracing::error!("Failed to route redirect to {}: {}", to, e),
            }
            rsx! {}
        }
        None => rsx! {
            div { class: "page",
                p { class: "guard-pending", "Loading..." }
            }
        },
    }
}
