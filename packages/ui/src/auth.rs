//! Session context and hooks for the UI.

use api::{ApiClient, ApiConfig, AuthConfig, TokenStore};
use dioxus::prelude::*;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformCookies = store::BrowserCookies;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformCookies = store::MemoryCookies;

/// The token store used by the app.
pub type WebSession = TokenStore<PlatformCookies, ApiClient>;

/// API base used when none was configured at build time.
const FALLBACK_API_BASE: &str = "http://localhost:8000/api";

/// Where the account API lives: the runtime environment (and `.env`) on
/// native builds, the build environment in the browser.
fn api_config() -> ApiConfig {
    #[cfg(not(target_arch = "wasm32"))]
    let configured = ApiConfig::from_env().or_else(|_| ApiConfig::from_build_env());
    #[cfg(target_arch = "wasm32")]
    let configured = ApiConfig::from_build_env();

    configured.unwrap_or_else(|e| {
        tracing::warn!("{}, using {}", e, FALLBACK_API_BASE);
        ApiConfig::new(FALLBACK_API_BASE)
    })
}

/// Build the session for this tab: cookies from the platform, the account API
/// from the environment.
pub fn make_session(config: &AuthConfig) -> WebSession {
    TokenStore::with_config(
        PlatformCookies::new(),
        ApiClient::new(api_config()),
        config.cookie.clone(),
    )
}

/// The session of the current tab.
pub fn use_session() -> WebSession {
    use_context::<WebSession>()
}

pub fn use_auth_config() -> AuthConfig {
    use_context::<AuthConfig>()
}

/// Provides the session and the auth configuration to everything below it.
#[component]
pub fn SessionProvider(config: AuthConfig, children: Element) -> Element {
    let provided = config.clone();
    use_context_provider(move || make_session(&provided));
    use_context_provider(move || config);

    rsx! {
        {children}
    }
}

/// Signs in with an access token issued by the account API.
#[component]
pub fn TokenLoginForm(
    on_signed_in: EventHandler<()>,
    #[props(default = "Sign in".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();
    let mut token = use_signal(String::new);
    let mut failed = use_signal(|| false);
    let mut loading = use_signal(|| false);

    let onsubmit = move |event: FormEvent| {
        event.prevent_default();
        let session = session.clone();
        async move {
            let value = token().trim().to_string();
            if value.is_empty() {
                return;
            }
            loading.set(true);
            session.set_token(value);
            match session.fetch_user_role().await {
                Ok(_) => {
                    failed.set(false);
                    on_signed_in.call(());
                }
                Err(e) => {
                    tracing::error!("Failed to sign in: {}", e);
                    session.null_token();
                    failed.set(true);
                }
            }
            loading.set(false);
        }
    };

    rsx! {
        form {
            class: "{class}",
            onsubmit: onsubmit,
            input {
                r#type: "password",
                placeholder: "Access token",
                value: "{token}",
                oninput: move |event| token.set(event.value()),
            }
            button {
                r#type: "submit",
                disabled: loading(),
                if loading() {
                    "Signing in..."
                } else {
                    "{label}"
                }
            }
            if failed() {
                p { class: "login-error", "That token was not accepted." }
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    on_logout: EventHandler<()>,
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();

    let onclick = move |_| {
        let session = session.clone();
        async move {
            if let Err(e) = session.logout().await {
                tracing::error!("Failed to log out: {}", e);
            }
            on_logout.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
