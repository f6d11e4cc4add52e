//! # Browser cookie jar: `document.cookie`
//!
//! [`BrowserCookies`] is the [`CookieStore`] used on the **web platform**. It
//! reads and writes `document.cookie` directly, percent-encoding values the
//! same way cookies written by the previous front end were.
//!
//! Failures to reach the document (no window, not an HTML document) degrade to
//! "no cookie" on reads and are logged on writes.

use cookie::Cookie;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::cookies::{encode_cookie, find_cookie, CookieStore};

/// `document.cookie`-backed cookie store. Zero-sized; every call looks the
/// document up again.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCookies;

impl BrowserCookies {
    pub fn new() -> Self {
        Self
    }
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

impl CookieStore for BrowserCookies {
    fn get(&self, name: &str) -> Option<String> {
        let all = html_document()?.cookie().ok()?;
        find_cookie(&all, name)
    }

    fn set(&self, cookie: Cookie<'static>) {
        let Some(document) = html_document() else {
            tracing::error!("No document available, cookie {} not written", cookie.name());
            return;
        };
        if let Err(e) = document.set_cookie(&encode_cookie(&cookie)) {
            tracing::error!("Failed to write cookie {}: {:?}", cookie.name(), e);
        }
    }

    fn remove(&self, name: &str, path: &str) {
        let mut removal = Cookie::build((name.to_string(), ""))
            .path(path.to_string())
            .build();
        removal.make_removal();
        self.set(removal);
    }
}
