use std::sync::Arc;

use cookie::{Cookie, CookieJar};
use parking_lot::Mutex;

use crate::cookies::{encode_cookie, CookieStore};

/// In-memory cookie jar for server-rendered requests, native builds and
/// tests. Clones share the jar.
///
/// Cookies that arrived with a request are added as originals, so
/// [`set_cookie_headers`](Self::set_cookie_headers) only reports what changed
/// while handling it.
#[derive(Clone, Debug, Default)]
pub struct MemoryCookies {
    jar: Arc<Mutex<CookieJar>>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the jar from a request's `Cookie` header, decoding values.
    ///
    /// Unparseable pairs are skipped.
    pub fn from_header(header: &str) -> Self {
        let mut jar = CookieJar::new();
        for parsed in Cookie::split_parse_encoded(header.to_string()) {
            match parsed {
                Ok(cookie) => jar.add_original(cookie.into_owned()),
                Err(e) => tracing::debug!("Skipping malformed cookie: {}", e),
            }
        }
        Self {
            jar: Arc::new(Mutex::new(jar)),
        }
    }

    /// Encoded `Set-Cookie` values for every cookie added or removed since
    /// the jar was seeded.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.jar.lock().delta().map(encode_cookie).collect()
    }
}

impl CookieStore for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.lock().get(name).map(|c| c.value().to_string())
    }

    fn set(&self, cookie: Cookie<'static>) {
        self.jar.lock().add(cookie);
    }

    fn remove(&self, name: &str, path: &str) {
        self.jar
            .lock()
            .remove(Cookie::build((name.to_string(), "")).path(path.to_string()));
    }
}
