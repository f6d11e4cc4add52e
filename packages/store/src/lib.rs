pub mod config;
pub mod cookies;
pub mod session;

mod memory;
pub use memory::MemoryCookies;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserCookies;

pub use config::{AuthConfig, CookieConfig, RoutesConfig};
pub use ::cookie::{Cookie, SameSite};
pub use cookies::{encode_cookie, find_cookie, token_cookie, CookieStore};
pub use session::{Profile, Role, Session};
