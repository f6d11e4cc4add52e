//! # Authentication configuration: `auth.toml`
//!
//! Route conventions and cookie settings shared by the token store and the
//! route guard. The file is optional: every field has a default, so a missing
//! or empty file is equivalent to [`AuthConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [routes]
//! login = "/auth/login"     # landing page for signed-out users
//! home = "/"                # where signed-in users are sent instead
//! admin_prefix = "/admin"   # paths under this prefix are gated by role
//! restricted_role = "user"  # level denied the admin area
//!
//! [cookie]
//! name = "token"
//! max_age_days = 7
//! ```

use serde::{Deserialize, Serialize};

use crate::session::Role;

/// Top-level configuration stored in `auth.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub cookie: CookieConfig,
}

/// Route conventions consulted by the guard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_login")]
    pub login: String,
    #[serde(default = "default_home")]
    pub home: String,
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
    #[serde(default = "default_restricted_role")]
    pub restricted_role: Role,
}

fn default_login() -> String {
    "/auth/login".to_string()
}

fn default_home() -> String {
    "/".to_string()
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_restricted_role() -> Role {
    Role::User
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login(),
            home: default_home(),
            admin_prefix: default_admin_prefix(),
            restricted_role: default_restricted_role(),
        }
    }
}

impl RoutesConfig {
    pub fn is_login(&self, path: &str) -> bool {
        path == self.login
    }

    pub fn is_admin(&self, path: &str) -> bool {
        path.starts_with(&self.admin_prefix)
    }
}

/// Settings of the cookie that persists the token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CookieConfig {
    #[serde(default = "default_cookie_name")]
    pub name: String,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_max_age_days() -> u32 {
    7
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            max_age_days: default_max_age_days(),
        }
    }
}

impl AuthConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "auth.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AuthConfig::from_toml("").unwrap();
        assert_eq!(config, AuthConfig::default());
        assert_eq!(config.routes.login, "/auth/login");
        assert_eq!(config.routes.restricted_role, Role::User);
        assert_eq!(config.cookie.name, "token");
        assert_eq!(config.cookie.max_age_days, 7);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = AuthConfig::from_toml(
            r#"
            [routes]
            admin_prefix = "/backoffice"
            restricted_role = "viewer"
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.admin_prefix, "/backoffice");
        assert_eq!(config.routes.restricted_role, Role::Other("viewer".to_string()));
        assert_eq!(config.routes.home, "/");
        assert_eq!(config.cookie, CookieConfig::default());
    }

    #[test]
    fn test_to_toml_parses_back() {
        let mut config = AuthConfig::default();
        config.cookie.max_age_days = 1;
        let text = config.to_toml().unwrap();
        assert_eq!(AuthConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_route_predicates() {
        let routes = RoutesConfig::default();
        assert!(routes.is_login("/auth/login"));
        assert!(!routes.is_login("/auth/login?next=/"));
        assert!(routes.is_admin("/admin"));
        assert!(routes.is_admin("/admin/users"));
        assert!(!routes.is_admin("/dashboard/admin"));
    }
}
