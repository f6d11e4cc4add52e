//! # Session model: who is signed in, and as what
//!
//! The data held for one signed-in user, in memory, for the lifetime of a
//! browser tab or a server-rendered request.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Session`] | The bearer token plus the profile fields learned from the profile endpoint. |
//! | [`Profile`] | The `data.profile` object returned by `GET /get-my-profile`. |
//! | [`Role`] | The authorization tier (`level`) of a profile. |
//!
//! The profile fields of a [`Session`] (`role`, `name`, `status`) are only ever
//! set by [`Session::apply_profile`], which refuses to run without a token. They
//! are therefore present only when a token is present and a profile fetch
//! succeeded.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Authorization tier of a user, as reported by the profile `level` field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regular account. Denied the admin area by default.
    User,
    Admin,
    /// Any level this client does not know by name.
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Other(level) => level,
        }
    }
}

impl From<&str> for Role {
    fn from(level: &str) -> Self {
        match level {
            "user" => Role::User,
            "admin" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = String::deserialize(deserializer)?;
        Ok(Role::from(level.as_str()))
    }
}

/// Profile of the signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub level: Role,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// In-memory session state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub name: Option<String>,
    pub status: Option<String>,
}

impl Session {
    /// A session carrying only a token, profile not fetched yet.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Copy the profile fields into the session.
    ///
    /// Returns `false` and leaves the session untouched when there is no token.
    pub fn apply_profile(&mut self, profile: &Profile) -> bool {
        if self.token.is_none() {
            return false;
        }
        self.role = Some(profile.level.clone());
        self.name = profile.name.clone();
        self.status = profile.status.clone();
        true
    }

    /// Drop the token and everything learned from it.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_role(&self) -> bool {
        self.role.is_some()
    }
}
