//! Server configuration, read from the environment (and `.env` via `dotenvy`).
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PORT` | `3001` | Listen port |
//! | `DO_SPACE_KEY` | required | Spaces access key |
//! | `DO_SPACE_SECRET` | required | Spaces secret key |
//! | `DO_SPACE_NAME` | required | Bucket (Space) name |
//! | `DO_SPACE_REGION` | `sgp1` | Spaces region |

use std::{env, fmt::Display, str::FromStr};

use tracing::info;

use crate::error::ConfigError;

pub struct Config {
    pub port: u16,
    pub spaces: SpacesConfig,
}

/// Credentials and location of the Space uploads go to.
#[derive(Clone)]
pub struct SpacesConfig {
    pub key: String,
    pub secret: String,
    pub bucket: String,
    pub region: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: try_load("PORT", "3001")?,
            spaces: SpacesConfig {
                key: require("DO_SPACE_KEY")?,
                secret: require("DO_SPACE_SECRET")?,
                bucket: require("DO_SPACE_NAME")?,
                region: try_load("DO_SPACE_REGION", "sgp1")?,
            },
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        })
}
