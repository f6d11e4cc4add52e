//! Upload targets in a DigitalOcean Space.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::SpacesConfig;
use crate::error::SignError;
use crate::presign::{encode_path, PresignRequest, SigV4};

/// How long an issued upload URL stays valid.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(60);

/// Issues upload URLs for object keys.
pub trait UploadSigner: Send + Sync {
    /// Pre-signed URL allowing one `PUT` of `key` for `expires`.
    fn presign_put(&self, key: &str, expires: Duration) -> Result<String, SignError>;
    /// Where the object can be read once uploaded.
    fn public_url(&self, key: &str) -> String;
}

/// Object key and lifetime of one upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTarget {
    /// `<unix-millis>_<original name>`, so repeated uploads of one name do not collide.
    pub file_name: String,
    pub expires_in: Duration,
}

impl UploadTarget {
    pub fn new(original_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            file_name: format!("{}_{}", now.timestamp_millis(), original_name),
            expires_in: UPLOAD_URL_TTL,
        }
    }
}

/// Signs public-read uploads into one Space.
pub struct SpacesSigner {
    sigv4: SigV4,
    host: String,
}

impl SpacesSigner {
    pub fn new(config: &SpacesConfig) -> Self {
        Self {
            sigv4: SigV4::new(&config.key, &config.secret, &config.region, "s3"),
            host: format!("{}.{}.digitaloceanspaces.com", config.bucket, config.region),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl UploadSigner for SpacesSigner {
    fn presign_put(&self, key: &str, expires: Duration) -> Result<String, SignError> {
        self.sigv4.presign(&PresignRequest {
            method: "PUT",
            host: &self.host,
            path: &format!("/{key}"),
            query: vec![("x-amz-acl".to_string(), "public-read".to_string())],
            expires,
            at: Utc::now(),
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://{}{}", self.host, encode_path(&format!("/{key}")))
    }
}
