//! # AWS Signature Version 4 query-string pre-signing
//!
//! Produces URLs that carry their own credentials: anyone holding one may
//! perform exactly the signed request until it expires, without further
//! authentication. Works against any S3-compatible store, DigitalOcean Spaces
//! included.
//!
//! ## Algorithm
//!
//! 1. Build the canonical query: the `X-Amz-*` signing parameters plus any
//!    extra parameters, each name and value URI-encoded, sorted by name.
//! 2. Canonical request = method, encoded path, canonical query, the `host`
//!    header, the signed header list (`host`) and `UNSIGNED-PAYLOAD`, joined by
//!    newlines.
//! 3. String to sign = `AWS4-HMAC-SHA256`, timestamp, credential scope and the
//!    hex SHA-256 of the canonical request.
//! 4. Signing key = HMAC chain over date → region → service → `aws4_request`,
//!    seeded with `AWS4<secret>`.
//! 5. The hex HMAC of the string to sign is appended as `X-Amz-Signature`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};

use crate::error::SignError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";
const MAX_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Everything but the RFC 3986 unreserved characters.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Same as [`QUERY_ENCODE`], keeping path separators.
const PATH_ENCODE: &AsciiSet = &QUERY_ENCODE.remove(b'/');

pub fn encode_query_component(s: &str) -> String {
    utf8_percent_encode(s, QUERY_ENCODE).to_string()
}

pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ENCODE).to_string()
}

/// A request to pre-sign.
pub struct PresignRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    /// Unencoded absolute path, e.g. `/photos/cat 1.png`.
    pub path: &'a str,
    /// Extra query parameters to sign, unencoded.
    pub query: Vec<(String, String)>,
    pub expires: Duration,
    pub at: DateTime<Utc>,
}

/// Signs requests for one access key in one region and service.
#[derive(Clone)]
pub struct SigV4 {
    access_key: String,
    secret_key: String,
    region: String,
    service: String,
}

impl SigV4 {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
            service: service.into(),
        }
    }

    /// Pre-signed `https` URL for `request`.
    pub fn presign(&self, request: &PresignRequest<'_>) -> Result<String, SignError> {
        if request.expires < Duration::from_secs(1) || request.expires > MAX_EXPIRY {
            return Err(SignError::InvalidExpiry(request.expires));
        }

        let amz_date = request.at.format("%Y%m%dT%H%M%SZ").to_string();
        let date = request.at.format("%Y%m%d").to_string();
        let scope = format!("{date}/{}/{}/aws4_request", self.region, self.service);

        let mut params: Vec<(String, String)> = [
            ("X-Amz-Algorithm", ALGORITHM.to_string()),
            ("X-Amz-Credential", format!("{}/{scope}", self.access_key)),
            ("X-Amz-Date", amz_date.clone()),
            ("X-Amz-Expires", request.expires.as_secs().to_string()),
            ("X-Amz-SignedHeaders", "host".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .chain(request.query.iter().cloned())
        .map(|(k, v)| (encode_query_component(&k), encode_query_component(&v)))
        .collect();
        params.sort();

        let canonical_query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let canonical_uri = encode_path(request.path);

        let canonical_request = format!(
            "{}\n{}\n{}\nhost:{}\n\nhost\n{}",
            request.method, canonical_uri, canonical_query, request.host, UNSIGNED_PAYLOAD
        );
        let string_to_sign = format!(
            "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signing_key = self.signing_key(&date)?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        Ok(format!(
            "https://{}{}?{}&X-Amz-Signature={}",
            request.host, canonical_uri, canonical_query, signature
        ))
    }

    fn signing_key(&self, date: &str) -> Result<Vec<u8>, SignError> {
        let secret = format!("AWS4{}", self.secret_key);
        let key = hmac_sha256(secret.as_bytes(), date.as_bytes())?;
        let key = hmac_sha256(&key, self.region.as_bytes())?;
        let key = hmac_sha256(&key, self.service.as_bytes())?;
        hmac_sha256(&key, b"aws4_request")
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, SignError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SignError::InvalidKey)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
