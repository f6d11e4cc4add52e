use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use uploads::{
    config::SpacesConfig,
    error::SignError,
    router,
    spaces::{SpacesSigner, UploadSigner},
    state::AppState,
};

struct BrokenSigner;

impl UploadSigner for BrokenSigner {
    fn presign_put(&self, _key: &str, _expires: Duration) -> Result<String, SignError> {
        Err(SignError::InvalidKey)
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://nowhere/{key}")
    }
}

fn spaces_app() -> axum::Router {
    let signer = SpacesSigner::new(&SpacesConfig {
        key: "key".to_string(),
        secret: "secret".to_string(),
        bucket: "press".to_string(),
        region: "sgp1".to_string(),
    });
    router(AppState::with_signer(signer))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(spaces_app(), "/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Server is running");
}

#[tokio::test]
async fn test_generate_url() {
    let (status, body) = get(spaces_app(), "/generate-url?filename=cat.png").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);

    let file_url = json["fileUrl"].as_str().unwrap();
    let key = file_url
        .strip_prefix("https://press.sgp1.digitaloceanspaces.com/")
        .unwrap();
    let (millis, name) = key.split_once('_').unwrap();
    assert!(millis.parse::<i64>().is_ok());
    assert_eq!(name, "cat.png");

    let upload_url = json["uploadUrl"].as_str().unwrap();
    assert!(upload_url.starts_with(&format!("{file_url}?")));
    assert!(upload_url.contains("X-Amz-Expires=60"));
    assert!(upload_url.contains("x-amz-acl=public-read"));
    assert!(upload_url.contains("X-Amz-Signature="));
}

#[tokio::test]
async fn test_signing_failure_is_500() {
    let app = router(AppState::with_signer(BrokenSigner));
    let (status, body) = get(app, "/generate-url?filename=cat.png").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("signing key"));
}

#[tokio::test]
async fn test_missing_filename_is_400() {
    for uri in ["/generate-url", "/generate-url?filename="] {
        let (status, body) = get(spaces_app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
    }
}
