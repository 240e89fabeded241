//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body, http::Request};

use timesheet::api::AppState;
use timesheet::api::app;
use timesheet::core::AppConfig;

const BOUNDARY: &str = "timesheet-test-boundary";

pub fn test_config() -> AppConfig {
    AppConfig {
        local_tz: chrono_tz::UTC,
        allowed_ics_hosts: vec![String::from("outlook.office365.com")],
        fetch_timeout: Duration::from_secs(5),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Creates a test application router. The app holds no mutable state
/// so tests can run in parallel.
pub fn test_app() -> Router {
    let app_state = AppState::new(test_config()).expect("Failed to build app state");
    app(Arc::new(app_state))
}

pub fn week_calendar() -> Vec<u8> {
    std::fs::read("./tests/data/week.ics").expect("Missing calendar fixture")
}

/// Build a multipart POST with the given text fields and an optional
/// uploaded calendar.
pub fn multipart_request(uri: &str, fields: &[(&str, &str)], file: Option<&[u8]>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"calendar.ics\"\r\nContent-Type: text/calendar\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).expect("Response was not JSON")
}
