//! The lookup endpoint: decode, validate, orchestrate, encode.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use pulse_core::{CheckKind, HttpOptions, LookupRequest, LookupService, TcpOptions};

/// Inbound request body before check-kind validation.
#[derive(Debug, Deserialize)]
struct RawLookupRequest {
    query: String,
    #[serde(default)]
    checks: Vec<String>,
    #[serde(default)]
    tcp: Option<TcpOptions>,
    #[serde(default)]
    http: Option<HttpOptions>,
}

/// Single-field error body for request-level failures.
#[derive(Debug, Serialize, Deserialize)]
struct ApiError {
    error: String,
}

/// JSON decode failures come back as the same single-field error body.
pub(super) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = HttpResponse::BadRequest().json(ApiError {
            error: "request body is in an unreadable form".to_string(),
        });
        actix_web::error::InternalError::from_response(err, body).into()
    })
}

#[post("/api/lookup")]
pub(super) async fn lookup(body: web::Json<RawLookupRequest>) -> HttpResponse {
    let body = body.into_inner();

    // Every requested kind is validated before any check runs; one unknown
    // kind rejects the whole request.
    let mut checks = Vec::with_capacity(body.checks.len());
    for raw in &body.checks {
        match raw.parse::<CheckKind>() {
            Ok(kind) => checks.push(kind),
            Err(e) => {
                return HttpResponse::BadRequest().json(ApiError {
                    error: e.to_string(),
                })
            }
        }
    }

    let request = LookupRequest {
        query: body.query,
        checks,
        tcp: body.tcp,
        http: body.http,
    };

    match LookupService::lookup(&request).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => HttpResponse::BadRequest().json(ApiError {
            error: e.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    async fn post_lookup(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(App::new().configure(crate::routes::routes)).await;
        let req = test::TestRequest::post()
            .uri("/api/lookup")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_unknown_check_kind_is_rejected() {
        let (status, body) = post_lookup(json!({
            "query": "example.com",
            "checks": ["dns", "ping"]
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid check: \"ping\"");
    }

    #[actix_web::test]
    async fn test_malformed_target_is_rejected() {
        let (status, body) = post_lookup(json!({"query": "https://"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid url: "));
    }

    #[actix_web::test]
    async fn test_empty_check_list_returns_zero_outcomes() {
        let (status, body) = post_lookup(json!({"query": "example.com"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["normalized"], "https://example.com");
        assert_eq!(body["host"], "example.com");
        assert_eq!(body["overall"], "UP");
        assert_eq!(body["dns"]["skipped"], false);
        assert_eq!(body["tcp"]["skipped"], false);
        assert_eq!(body["http"]["skipped"], false);
    }

    #[actix_web::test]
    async fn test_unreadable_body_is_rejected() {
        // Missing required `query` field fails JSON decoding.
        let (status, body) = post_lookup(json!({"checks": ["dns"]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "request body is in an unreadable form");
    }

    #[actix_web::test]
    async fn test_healthz_is_ok() {
        let app = test::init_service(App::new().configure(crate::routes::routes)).await;
        let req = test::TestRequest::get().uri("/healthz").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    #[ignore = "requires network access"]
    async fn test_full_lookup_against_live_target() {
        let (status, body) = post_lookup(json!({
            "query": "example.com",
            "checks": ["dns", "tcp", "http"],
            "tcp": {"port": 443},
            "http": {"method": "GET", "timeout_ms": 5000}
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["normalized"], "https://example.com");
        assert_eq!(body["dns"]["skipped"], true);
        assert_eq!(body["tcp"]["skipped"], true);
        assert_eq!(body["http"]["skipped"], true);
        assert!(body["overall"] == "UP" || body["overall"] == "DOWN");
    }
}
