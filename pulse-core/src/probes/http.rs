//! HTTP reachability probe.

use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::{redirect, Client, Method};

use super::elapsed_ms;
use crate::types::{ErrorInfo, ErrorKind, HttpOptions, HttpOutcome};

/// Map a method string onto the allow-list. Case-sensitive; anything outside
/// the list (including the empty string) is a validation failure.
fn parse_method(method: &str) -> Option<Method> {
    match method {
        "GET" => Some(Method::GET),
        "POST" => Some(Method::POST),
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Issue exactly one request against `url` under the given outer deadline.
///
/// The effective timeout is the smaller of `deadline` and the per-request
/// `timeout_ms` option. When `follow_redirects` is off, the first redirect
/// response is captured as the final outcome rather than followed or treated
/// as an error. The probe never retries.
pub(crate) async fn probe_http(
    url: &str,
    options: &HttpOptions,
    deadline: Duration,
) -> HttpOutcome {
    let mut outcome = HttpOutcome::default();

    let Some(method) = parse_method(&options.method) else {
        outcome.error = Some(ErrorInfo::new(
            ErrorKind::InvalidMethod,
            "invalid or missing http method",
        ));
        return outcome;
    };

    outcome.attempted = true;

    let effective = deadline.min(Duration::from_millis(options.timeout_ms));
    let policy = if options.follow_redirects {
        redirect::Policy::default()
    } else {
        redirect::Policy::none()
    };

    // Per-call client: the redirect policy is immutable per-request
    // configuration, never shared mutable state.
    let client = match Client::builder().redirect(policy).timeout(effective).build() {
        Ok(client) => client,
        Err(e) => {
            warn!("[HTTP] client construction failed: {e}");
            outcome.error = Some(ErrorInfo::new(
                ErrorKind::BuildFailed,
                "could not create request",
            ));
            return outcome;
        }
    };

    debug!("[HTTP] {method} {url} (timeout {effective:?})");
    let start = Instant::now();

    let response = match client.request(method, url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("[HTTP] request failed for {url}: {e}");
            outcome.error = Some(ErrorInfo::new(ErrorKind::RequestFailed, "request failed"));
            return outcome;
        }
    };

    outcome.ms = elapsed_ms(start);
    outcome.ok = true;
    outcome.status = Some(response.status().as_u16());
    outcome.final_url = Some(response.url().to_string());
    outcome
}
