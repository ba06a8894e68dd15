//! Check orchestration: dispatches requested probes and aggregates their
//! outcomes into a single report.

use std::time::Duration;

use chrono::Utc;
use log::debug;

use crate::error::LookupError;
use crate::normalize::normalize_target;
use crate::probes;
use crate::types::{
    CheckKind, DnsOutcome, HttpOutcome, LookupReport, LookupRequest, Overall, TcpOutcome,
};

/// Deadline for the DNS resolution probe.
const DNS_DEADLINE: Duration = Duration::from_secs(2);
/// Deadline for the TCP dial probe.
const TCP_DEADLINE: Duration = Duration::from_secs(3);
/// Outer deadline for the HTTP probe; the per-request `timeout_ms` option
/// can only shrink it.
const HTTP_DEADLINE: Duration = Duration::from_secs(5);

/// Most checks a single request may run; entries past this position are
/// silently ignored.
const MAX_CHECKS: usize = 3;

/// Entry point for health-check lookups.
///
/// Stateless; the lookup is an async associated function, no instance
/// needed.
pub struct LookupService;

impl LookupService {
    /// Normalize `request.query`, run the requested checks sequentially, and
    /// aggregate their outcomes.
    ///
    /// Each check runs under its own deadline and a failing probe never
    /// aborts the ones after it. Duplicate kinds execute once, at their
    /// first occurrence; at most [`MAX_CHECKS`] positions of the request
    /// list are considered. Kinds that were not requested keep their
    /// zero-valued outcome in the report.
    ///
    /// # Errors
    ///
    /// [`LookupError::MalformedTarget`] when the query cannot be
    /// canonicalized; no probe runs in that case.
    pub async fn lookup(request: &LookupRequest) -> Result<LookupReport, LookupError> {
        let target = normalize_target(&request.query)?;
        debug!(
            "lookup for {:?}: normalized {} (host {})",
            request.query, target.url, target.host
        );

        let mut report = LookupReport {
            query: request.query.clone(),
            normalized: target.url.clone(),
            host: target.host.clone(),
            timestamp: Utc::now(),
            overall: Overall::Up,
            dns: DnsOutcome::default(),
            tcp: TcpOutcome::default(),
            http: HttpOutcome::default(),
        };

        let mut seen = [false; CheckKind::COUNT];
        for &kind in request.checks.iter().take(MAX_CHECKS) {
            if seen[kind.index()] {
                continue;
            }
            seen[kind.index()] = true;

            match kind {
                CheckKind::Dns => {
                    report.dns = probes::dns::probe_dns(&target.host, DNS_DEADLINE).await;
                }
                CheckKind::Tcp => {
                    let options = request.tcp.unwrap_or_default();
                    report.tcp = probes::tcp::probe_tcp(&target.host, options, TCP_DEADLINE).await;
                }
                CheckKind::Http => {
                    let options = request.http.clone().unwrap_or_default();
                    report.http =
                        probes::http::probe_http(&target.url, &options, HTTP_DEADLINE).await;
                }
            }
        }

        // The aggregate only looks at the HTTP outcome, even when the HTTP
        // check was never requested.
        report.overall = if report.http.error.is_some() {
            Overall::Down
        } else {
            Overall::Up
        };

        Ok(report)
    }
}
