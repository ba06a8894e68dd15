//! DNS resolution probe.

use std::net::IpAddr;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use hickory_resolver::{
    config::{ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    TokioResolver,
};
use log::{debug, warn};
use tokio::time::timeout;

use super::elapsed_ms;
use crate::types::{DnsOutcome, ErrorInfo, ErrorKind};

/// Sentinel for `ms` when resolution failed outright.
const FAILED_MS: i64 = -1;

/// Shared resolver reused by every DNS probe.
///
/// Uses the host system configuration (e.g. `/etc/resolv.conf`); falls back
/// to Hickory's default upstream set when that cannot be loaded.
static RESOLVER: LazyLock<TokioResolver> = LazyLock::new(build_resolver);

fn build_resolver() -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(builder) => return builder.build(),
            Err(e) => {
                warn!("Failed to load system DNS configuration, falling back to defaults: {e}");
            }
        }
    }

    let provider = TokioConnectionProvider::default();
    TokioResolver::builder_with_config(ResolverConfig::default(), provider)
        .with_options(ResolverOpts::default())
        .build()
}

/// Parse a host as a literal IP address, accepting the URL bracket form for
/// IPv6.
fn literal_ip(host: &str) -> Option<IpAddr> {
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .ok()
}

/// Resolve `host` under `deadline` and partition the answers by IP version.
///
/// Literal IP addresses short-circuit with a `NotApplicable` error: a
/// validation outcome, not a network failure. Timeouts and resolver errors
/// both surface as `ResolutionFailed` with `ms = -1`.
pub(crate) async fn probe_dns(host: &str, deadline: Duration) -> DnsOutcome {
    let mut outcome = DnsOutcome::default();

    if literal_ip(host).is_some() {
        debug!("[DNS] {host} is a literal address, nothing to resolve");
        outcome.error = Some(ErrorInfo::new(
            ErrorKind::NotApplicable,
            "resolution not possible on a literal address",
        ));
        return outcome;
    }

    outcome.attempted = true;
    let start = Instant::now();

    let lookup = match timeout(deadline, RESOLVER.lookup_ip(host)).await {
        Ok(Ok(lookup)) => lookup,
        Ok(Err(e)) => {
            warn!("[DNS] resolution failed for {host}: {e}");
            outcome.ms = FAILED_MS;
            outcome.error = Some(ErrorInfo::new(
                ErrorKind::ResolutionFailed,
                format!("unable to resolve host: {e}"),
            ));
            return outcome;
        }
        Err(_) => {
            warn!("[DNS] resolution timed out for {host} after {deadline:?}");
            outcome.ms = FAILED_MS;
            outcome.error = Some(ErrorInfo::new(
                ErrorKind::ResolutionFailed,
                "resolution timed out",
            ));
            return outcome;
        }
    };

    outcome.ok = true;
    outcome.ms = elapsed_ms(start);
    for address in lookup.iter() {
        match address {
            IpAddr::V4(v4) => outcome.a.push(v4.to_string()),
            IpAddr::V6(v6) => outcome.aaaa.push(v6.to_string()),
        }
    }

    debug!(
        "[DNS] {host}: {} A, {} AAAA in {}ms",
        outcome.a.len(),
        outcome.aaaa.len(),
        outcome.ms
    );
    outcome
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DEADLINE: Duration = Duration::from_secs(2);

    // ==================== literal address tests ====================

    #[tokio::test]
    async fn test_literal_ipv4_is_not_attempted() {
        let outcome = probe_dns("93.184.216.34", DEADLINE).await;
        assert!(!outcome.attempted);
        assert!(!outcome.ok);
        assert_eq!(outcome.ms, 0);
        assert_eq!(outcome.error.unwrap().kind, ErrorKind::NotApplicable);
    }

    #[tokio::test]
    async fn test_literal_ipv6_bracket_form_is_not_attempted() {
        let outcome = probe_dns("[2001:db8::1]", DEADLINE).await;
        assert!(!outcome.attempted);
        assert_eq!(outcome.error.unwrap().kind, ErrorKind::NotApplicable);
    }

    #[test]
    fn test_literal_ip_parsing() {
        assert!(literal_ip("127.0.0.1").is_some());
        assert!(literal_ip("[::1]").is_some());
        assert!(literal_ip("::1").is_some());
        assert!(literal_ip("example.com").is_none());
    }

    // ==================== resolution tests ====================
    // NOTE: these depend on the host resolver; failures may be network issues

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_unresolvable_host_fails_with_sentinel() {
        let outcome = probe_dns("pulse-does-not-exist.invalid", DEADLINE).await;
        assert!(outcome.attempted);
        assert!(!outcome.ok);
        assert_eq!(outcome.ms, FAILED_MS);
        assert_eq!(outcome.error.unwrap().kind, ErrorKind::ResolutionFailed);
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_resolvable_host_partitions_addresses() {
        let outcome = probe_dns("example.com", DEADLINE).await;
        assert!(outcome.attempted);
        assert!(outcome.ok);
        assert!(outcome.ms >= 0);
        assert!(!outcome.a.is_empty() || !outcome.aaaa.is_empty());
        assert!(outcome.error.is_none());
    }
}
