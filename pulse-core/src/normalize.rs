//! Target normalization.

use std::fmt::Write;

use url::Url;

use crate::error::LookupError;

/// A canonicalized probe target: absolute URL plus the extracted host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Absolute URL with lowercase host and no trailing slash on the path.
    pub url: String,
    /// Lowercase host, never empty. IPv6 hosts keep their bracket form so
    /// the `host:port` dial syntax stays valid.
    pub host: String,
}

/// Canonicalize a raw user-supplied target string.
///
/// Inputs without a scheme separator get an `https://` prefix before
/// parsing. Fails with [`LookupError::MalformedTarget`] when the string does
/// not parse as a URL or has no host. Pure function, no I/O.
pub fn normalize_target(raw: &str) -> Result<Target, LookupError> {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| LookupError::MalformedTarget(e.to_string()))?;

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_lowercase(),
        _ => return Err(LookupError::MalformedTarget("missing host".to_string())),
    };

    // Rebuilt by hand rather than via Url::to_string: the url crate insists
    // on a "/" path for http(s) URLs, and the canonical form drops it.
    let mut normalized = format!("{}://{host}", parsed.scheme());
    if let Some(port) = parsed.port() {
        let _ = write!(normalized, ":{port}");
    }
    normalized.push_str(parsed.path().trim_end_matches('/'));
    if let Some(query) = parsed.query() {
        let _ = write!(normalized, "?{query}");
    }
    if let Some(fragment) = parsed.fragment() {
        let _ = write!(normalized, "#{fragment}");
    }

    Ok(Target {
        url: normalized,
        host,
    })
}
