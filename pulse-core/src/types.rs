//! Request, outcome, and report types shared by the probes and the
//! orchestrator.
//!
//! Field renames keep the wire format of existing consumers: the attempted
//! flag travels as `skipped`, probe errors as `{"type": ..., "message": ...}`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Kind of network check a request can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Resolve the host's addresses.
    Dns,
    /// Dial the host on a given port.
    Tcp,
    /// Issue one HTTP request against the full URL.
    Http,
}

impl CheckKind {
    /// Number of kinds; sizes the orchestrator's fixed seen-set.
    pub(crate) const COUNT: usize = 3;

    /// Stable position of the kind in a fixed-size table.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Dns => 0,
            Self::Tcp => 1,
            Self::Http => 2,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dns => write!(f, "dns"),
            Self::Tcp => write!(f, "tcp"),
            Self::Http => write!(f, "http"),
        }
    }
}

impl FromStr for CheckKind {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dns" => Ok(Self::Dns),
            "tcp" => Ok(Self::Tcp),
            "http" => Ok(Self::Http),
            _ => Err(LookupError::InvalidCheckKind(s.to_string())),
        }
    }
}

/// TCP probe options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TcpOptions {
    /// Destination port for the reachability dial.
    #[serde(default)]
    pub port: u16,
}

/// HTTP probe options.
///
/// `method` is required when the HTTP check is requested and must be one of
/// GET, POST, PUT, PATCH, or DELETE.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpOptions {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub follow_redirects: bool,
    /// Per-request timeout; the probe's own deadline can only shrink it.
    #[serde(default)]
    pub timeout_ms: u64,
}

/// A validated lookup request as consumed by the orchestrator.
///
/// Check kinds have already been validated at the boundary; the query string
/// is normalized by the orchestrator itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupRequest {
    /// Raw target: bare host, host:port, or full URL.
    pub query: String,
    /// Requested checks, in order.
    #[serde(default)]
    pub checks: Vec<CheckKind>,
    #[serde(default)]
    pub tcp: Option<TcpOptions>,
    #[serde(default)]
    pub http: Option<HttpOptions>,
}

/// Classification of a probe-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The check does not apply to this target (DNS on a literal address).
    NotApplicable,
    ResolutionFailed,
    ConnectionFailed,
    InvalidMethod,
    BuildFailed,
    RequestFailed,
}

/// Probe-level error carried inside an outcome.
///
/// Never aborts sibling probes or the overall response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of the DNS resolution probe.
///
/// `ms` is `-1` when resolution failed outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnsOutcome {
    /// Whether the probe actually ran.
    #[serde(rename = "skipped")]
    pub attempted: bool,
    pub ok: bool,
    #[serde(default)]
    pub ms: i64,
    /// Resolved IPv4 addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub a: Vec<String>,
    /// Resolved IPv6 addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aaaa: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Outcome of the TCP reachability probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TcpOutcome {
    /// Whether the probe actually ran.
    #[serde(rename = "skipped")]
    pub attempted: bool,
    pub ok: bool,
    #[serde(default)]
    pub ms: i64,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Outcome of the HTTP reachability probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpOutcome {
    /// Whether the probe actually ran.
    #[serde(rename = "skipped")]
    pub attempted: bool,
    pub ok: bool,
    #[serde(default)]
    pub ms: i64,
    /// HTTP status code of the final response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// URL the request resolved to after any followed redirects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Aggregate classification across attempted probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Overall {
    #[default]
    Up,
    /// Declared for the wire format; no current rule produces it.
    Degraded,
    Down,
}

impl fmt::Display for Overall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Degraded => write!(f, "DEGRADED"),
            Self::Down => write!(f, "DOWN"),
        }
    }
}

/// Result of a full lookup: the normalized target plus one outcome per check
/// kind. Outcomes for kinds that were not requested keep their zero value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupReport {
    pub query: String,
    /// Canonical absolute URL of the target.
    pub normalized: String,
    /// Extracted lowercase host.
    pub host: String,
    pub timestamp: DateTime<Utc>,
    pub overall: Overall,
    pub dns: DnsOutcome,
    pub tcp: TcpOutcome,
    pub http: HttpOutcome,
}
