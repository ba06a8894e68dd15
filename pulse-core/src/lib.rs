//! Multi-protocol health-check probes for pulse.
//!
//! Given a target host or URL, runs DNS resolution, TCP connectivity, and
//! HTTP reachability checks, each under its own deadline, and aggregates
//! the outcomes into a single report. All functionality is stateless; every
//! lookup stands alone and nothing persists across requests.

mod error;
mod normalize;
mod probes;
mod service;
mod types;

pub use error::LookupError;
pub use normalize::{normalize_target, Target};
pub use service::LookupService;
pub use types::{
    CheckKind, DnsOutcome, ErrorInfo, ErrorKind, HttpOptions, HttpOutcome, LookupReport,
    LookupRequest, Overall, TcpOptions, TcpOutcome,
};
