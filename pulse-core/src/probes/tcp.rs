//! TCP reachability probe.

use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::elapsed_ms;
use crate::types::{ErrorInfo, ErrorKind, TcpOptions, TcpOutcome};

/// Dial `host:port` under `deadline` and report whether the connection was
/// accepted.
///
/// The stream is dropped as soon as it is established; the probe tests
/// reachability only, no data is exchanged. A deadline hit is
/// indistinguishable from any other dial failure; both report
/// `ConnectionFailed`.
pub(crate) async fn probe_tcp(host: &str, options: TcpOptions, deadline: Duration) -> TcpOutcome {
    let mut outcome = TcpOutcome {
        attempted: true,
        ..TcpOutcome::default()
    };

    let address = format!("{host}:{}", options.port);
    debug!("[TCP] dialing {address}");
    let start = Instant::now();

    match timeout(deadline, TcpStream::connect(&address)).await {
        Ok(Ok(stream)) => {
            outcome.ms = elapsed_ms(start);
            outcome.port = options.port;
            outcome.ok = true;
            drop(stream);
        }
        Ok(Err(e)) => {
            warn!("[TCP] dial failed for {address}: {e}");
            outcome.error = Some(ErrorInfo::new(
                ErrorKind::ConnectionFailed,
                "tcp connection failed",
            ));
        }
        Err(_) => {
            warn!("[TCP] dial timed out for {address} after {deadline:?}");
            outcome.error = Some(ErrorInfo::new(
                ErrorKind::ConnectionFailed,
                "tcp connection failed",
            ));
        }
    }

    outcome
}
