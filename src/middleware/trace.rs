//! Per-request access logging.
//!
//! Emits one `info` event per request in the form `[<client ip>] <METHOD> <path>`.
//! The client ip honours `X-Forwarded-For`, see [`Request::client_ip`].

use tracing::info;

use crate::request::Request;

/// Formats the access-log line for `req`.
pub fn line(req: &Request) -> String {
    format!("[{}] {} {}", req.client_ip(), req.method(), req.path())
}

/// Records `req` in the access log.
pub fn record(req: &Request) {
    info!(target: "quotes::access", "{}", line(req));
}
