//! Kubernetes health-check handlers.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the store be reached? Failure → pulled from load-balancer. |

use std::sync::Arc;

use tracing::warn;

use super::error::ErrorBody;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::store::QuoteStore;

/// Always `200 OK` with body `"ok"`. No dependencies.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"` once the store answers a ping, `503` otherwise.
pub async fn readiness(store: Arc<dyn QuoteStore>, _req: Request) -> Response {
    match store.ping().await {
        Ok(()) => Response::text("ready"),
        Err(err) => {
            warn!("readiness check failed: {err}");
            Response::json_value(Status::ServiceUnavailable, &ErrorBody { error: err.to_string() })
        }
    }
}
