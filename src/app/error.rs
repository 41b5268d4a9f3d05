//! The centralized error handler.
//!
//! Handlers return `Result<_, ApiError>`; this is the one place failures are
//! turned into HTTP responses.

use serde::Serialize;
use tracing::error;

use crate::gateway::GatewayError;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// JSON body of every non-2xx response that has one.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "Error")]
    pub error: String,
}

/// A failed request, ready to be rendered.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self.0 {
            GatewayError::Validation(_) | GatewayError::InvalidBody(_) => Status::BadRequest,
            GatewayError::NotFound(_) => Status::NotFound,
            GatewayError::Store(_) => Status::InternalServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.0 {
            // 404 carries no body.
            GatewayError::NotFound(_) => Response::status(status),
            GatewayError::Store(err) => {
                error!(error = ?err, "store call failed: {err}");
                Response::json_value(status, &ErrorBody { error: err.to_string() })
            }
            other => Response::json_value(status, &ErrorBody { error: other.to_string() }),
        }
    }
}
