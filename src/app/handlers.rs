//! Route handlers.

use serde::Serialize;

use super::error::ApiError;
use crate::gateway::{GatewayError, QuoteGateway};
use crate::quote::{NewQuote, Quote};
use crate::request::Request;
use crate::response::{Json, Response};
use crate::status::Status;

/// `GET /quotes`
pub async fn list_quotes(gateway: QuoteGateway, _req: Request) -> Result<Json<Vec<Quote>>, ApiError> {
    Ok(Json(gateway.list().await?))
}

/// `PUT /quotes`: `201` redirecting to the new quote.
///
/// A blank or non-object body fails validation like any other body missing
/// the required fields.
pub async fn create_quote(gateway: QuoteGateway, req: Request) -> Result<Response, ApiError> {
    let new = NewQuote::from_body(req.body())
        .map_err(|e| GatewayError::InvalidBody(e.to_string()))?;

    let id = gateway.create(new).await?;
    Ok(Response::redirect(Status::Created, &format!("/quotes/{id}")))
}

/// `GET /quotes/{id}`
pub async fn get_quote(gateway: QuoteGateway, req: Request) -> Result<Json<Quote>, ApiError> {
    let id = req.param("id").unwrap_or_default();
    Ok(Json(gateway.get_by_id(id).await?))
}

#[derive(Debug, Serialize)]
pub struct HostInfo {
    #[serde(rename = "Hostname")]
    pub hostname: String,
}

/// `GET /`: the name of the machine serving the request.
pub async fn hostname(_req: Request) -> Json<HostInfo> {
    Json(HostInfo {
        hostname: gethostname::gethostname().to_string_lossy().into_owned(),
    })
}
