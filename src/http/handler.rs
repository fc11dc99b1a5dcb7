use actix_web::{HttpRequest, http::Method, web};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;

use super::{
    codec::CodecRegistry, error::HttpError, negotiate::negotiate, response::Encoded,
};
use crate::message::{self, Message, Reply};

pub type ProcessRegistry = CodecRegistry<Message, Reply>;

/// Upper bound on request bodies. `None` reads bodies of any size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyLimit {
    pub max_bytes: Option<usize>,
}

/// `POST /process`: read, decode, transform, encode, write.
///
/// Nothing is written until encoding succeeded, so a failure never leaves a
/// partial body behind.
#[tracing::instrument(name = "process", skip_all, fields(method = %req.method()))]
pub async fn process(
    req: HttpRequest,
    payload: web::Payload,
    registry: web::Data<ProcessRegistry>,
) -> Result<Encoded, HttpError> {
    let result = handle(&req, payload, &registry).await;
    if let Err(err) = &result {
        tracing::debug!(error = %err, "request rejected");
    }
    result
}

async fn handle(
    req: &HttpRequest,
    payload: web::Payload,
    registry: &ProcessRegistry,
) -> Result<Encoded, HttpError> {
    if req.method() != Method::POST {
        return Err(HttpError::MethodNotAllowed);
    }

    let negotiated = negotiate(req.headers(), registry)?;
    tracing::debug!(
        inbound = negotiated.inbound.id(),
        outbound = negotiated.outbound.id(),
        "formats negotiated"
    );

    let limit = req
        .app_data::<web::Data<BodyLimit>>()
        .map(|limit| *limit.get_ref())
        .unwrap_or_default();
    let body = read_body(payload, limit).await?;

    let message = negotiated.decode(&body)?;
    let reply = message::process(&message);
    let body = negotiated.encode(&reply)?;

    Ok(Encoded::new(body, negotiated.outbound.content_type()))
}

async fn read_body(mut payload: web::Payload, limit: BodyLimit) -> Result<Bytes, HttpError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            tracing::debug!(error = %err, "read request body");
            HttpError::ReadBody
        })?;

        if let Some(max) = limit.max_bytes {
            if body.len() + chunk.len() > max {
                tracing::debug!(max, "request body over limit");
                return Err(HttpError::ReadBody);
            }
        }
        body.extend_from_slice(&chunk);
    }

    if body.is_empty() {
        return Err(HttpError::EmptyBody);
    }

    Ok(body.freeze())
}
