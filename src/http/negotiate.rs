use actix_web::http::header::{self, HeaderMap};

use super::{
    codec::{CodecEntry, CodecRegistry, DecodeError, EncodeError},
    error::HttpError,
};

/// Header selecting the outbound format. Optional, same `<anything>/<id>` shape as
/// `Content-type`.
pub const RESPONSE_TYPE: &str = "response-type";

/// Codecs resolved for one request.
#[derive(Debug)]
pub struct Negotiated<'a, In, Out> {
    pub inbound: &'a CodecEntry<In, Out>,
    pub outbound: &'a CodecEntry<In, Out>,
}

impl<In, Out> Negotiated<'_, In, Out> {
    pub fn decode(&self, input: &[u8]) -> Result<In, DecodeError> {
        self.inbound.decode(input)
    }

    pub fn encode(&self, value: &Out) -> Result<Vec<u8>, EncodeError> {
        self.outbound.encode(value)
    }
}

/// Resolves the inbound codec from `Content-type` and the outbound one from
/// `Response-type`.
///
/// A bad or unknown `Content-type` is an error. A bad or unknown `Response-type` is
/// not: the outbound format silently falls back to the inbound one.
pub fn negotiate<'a, In, Out>(
    headers: &HeaderMap,
    registry: &'a CodecRegistry<In, Out>,
) -> Result<Negotiated<'a, In, Out>, HttpError> {
    let inbound = format_id(headers, header::CONTENT_TYPE.as_str())
        .and_then(|id| registry.lookup(id))
        .ok_or(HttpError::UnsupportedFormat)?;

    let outbound = format_id(headers, RESPONSE_TYPE)
        .and_then(|id| registry.lookup(id))
        .unwrap_or(inbound);

    Ok(Negotiated { inbound, outbound })
}

/// `<anything>/<id>` yields `id`. Anything other than exactly two segments yields
/// nothing. Parameters such as `; charset=utf-8` are not stripped.
fn format_id<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    let value = headers.get(name)?.to_str().ok()?;
    let mut segments = value.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(id), None) => Some(id),
        _ => None,
    }
}
