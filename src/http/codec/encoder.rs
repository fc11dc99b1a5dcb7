use serde::Serialize;

use super::{Capabilities, Csv, Format, Json, SimpleCodec, Xml};

pub trait Encoder<T, F: Format> {
    fn encode(&self, input: &T) -> Result<Vec<u8>, EncodeError>;
}

#[derive(Debug, derive_more::Display)]
pub enum EncodeError {
    #[display("encode json error: {reason}")]
    Json { reason: String },
    #[display("encode xml error: {reason}")]
    Xml { reason: String },
    #[display("encode csv error: {reason}")]
    Csv { reason: String },
    #[display("encode urlencoded error: {reason}")]
    UrlEncoded { reason: String },
    #[display("{format} encoding not implemented for {type_name}")]
    CapabilityMissing {
        format: &'static str,
        type_name: &'static str,
    },
}

impl std::error::Error for EncodeError {}

impl<T> Encoder<T, Json> for SimpleCodec
where
    T: Serialize,
{
    fn encode(&self, input: &T) -> Result<Vec<u8>, EncodeError> {
        serde_json::to_vec(input).map_err(|e| EncodeError::Json {
            reason: e.to_string(),
        })
    }
}

impl<T> Encoder<T, Xml> for SimpleCodec
where
    T: Serialize,
{
    fn encode(&self, input: &T) -> Result<Vec<u8>, EncodeError> {
        quick_xml::se::to_string(input)
            .map(String::into_bytes)
            .map_err(|e| EncodeError::Xml {
                reason: e.to_string(),
            })
    }
}

impl<T> Encoder<T, Csv> for SimpleCodec
where
    T: Capabilities,
{
    fn encode(&self, input: &T) -> Result<Vec<u8>, EncodeError> {
        let Some(csv) = input.as_csv_encode() else {
            return Err(EncodeError::CapabilityMissing {
                format: Csv::ID,
                type_name: std::any::type_name::<T>(),
            });
        };

        csv.encode_csv()
    }
}

#[cfg(feature = "serde_urlencoded")]
impl<T> Encoder<T, super::UrlEncoded> for SimpleCodec
where
    T: Serialize,
{
    fn encode(&self, input: &T) -> Result<Vec<u8>, EncodeError> {
        serde_urlencoded::to_string(input)
            .map(String::into_bytes)
            .map_err(|e| EncodeError::UrlEncoded {
                reason: e.to_string(),
            })
    }
}
