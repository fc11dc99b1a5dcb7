use serde::de::DeserializeOwned;

use super::{Capabilities, Csv, Format, Json, SimpleCodec, Xml};

pub trait Decoder<T, F: Format> {
    fn decode(&self, input: &[u8]) -> Result<T, DecodeError>;
}

/// The display text is sent back to the client verbatim.
#[derive(Debug, derive_more::Display)]
pub enum DecodeError {
    #[display("{reason}")]
    Json { reason: String },
    #[display("{reason}")]
    Xml { reason: String },
    #[display("{reason}")]
    Csv { reason: String },
    #[display("{reason}")]
    UrlEncoded { reason: String },
    #[display("{format} decoding not implemented for {type_name}")]
    CapabilityMissing {
        format: &'static str,
        type_name: &'static str,
    },
}

impl std::error::Error for DecodeError {}

impl DecodeError {
    pub fn csv(reason: impl Into<String>) -> Self {
        DecodeError::Csv {
            reason: reason.into(),
        }
    }
}

impl<T> Decoder<T, Json> for SimpleCodec
where
    T: DeserializeOwned,
{
    fn decode(&self, input: &[u8]) -> Result<T, DecodeError> {
        serde_json::from_slice(input).map_err(|e| DecodeError::Json {
            reason: e.to_string(),
        })
    }
}

impl<T> Decoder<T, Xml> for SimpleCodec
where
    T: DeserializeOwned,
{
    fn decode(&self, input: &[u8]) -> Result<T, DecodeError> {
        super::xml::from_slice(input).map_err(|reason| DecodeError::Xml { reason })
    }
}

impl<T> Decoder<T, Csv> for SimpleCodec
where
    T: Capabilities,
{
    fn decode(&self, input: &[u8]) -> Result<T, DecodeError> {
        let Some(decode) = T::csv_decode() else {
            return Err(DecodeError::CapabilityMissing {
                format: Csv::ID,
                type_name: std::any::type_name::<T>(),
            });
        };

        decode(input)
    }
}

#[cfg(feature = "serde_urlencoded")]
impl<T> Decoder<T, super::UrlEncoded> for SimpleCodec
where
    T: DeserializeOwned,
{
    fn decode(&self, input: &[u8]) -> Result<T, DecodeError> {
        serde_urlencoded::from_bytes(input).map_err(|e| DecodeError::UrlEncoded {
            reason: e.to_string(),
        })
    }
}
