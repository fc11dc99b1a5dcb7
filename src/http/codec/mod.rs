pub mod capability;
pub mod decoder;
pub mod encoder;
pub mod registry;
mod xml;

pub use capability::{Capabilities, CsvDecode, CsvEncode};
pub use decoder::{DecodeError, Decoder};
pub use encoder::{EncodeError, Encoder};
pub use registry::{CodecEntry, CodecRegistry, CodecRegistryBuilder, RegistryError};

/// Stateless codec backing every built-in format.
pub struct SimpleCodec;

/// A wire format known at compile time.
///
/// `ID` is the Format Identifier matched verbatim against the second segment of the
/// `Content-type` / `Response-type` headers. `MIME` is the content type written on
/// responses; its second segment is `ID` again.
pub trait Format {
    const ID: &'static str;
    const MIME: &'static str;
}

pub struct Json;

impl Format for Json {
    const ID: &'static str = "json";
    const MIME: &'static str = "application/json";
}

pub struct Xml;

impl Format for Xml {
    const ID: &'static str = "xml";
    const MIME: &'static str = "application/xml";
}

/// Positional single-record CSV. There is no generic serializer for it, every
/// value brings its own through [`Capabilities`].
pub struct Csv;

impl Format for Csv {
    const ID: &'static str = "csv";
    const MIME: &'static str = "text/csv";
}

#[cfg(feature = "serde_urlencoded")]
pub struct UrlEncoded;

#[cfg(feature = "serde_urlencoded")]
impl Format for UrlEncoded {
    const ID: &'static str = "x-www-form-urlencoded";
    const MIME: &'static str = "application/x-www-form-urlencoded";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn second_segment(mime: &str) -> Option<&str> {
        let mut segments = mime.split('/');
        let _ = segments.next()?;
        let id = segments.next()?;
        segments.next().is_none().then_some(id)
    }

    #[test]
    fn mime_echoes_format_id() {
        assert_eq!(second_segment(Json::MIME), Some(Json::ID));
        assert_eq!(second_segment(Xml::MIME), Some(Xml::ID));
        assert_eq!(second_segment(Csv::MIME), Some(Csv::ID));
        #[cfg(feature = "serde_urlencoded")]
        assert_eq!(second_segment(UrlEncoded::MIME), Some(UrlEncoded::ID));
    }
}
