//! Self-(de)serialization contracts for formats without a generic serializer.

use super::{DecodeError, EncodeError};

/// Builds `Self` from a CSV record.
pub trait CsvDecode: Sized {
    fn decode_csv(input: &[u8]) -> Result<Self, DecodeError>;
}

/// Writes `self` as a CSV record.
pub trait CsvEncode {
    fn encode_csv(&self) -> Result<Vec<u8>, EncodeError>;
}

/// Answers which self-(de)serialization contracts a type implements.
///
/// Every method defaults to "not implemented", so a type only opts into the
/// directions it actually supports. The CSV codec asks here first and fails
/// with `CapabilityMissing` on `None`.
///
/// ```ignore
/// impl Capabilities for Reply {
///     fn as_csv_encode(&self) -> Option<&dyn CsvEncode> {
///         Some(self)
///     }
/// }
/// ```
pub trait Capabilities: Sized {
    fn csv_decode() -> Option<fn(&[u8]) -> Result<Self, DecodeError>> {
        None
    }

    fn as_csv_encode(&self) -> Option<&dyn CsvEncode> {
        None
    }
}
