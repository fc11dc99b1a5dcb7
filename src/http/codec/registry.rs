use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};

use super::{
    Capabilities, Csv, DecodeError, Decoder, EncodeError, Encoder, Format, Json, SimpleCodec, Xml,
};

pub type DecodeFn<T> = fn(&[u8]) -> Result<T, DecodeError>;

pub type EncodeFn<T> = fn(&T) -> Result<Vec<u8>, EncodeError>;

/// Decode and encode functions bound to one Format Identifier.
pub struct CodecEntry<In, Out> {
    id: &'static str,
    content_type: &'static str,
    decode: DecodeFn<In>,
    encode: EncodeFn<Out>,
}

// fn pointers are Copy whatever `In` and `Out` are, derive would demand more
impl<In, Out> Clone for CodecEntry<In, Out> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<In, Out> Copy for CodecEntry<In, Out> {}

impl<In, Out> std::fmt::Debug for CodecEntry<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecEntry")
            .field("id", &self.id)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

impl<In, Out> CodecEntry<In, Out> {
    pub fn new(
        id: &'static str,
        content_type: &'static str,
        decode: DecodeFn<In>,
        encode: EncodeFn<Out>,
    ) -> Self {
        Self {
            id,
            content_type,
            decode,
            encode,
        }
    }

    /// Entry for a marker format whose codecs live on [`SimpleCodec`].
    pub fn of<F>() -> Self
    where
        F: Format,
        SimpleCodec: Decoder<In, F> + Encoder<Out, F>,
    {
        Self::new(F::ID, F::MIME, decode_with::<In, F>, encode_with::<Out, F>)
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn decode(&self, input: &[u8]) -> Result<In, DecodeError> {
        (self.decode)(input)
    }

    pub fn encode(&self, value: &Out) -> Result<Vec<u8>, EncodeError> {
        (self.encode)(value)
    }
}

fn decode_with<T, F>(input: &[u8]) -> Result<T, DecodeError>
where
    F: Format,
    SimpleCodec: Decoder<T, F>,
{
    Decoder::<T, F>::decode(&SimpleCodec, input)
}

fn encode_with<T, F>(value: &T) -> Result<Vec<u8>, EncodeError>
where
    F: Format,
    SimpleCodec: Encoder<T, F>,
{
    Encoder::<T, F>::encode(&SimpleCodec, value)
}

#[derive(Debug, derive_more::Display)]
pub enum RegistryError {
    #[display("format {_0:?} registered twice")]
    Duplicate(&'static str),
}

impl std::error::Error for RegistryError {}

/// Format Identifier to codec table. Read-only once built.
pub struct CodecRegistry<In, Out> {
    entries: HashMap<&'static str, CodecEntry<In, Out>>,
}

impl<In, Out> std::fmt::Debug for CodecRegistry<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formats: Vec<_> = self.formats().collect();
        formats.sort_unstable();
        f.debug_struct("CodecRegistry")
            .field("formats", &formats)
            .finish()
    }
}

impl<In, Out> CodecRegistry<In, Out> {
    pub fn builder() -> CodecRegistryBuilder<In, Out> {
        CodecRegistryBuilder {
            entries: HashMap::new(),
        }
    }

    /// Identifiers are case-sensitive.
    pub fn lookup(&self, id: &str) -> Option<&CodecEntry<In, Out>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn formats(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl<In, Out> CodecRegistry<In, Out>
where
    In: DeserializeOwned + Capabilities,
    Out: Serialize + Capabilities,
{
    /// json, xml, csv and, with the `serde_urlencoded` feature, x-www-form-urlencoded.
    pub fn builtin() -> Result<Self, RegistryError> {
        let builder = Self::builder()
            .format::<Json>()?
            .format::<Xml>()?
            .format::<Csv>()?;

        #[cfg(feature = "serde_urlencoded")]
        let builder = builder.format::<super::UrlEncoded>()?;

        Ok(builder.build())
    }
}

pub struct CodecRegistryBuilder<In, Out> {
    entries: HashMap<&'static str, CodecEntry<In, Out>>,
}

impl<In, Out> std::fmt::Debug for CodecRegistryBuilder<In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistryBuilder")
            .field("formats", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<In, Out> CodecRegistryBuilder<In, Out> {
    pub fn format<F>(self) -> Result<Self, RegistryError>
    where
        F: Format,
        SimpleCodec: Decoder<In, F> + Encoder<Out, F>,
    {
        self.entry(CodecEntry::of::<F>())
    }

    pub fn entry(mut self, entry: CodecEntry<In, Out>) -> Result<Self, RegistryError> {
        if self.entries.contains_key(entry.id) {
            return Err(RegistryError::Duplicate(entry.id));
        }
        self.entries.insert(entry.id, entry);
        Ok(self)
    }

    pub fn build(self) -> CodecRegistry<In, Out> {
        CodecRegistry {
            entries: self.entries,
        }
    }
}
