use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{IgnoredAny, MapAccess, Visitor},
};

use crate::http::codec::{Capabilities, CsvDecode, CsvEncode, DecodeError, EncodeError};

/// Inbound message.
///
/// Encoded with keys `Name`/`Text`. Decoding matches keys case-insensitively, so JSON
/// `Name`, XML `<name>` and form `NAME` all land on the same field. A repeated key
/// keeps its last value, `null` and missing keys leave the field empty, unknown keys
/// are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Text")]
    pub text: String,
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("Message", &["Name", "Text"], MessageVisitor)
    }
}

struct MessageVisitor;

impl<'de> Visitor<'de> for MessageVisitor {
    type Value = Message;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a message with name and text fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Message, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut message = Message::default();
        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("name") {
                &mut message.name
            } else if key.eq_ignore_ascii_case("text") {
                &mut message.text
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            if let NullableString(Some(value)) = map.next_value()? {
                *field = value;
            }
        }
        Ok(message)
    }
}

/// A string value where `null` means "leave the field alone".
struct NullableString(Option<String>);

impl<'de> Deserialize<'de> for NullableString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NullableStringVisitor;

        impl<'de> Visitor<'de> for NullableStringVisitor {
            type Value = NullableString;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or null")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(NullableString(Some(v.to_string())))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(NullableString(Some(v)))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(NullableString(None))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(NullableString(None))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                NullableString::deserialize(deserializer)
            }
        }

        deserializer.deserialize_any(NullableStringVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "reply", rename_all = "PascalCase", default)]
pub struct Reply {
    pub status: String,
    pub text: String,
}

pub const STATUS_OK: &str = "OK";
pub const STATUS_NOT_OK: &str = "NOTOK";

pub fn validate(message: &Message) -> bool {
    !message.name.is_empty() && !message.text.is_empty()
}

/// Business transform. Total over every `Message`.
pub fn process(message: &Message) -> Reply {
    if validate(message) {
        Reply {
            status: STATUS_OK.to_string(),
            text: format!("got msg::{}", message.text),
        }
    } else {
        Reply {
            status: STATUS_NOT_OK.to_string(),
            text: "did not get it".to_string(),
        }
    }
}

// CSV: one record, `name,text`. No quoting, so a comma inside a field shifts
// the rest of the record.
impl CsvDecode for Message {
    fn decode_csv(input: &[u8]) -> Result<Self, DecodeError> {
        let record = String::from_utf8_lossy(input);
        let mut fields = record.split(',');
        match (fields.next(), fields.next()) {
            (Some(name), Some(text)) => Ok(Message {
                name: name.to_string(),
                text: text.to_string(),
            }),
            _ => Err(DecodeError::csv("csv record needs name and text fields")),
        }
    }
}

impl Capabilities for Message {
    fn csv_decode() -> Option<fn(&[u8]) -> Result<Self, DecodeError>> {
        Some(<Self as CsvDecode>::decode_csv)
    }
}

// `status,text`
impl CsvEncode for Reply {
    fn encode_csv(&self) -> Result<Vec<u8>, EncodeError> {
        Ok([self.status.as_str(), self.text.as_str()].join(",").into_bytes())
    }
}

impl Capabilities for Reply {
    fn as_csv_encode(&self) -> Option<&dyn CsvEncode> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(name: &str, text: &str) -> Message {
        Message {
            name: name.into(),
            text: text.into(),
        }
    }

    #[test]
    fn valid_message_is_acknowledged() {
        let reply = process(&msg("alice", "hello"));
        assert_eq!(reply.status, "OK");
        assert_eq!(reply.text, "got msg::hello");
    }

    #[test]
    fn empty_fields_are_rejected() {
        for m in [msg("", "hello"), msg("alice", ""), msg("", "")] {
            assert!(!validate(&m));
            let reply = process(&m);
            assert_eq!(reply.status, "NOTOK");
            assert_eq!(reply.text, "did not get it");
        }
    }

    #[test]
    fn keys_match_without_case() {
        let decoded: Message = serde_json::from_str(r#"{"NAME":"a","TEXT":"b"}"#).unwrap();
        assert_eq!(decoded, msg("a", "b"));

        let decoded: Message = serde_json::from_str(r#"{"text":"b","nAmE":"a","x":[1]}"#).unwrap();
        assert_eq!(decoded, msg("a", "b"));
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let decoded: Message =
            serde_json::from_str(r#"{"Name":"one","NAME":"two","name":null}"#).unwrap();
        assert_eq!(decoded, msg("two", ""));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_str::<Message>(r#"["a","b"]"#).is_err());
        assert!(serde_json::from_str::<Message>(r#"{"Text":true}"#).is_err());
    }

    #[test]
    fn encodes_capitalised_keys() {
        assert_eq!(
            serde_json::to_string(&msg("a", "b")).unwrap(),
            r#"{"Name":"a","Text":"b"}"#
        );
    }

    #[test]
    fn csv_record() {
        assert_eq!(Message::decode_csv(b"alice,hello").unwrap(), msg("alice", "hello"));
    }

    #[test]
    fn csv_comma_in_name_shifts_fields() {
        // "Smith, John" was meant as the name
        let decoded = Message::decode_csv(b"Smith, John,hello").unwrap();
        assert_eq!(decoded, msg("Smith", " John"));
    }

    #[test]
    fn csv_keeps_raw_field_bytes() {
        let decoded = Message::decode_csv(b"alice,hello\n").unwrap();
        assert_eq!(decoded.text, "hello\n");

        let decoded = Message::decode_csv(b",").unwrap();
        assert_eq!(decoded, msg("", ""));
    }

    #[test]
    fn csv_needs_two_fields() {
        assert!(Message::decode_csv(b"").is_err());
        assert!(Message::decode_csv(b"alice").is_err());
    }

    #[test]
    fn csv_reply() {
        let reply = Reply {
            status: "NOTOK".into(),
            text: "did not get it".into(),
        };
        assert_eq!(reply.encode_csv().unwrap(), b"NOTOK,did not get it");
    }

    #[test]
    fn capabilities_are_one_way() {
        assert!(Message::csv_decode().is_some());
        assert!(msg("a", "b").as_csv_encode().is_none());
        assert!(Reply::csv_decode().is_none());
        assert!(Reply::default().as_csv_encode().is_some());
    }
}
