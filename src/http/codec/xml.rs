//! Flat-record XML reading on top of the quick-xml event reader.
//!
//! Element text is kept exactly as written; nothing is trimmed.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use serde::de::{DeserializeOwned, value::MapDeserializer};

/// Each child element of the root becomes one map entry. The root name, attributes
/// and anything nested deeper are ignored; a repeated element keeps its last text.
/// Content after the root element is not read.
pub(crate) fn from_slice<T>(input: &[u8]) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let fields = read_fields(input)?;
    T::deserialize(MapDeserializer::<_, serde::de::value::Error>::new(
        fields.into_iter(),
    ))
    .map_err(|e| e.to_string())
}

fn read_fields(input: &[u8]) -> Result<Vec<(String, String)>, String> {
    let mut reader = Reader::from_reader(input);
    let mut fields = Vec::new();
    let mut current: Option<(String, String)> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 {
                    current = Some((local_name(&e), String::new()));
                }
            }
            Event::Empty(e) => match depth {
                0 => return Ok(fields),
                1 => set(&mut fields, local_name(&e), String::new()),
                _ => {}
            },
            Event::Text(t) if depth == 2 => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&text);
                }
            }
            Event::CData(c) if depth == 2 => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some((name, value)) = current.take() {
                        set(&mut fields, name, value);
                    }
                }
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(fields);
                }
            }
            Event::Eof if depth == 0 => return Err("no root element".to_string()),
            Event::Eof => return Err("unexpected end of xml document".to_string()),
            _ => {}
        }
    }
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn set(fields: &mut Vec<(String, String)>, name: String, value: String) {
    match fields.iter_mut().find(|(key, _)| *key == name) {
        Some((_, old)) => *old = value,
        None => fields.push((name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(input: &str) -> Vec<(String, String)> {
        read_fields(input.as_bytes()).unwrap()
    }

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn whitespace_is_kept() {
        assert_eq!(
            fields("<msg><name> a </name><text>   </text></msg>"),
            vec![pair("name", " a "), pair("text", "   ")]
        );
    }

    #[test]
    fn entities_and_cdata() {
        assert_eq!(
            fields("<m><text>a &lt;b&gt; &amp; <![CDATA[<raw> ]]>c</text></m>"),
            vec![pair("text", "a <b> & <raw> c")]
        );
    }

    #[test]
    fn self_closing_child_is_empty() {
        assert_eq!(fields("<m><name/><text></text></m>"), vec![pair("name", ""), pair("text", "")]);
    }

    #[test]
    fn last_repeat_wins() {
        assert_eq!(
            fields("<m><text>one</text><text>two</text></m>"),
            vec![pair("text", "two")]
        );
    }

    #[test]
    fn nested_and_attributes_are_skipped() {
        assert_eq!(
            fields(r#"<?xml version="1.0"?><m id="1"><name a="x">n<b>skip</b></name></m>trailing"#),
            vec![pair("name", "n")]
        );
    }

    #[test]
    fn self_closing_root() {
        assert!(fields("<m/>").is_empty());
    }

    #[test]
    fn incomplete_documents() {
        assert!(read_fields(b"").is_err());
        assert!(read_fields(b"just text").is_err());
        assert!(read_fields(b"<msg><name>").is_err());
        assert!(read_fields(b"<msg><name></text></msg>").is_err());
    }
}
