//! Address-fragment codec: the whole session as percent-encoded JSON.
//!
//! The encoded string is the sole persisted representation of the live
//! session, so a pasted link reproduces the grid exactly. The alphabet
//! matches `encodeURIComponent` so links survive round-trips through
//! browsers and chat clients unchanged.

use serde_json::Value;

use crate::store::{LayoutItem, Snapshot};

/// Encode a snapshot into the fragment wire form.
pub fn encode(snapshot: &Snapshot) -> String {
    let json = serde_json::to_string(snapshot).unwrap_or_default();
    encode_component(&json)
}

/// Decode a fragment back into a snapshot.
///
/// Undecodable percent-escapes or invalid JSON return `None` — the caller
/// keeps whatever state it already has and shows no error. A missing or
/// malformed `streams`/`layout` field decodes permissively as an empty
/// sequence rather than failing the whole snapshot; there is no schema
/// versioning to consult.
pub fn decode(fragment: &str) -> Option<Snapshot> {
    let json = decode_component(fragment)?;
    let value: Value = serde_json::from_str(&json).ok()?;
    Some(Snapshot {
        streams: field_or_empty(&value, "streams"),
        layout: field_or_empty::<LayoutItem>(&value, "layout"),
    })
}

fn field_or_empty<T: serde::de::DeserializeOwned>(value: &Value, key: &str) -> Vec<T> {
    value
        .get(key)
        .cloned()
        .and_then(|field| serde_json::from_value(field).ok())
        .unwrap_or_default()
}

// --- Percent codec (encodeURIComponent-compatible) ---

/// Characters left unescaped by `encodeURIComponent`.
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

pub(crate) fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0xf) as usize] as char);
        }
    }
    out
}

pub(crate) fn decode_component(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_val(*bytes.get(i + 1)?)?;
            let lo = hex_val(*bytes.get(i + 2)?)?;
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot {
            streams: vec!["dQw4w9WgXcQ".into(), String::new()],
            layout: vec![
                LayoutItem { i: "0".into(), x: 0, y: 0, w: 2, h: 1 },
                LayoutItem { i: "1".into(), x: 2, y: 0, w: 1, h: 1 },
            ],
        }
    }

    #[test]
    fn round_trip() {
        let snap = sample();
        let decoded = decode(&encode(&snap)).expect("decodable");
        assert_eq!(decoded, snap);
    }

    #[test]
    fn encoded_form_is_url_safe() {
        let encoded = encode(&sample());
        assert!(!encoded.contains('{'));
        assert!(!encoded.contains('"'));
        assert!(encoded.contains("%7B")); // '{'
    }

    #[test]
    fn truncated_json_fails_cleanly() {
        let encoded = encode(&sample());
        assert_eq!(decode(&encoded[..encoded.len() / 2]), None);
    }

    #[test]
    fn invalid_escape_fails_cleanly() {
        assert_eq!(decode("%ZZ"), None);
        assert_eq!(decode("%7"), None);
    }

    #[test]
    fn missing_fields_decode_empty() {
        let snap = decode(&encode_component("{}")).expect("valid JSON");
        assert!(snap.streams.is_empty());
        assert!(snap.layout.is_empty());
    }

    #[test]
    fn malformed_field_decodes_empty() {
        let snap = decode(&encode_component(
            r#"{"streams":"nope","layout":[{"i":"0","x":0,"y":0,"w":1,"h":1}]}"#,
        ))
        .expect("valid JSON");
        assert!(snap.streams.is_empty());
        assert_eq!(snap.layout.len(), 1);
    }

    #[test]
    fn non_json_fragment_fails_cleanly() {
        assert_eq!(decode("section-2"), None);
    }

    #[test]
    fn unicode_survives_the_percent_codec() {
        let snap = Snapshot {
            streams: vec!["日本語 stream".into()],
            layout: vec![LayoutItem::at_index(0)],
        };
        assert_eq!(decode(&encode(&snap)), Some(snap));
    }
}
