//! MIME encoded-word decoding for header text (RFC 2047).
//!
//! Header values may embed `=?charset?B|Q?payload?=` tokens carrying
//! non-ASCII text. [`decode_encoded_words`] replaces each token in place and
//! passes everything else through untouched. A token that cannot be decoded
//! (malformed structure, bad base64, unknown charset) is left exactly as it
//! appeared, never dropped.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use encoding_rs::Encoding;

/// Decodes every encoded-word token embedded in `input`.
///
/// Token-free input comes back unchanged.
#[must_use]
pub fn decode_encoded_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("=?") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        if let Some((decoded, consumed)) = decode_token(candidate) {
            out.push_str(&decoded);
            rest = &candidate[consumed..];
        } else {
            // Not a decodable token: keep the marker and rescan after it.
            out.push_str("=?");
            rest = &candidate[2..];
        }
    }

    out.push_str(rest);
    out
}

/// Attempts to decode one token at the start of `s` (which begins `=?`).
///
/// Returns the decoded text and the byte length of the token consumed.
fn decode_token(s: &str) -> Option<(String, usize)> {
    let inner = s.strip_prefix("=?")?;

    let charset_end = inner.find('?')?;
    let charset = &inner[..charset_end];
    if charset.is_empty() {
        return None;
    }

    let after = &inner[charset_end + 1..];
    let encoding_byte = *after.as_bytes().first()?;
    if after.as_bytes().get(1) != Some(&b'?') {
        return None;
    }

    let payload_area = &after[2..];
    let payload_end = payload_area.find('?')?;
    if payload_area.as_bytes().get(payload_end + 1) != Some(&b'=') {
        return None;
    }
    let payload = &payload_area[..payload_end];
    if payload.is_empty() {
        return None;
    }

    let bytes = match encoding_byte.to_ascii_uppercase() {
        b'B' => STANDARD.decode(payload).ok()?,
        b'Q' => decode_q(payload),
        _ => return None,
    };

    let encoding = Encoding::for_label(charset.as_bytes())?;
    let (decoded, _, _) = encoding.decode(&bytes);

    // "=?" + charset + "?" + enc + "?" + payload + "?="
    let consumed = 2 + charset_end + 1 + 2 + payload_end + 2;
    Some((decoded.into_owned(), consumed))
}

/// Q-encoding: `_` becomes space, `=HH` becomes the byte; anything else
/// (including a malformed escape) passes through literally.
fn decode_q(payload: &str) -> Vec<u8> {
    let bytes = payload.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'_' => {
                out.push(b' ');
                i += 1;
            }
            b'=' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                let hi = char::from(bytes[i + 1]).to_digit(16).unwrap_or(0);
                let lo = char::from(bytes[i + 2]).to_digit(16).unwrap_or(0);
                out.push(u8::try_from(hi * 16 + lo).unwrap_or(0));
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    out
}
