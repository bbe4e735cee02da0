//! Data-URL transcoding and byte-size estimation.
//!
//! A data URL (`data:image/png;base64,<payload>`) is the text-embedded twin of
//! a raw image buffer. This module converts between the two representations,
//! derives MIME types from data URLs and filename-like strings, and estimates
//! the decoded byte size of a data URL from its character count alone — the
//! size comparison in [`compress`](crate::compress) never needs a full decode.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("not a data URL: missing base64 payload")]
    MissingPayload,
    #[error("no image type recognizable in {0:?}")]
    UnknownType(String),
    #[error("invalid base64 payload: {0}")]
    Payload(#[from] base64::DecodeError),
}

/// Returns true when `text` is an image data URL (`data:image/<type>;base64,...`).
///
/// Matching is case-insensitive on the scheme and MIME prefix, like browsers.
pub fn is_data_url(text: &str) -> bool {
    let Some(rest) = strip_prefix_ignore_case(text, "data:image/") else {
        return false;
    };
    match rest.split_once(';') {
        Some((subtype, tail)) => {
            !subtype.is_empty()
                && subtype.chars().all(|c| c.is_ascii_alphanumeric())
                && strip_prefix_ignore_case(tail, "base64,").is_some()
        }
        None => false,
    }
}

/// Extract the MIME type (`image/<type>`) from a data URL's metadata prefix.
pub fn mime_from_data_url(text: &str) -> Result<String, FormatError> {
    if !is_data_url(text) {
        return Err(FormatError::UnknownType(truncate_for_error(text)));
    }
    // is_data_url guarantees the "data:" prefix and a ';' separator
    let meta = &text["data:".len()..];
    let mime = meta.split(';').next().unwrap_or_default();
    Ok(mime.to_string())
}

/// Derive a MIME type from a filename-like string's extension suffix.
///
/// `"photo.JPG"` → `"image/jpg"`. The extension is lower-cased as-is; no
/// `jpeg`/`jpg` normalization happens here (that is a naming concern, see
/// [`naming`](crate::naming)).
pub fn mime_from_path(text: &str) -> Result<String, FormatError> {
    let ext = text
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphabetic()))
        .ok_or_else(|| FormatError::UnknownType(truncate_for_error(text)))?;
    Ok(format!("image/{}", ext.to_ascii_lowercase()))
}

/// Encode raw bytes into a data URL carrying the given MIME type.
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode the payload of a data URL back into raw bytes.
pub fn decode_data_url(text: &str) -> Result<Vec<u8>, FormatError> {
    let (_, payload) = text.split_once(',').ok_or(FormatError::MissingPayload)?;
    Ok(STANDARD.decode(payload)?)
}

/// Estimate the decoded byte size of a data URL (or bare base64 text).
///
/// Strips the `data:...;base64,` header if present, truncates at the first
/// `=`, and applies `trunc(n - n/8*2)` over the remaining character count —
/// 3 bytes per 4 chars. The estimate can be off by up to 2 bytes around
/// padding; both sides of the size comparison in
/// [`compress`](crate::compress) go through this same estimator, so the
/// comparison stays consistent.
pub fn estimate_decoded_size(text: &str) -> u64 {
    let payload = if is_data_url(text) {
        text.split_once(',').map_or(text, |(_, tail)| tail)
    } else {
        text
    };
    let payload = match payload.find('=') {
        Some(idx) => &payload[..idx],
        None => payload,
    };
    let n = payload.len() as f64;
    (n - n / 8.0 * 2.0) as u64
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// Cap the echoed input in error messages — data URLs can be megabytes.
fn truncate_for_error(text: &str) -> String {
    const MAX: usize = 64;
    if text.len() <= MAX {
        text.to_string()
    } else {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Classification and MIME extraction
    // =========================================================================

    #[test]
    fn recognizes_data_urls() {
        assert!(is_data_url("data:image/png;base64,AAAA"));
        assert!(is_data_url("data:image/jpeg;base64,"));
        assert!(is_data_url("DATA:IMAGE/PNG;BASE64,AAAA"));
    }

    #[test]
    fn rejects_non_data_urls() {
        assert!(!is_data_url("photo.jpg"));
        assert!(!is_data_url("data:text/plain;base64,AAAA"));
        assert!(!is_data_url("data:image/png,AAAA"));
        assert!(!is_data_url("data:image/;base64,AAAA"));
        assert!(!is_data_url(""));
    }

    #[test]
    fn mime_from_data_url_extracts_type() {
        assert_eq!(
            mime_from_data_url("data:image/png;base64,AAAA").unwrap(),
            "image/png"
        );
        assert_eq!(
            mime_from_data_url("data:image/webp;base64,").unwrap(),
            "image/webp"
        );
    }

    #[test]
    fn mime_from_data_url_rejects_plain_text() {
        assert!(mime_from_data_url("not a url").is_err());
    }

    #[test]
    fn mime_from_path_lowercases_extension() {
        assert_eq!(mime_from_path("photo.JPG").unwrap(), "image/jpg");
        assert_eq!(mime_from_path("a/b/c.png").unwrap(), "image/png");
        assert_eq!(mime_from_path("archive.tar.webp").unwrap(), "image/webp");
    }

    #[test]
    fn mime_from_path_requires_alphabetic_extension() {
        assert!(mime_from_path("noext").is_err());
        assert!(mime_from_path("trailing.").is_err());
        assert!(mime_from_path("versioned.mp4v2").is_err());
    }

    // =========================================================================
    // Transcoding round-trip
    // =========================================================================

    #[test]
    fn encode_then_decode_roundtrips() {
        let payloads: [&[u8]; 4] = [b"", b"a", b"\x00\xff\x10\x80", b"hello world, twelve!"];
        for bytes in payloads {
            let url = encode_data_url(bytes, "image/png");
            assert!(is_data_url(&url));
            assert_eq!(decode_data_url(&url).unwrap(), bytes);
        }
    }

    #[test]
    fn decode_requires_payload_segment() {
        assert!(matches!(
            decode_data_url("data:image/png;base64"),
            Err(FormatError::MissingPayload)
        ));
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@@"),
            Err(FormatError::Payload(_))
        ));
    }

    // =========================================================================
    // Size estimation — pinned to the estimator formula, not to exact base64
    // =========================================================================

    #[test]
    fn estimate_four_chars_no_padding() {
        assert_eq!(estimate_decoded_size("data:image/png;base64,AAAA"), 3);
    }

    #[test]
    fn estimate_with_one_padding_char() {
        assert_eq!(estimate_decoded_size("data:image/png;base64,AAA="), 2);
    }

    #[test]
    fn estimate_with_two_padding_chars() {
        // "AA==" → 2 chars remain → trunc(2 - 0.5) = 1
        assert_eq!(estimate_decoded_size("data:image/png;base64,AA=="), 1);
    }

    #[test]
    fn estimate_works_on_bare_payload() {
        assert_eq!(estimate_decoded_size("AAAAAAAA"), 6);
    }

    #[test]
    fn estimate_empty_payload_is_zero() {
        assert_eq!(estimate_decoded_size("data:image/png;base64,"), 0);
        assert_eq!(estimate_decoded_size(""), 0);
    }

    #[test]
    fn estimate_tracks_encoded_length() {
        // 1200 payload chars → trunc(1200 - 300) = 900
        let url = format!("data:image/jpeg;base64,{}", "A".repeat(1200));
        assert_eq!(estimate_decoded_size(&url), 900);
    }
}
