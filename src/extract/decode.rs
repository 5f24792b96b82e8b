//! Candidate-encoding text decoding

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytes left undefined by the windows-1252 code page
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

const UTF_8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A text encoding that can be tried when decoding an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8, with or without a byte-order mark
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// UTF-16 little or big endian; requires a byte-order mark
    #[serde(rename = "utf-16", alias = "utf16")]
    Utf16,
    /// Windows code page 1252, strict about its undefined bytes
    #[serde(rename = "windows-1252", alias = "cp1252")]
    Windows1252,
    /// ISO-8859-1; maps every byte, so it never fails
    #[serde(rename = "latin1", alias = "latin-1", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    /// Preference order used when the configuration does not override it
    pub const DEFAULT_CANDIDATES: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Utf16,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
    ];

    /// Canonical label, as written in configuration files
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Windows1252 => "windows-1252",
            Self::Latin1 => "latin1",
        }
    }

    /// Strictly decode `bytes`, returning `None` on any malformed input
    ///
    /// # Examples
    ///
    /// ```
    /// use docchat::extract::TextEncoding;
    ///
    /// assert_eq!(TextEncoding::Utf8.decode(b"plain").as_deref(), Some("plain"));
    /// assert_eq!(TextEncoding::Utf8.decode(&[0xE9]), None);
    /// assert_eq!(TextEncoding::Latin1.decode(&[0xE9]).as_deref(), Some("é"));
    /// ```
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF_8_BOM).unwrap_or(bytes);
                decode_strict(UTF_8, bytes)
            }
            Self::Utf16 => match Encoding::for_bom(bytes) {
                Some((encoding, bom_len)) if encoding == UTF_16LE || encoding == UTF_16BE => {
                    decode_strict(encoding, &bytes[bom_len..])
                }
                _ => None,
            },
            Self::Windows1252 => {
                if bytes.iter().any(|b| WINDOWS_1252_UNDEFINED.contains(b)) {
                    return None;
                }
                decode_strict(WINDOWS_1252, bytes)
            }
            Self::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// Decode `bytes` with the first candidate that accepts them
///
/// Returns the text and the encoding that produced it. When every candidate
/// fails the bytes are decoded as UTF-8 with invalid sequences replaced by
/// U+FFFD and the encoding is `None`.
pub fn decode_text(bytes: &[u8], candidates: &[TextEncoding]) -> (String, Option<TextEncoding>) {
    for encoding in candidates {
        if let Some(text) = encoding.decode(bytes) {
            tracing::debug!("Decoded {} bytes as {}", bytes.len(), encoding);
            return (text, Some(*encoding));
        }
        tracing::debug!("Upload is not valid {}", encoding);
    }

    let (text, _had_errors) = UTF_8.decode_with_bom_removal(bytes);
    (text.into_owned(), None)
}
