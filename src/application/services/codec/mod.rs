//! Transfer encoding for the content API.
//!
//! GitHub ships file bodies as standard base64 wrapped at a fixed width. Decoding
//! classifies the payload for preview: known image extensions become data URIs,
//! everything else becomes text (strict UTF-8 first, then a single-byte
//! fallback so binary files still show something).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "svg", "webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedContent {
    /// Self-describing `data:image/<ext>;base64,<payload>` URI.
    Image { data_uri: String },
    Text(String),
    /// Zero-length payload; shown as "no content", not as an error.
    Empty,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported content format: {0}")]
pub struct ContentFormatError(pub String);

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Extension of a file name (text after the last dot), if it has one.
pub fn extension_of(name: &str) -> Option<&str> {
    let base = name.rsplit('/').next().unwrap_or(name);
    match base.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

pub fn decode(encoded: &str, extension: Option<&str>) -> Result<DecodedContent, ContentFormatError> {
    let payload: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    if payload.is_empty() {
        return Ok(DecodedContent::Empty);
    }

    if let Some(ext) = extension.filter(|e| is_image_extension(e)) {
        return Ok(DecodedContent::Image {
            data_uri: format!("data:image/{};base64,{}", ext.to_ascii_lowercase(), payload),
        });
    }

    let bytes = STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| ContentFormatError(e.to_string()))?;
    Ok(DecodedContent::Text(bytes_to_text(bytes)))
}

fn bytes_to_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        // ISO-8859-1: every byte maps to the code point of the same value.
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}
