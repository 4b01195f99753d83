//! Checks on the inbound image before anything is sent upstream.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

use crate::error::{Result, RoomGenError};

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const ACCEPTED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/webp",
    "image/gif",
    "image/heic",
    "image/heif",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Inline `data:` URI, already decoded once to measure it.
    Inline { mime_type: String, size_bytes: usize },
    /// Remote image the gateway fetches itself.
    Remote { url: String },
}

impl ImagePayload {
    pub fn describe(&self) -> String {
        match self {
            ImagePayload::Inline {
                mime_type,
                size_bytes,
            } => format!("{} ({} bytes)", mime_type, size_bytes),
            ImagePayload::Remote { url } => format!("remote image {}", url),
        }
    }
}

pub fn validate_image_payload(payload: &str, max_bytes: usize) -> Result<ImagePayload> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(RoomGenError::input("No image provided"));
    }

    if let Some(rest) = strip_prefix_ignore_case(payload, "data:") {
        return validate_data_uri(rest, max_bytes);
    }

    if starts_with_ignore_case(payload, "https://") || starts_with_ignore_case(payload, "http://")
    {
        return Ok(ImagePayload::Remote {
            url: payload.to_string(),
        });
    }

    Err(RoomGenError::input(
        "Image must be a base64 data URI or an http(s) URL",
    ))
}

fn validate_data_uri(rest: &str, max_bytes: usize) -> Result<ImagePayload> {
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| RoomGenError::input("Malformed image data URI"))?;

    let mut params = header.split(';');
    let mime_type = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(RoomGenError::input("Image data URI must be base64 encoded"));
    }
    if !ACCEPTED_MIME_TYPES.contains(&mime_type.as_str()) {
        return Err(RoomGenError::input(format!(
            "Unsupported image type: {}",
            if mime_type.is_empty() { "unknown" } else { &mime_type }
        )));
    }

    // Encoders commonly wrap at 76 columns.
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    // Reject oversize payloads before paying for the decode.
    let encoded_limit = max_bytes.div_ceil(3) * 4;
    if compact.len() > encoded_limit + 4 {
        return Err(too_large(max_bytes));
    }

    let decoded = LENIENT
        .decode(&compact)
        .map_err(|e| RoomGenError::input(format!("Image is not valid base64: {}", e)))?;
    if decoded.is_empty() {
        return Err(RoomGenError::input("No image provided"));
    }
    if decoded.len() > max_bytes {
        return Err(too_large(max_bytes));
    }

    Ok(ImagePayload::Inline {
        mime_type,
        size_bytes: decoded.len(),
    })
}

fn too_large(max_bytes: usize) -> RoomGenError {
    RoomGenError::input(format!(
        "Image is too large (limit is {} bytes)",
        max_bytes
    ))
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    starts_with_ignore_case(text, prefix).then(|| &text[prefix.len()..])
}
