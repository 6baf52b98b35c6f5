use serde_json::json;

/// Smallest valid PNG: a single transparent pixel.
pub fn png_fixture() -> Vec<u8> {
    return vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
}

/// JPEG start-of-image marker followed by a JFIF header and an end marker. Not
/// decodable, only distinguishable.
pub fn jpeg_fixture() -> Vec<u8> {
    return vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
    ];
}

/// Distinct byte buffers so payload order can be asserted by content.
pub fn tagged_fixture(tag: u8) -> Vec<u8> {
    let mut bytes = png_fixture();
    bytes.push(tag);
    return bytes;
}

pub fn gemini_success_body(text: &str) -> String {
    return json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    })
    .to_string();
}

pub fn gemini_error_body(code: u16, status: &str, message: &str) -> String {
    return json!({
        "error": {
            "code": code,
            "message": message,
            "status": status
        }
    })
    .to_string();
}
