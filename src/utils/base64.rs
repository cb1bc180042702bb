use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 string to its original form.
///
/// # Arguments
/// * `input` - The Base64 encoded string.
/// * `accept_urlsafe` - A boolean indicating whether to accept URL-safe Base64 encoding.
///
/// # Returns
/// The decoded string, or `None` if the input is not Base64 or not UTF-8.
pub fn base64_decode(input: &str, accept_urlsafe: bool) -> Option<String> {
    let (padded, unpadded) = if accept_urlsafe {
        (general_purpose::URL_SAFE, general_purpose::URL_SAFE_NO_PAD)
    } else {
        (general_purpose::STANDARD, general_purpose::STANDARD_NO_PAD)
    };

    let bytes = padded
        .decode(input)
        .or_else(|_| unpadded.decode(input))
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// Decodes a whole subscription body.
///
/// Subscriptions are often wrapped at a fixed column and may use either
/// alphabet, with or without padding. ASCII whitespace is removed before
/// decoding.
pub fn decode_subscription(body: &str) -> Option<String> {
    let compact: String = body
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return None;
    }
    base64_decode(&compact, false).or_else(|| base64_decode(&compact, true))
}
