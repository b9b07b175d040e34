//! Reversible password codec.
//!
//! Passwords are obscured with standard Base64 (RFC 4648 alphabet, with
//! padding) over their UTF-8 bytes before they are transmitted, cached, or
//! displayed in obfuscated form.
//!
//! **This is not encryption.** There is no key, no salt and no secret
//! material: anyone holding an encoded value can recover the password with
//! [`decode`]. The codec exists to keep passwords from being shown in the
//! clear by accident, nothing more.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::CodecError;

/// Encode a password. Total and deterministic for every `&str`.
#[must_use]
pub fn encode(plain: &str) -> String {
    BASE64.encode(plain.as_bytes())
}

/// Decode a value produced by [`encode`].
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] if `encoded` is not valid padded Base64,
/// or [`CodecError::NotUtf8`] if the decoded bytes are not UTF-8.
pub fn decode(encoded: &str) -> Result<String, CodecError> {
    let bytes = BASE64
        .decode(encoded.as_bytes())
        .map_err(|e| CodecError::Malformed {
            reason: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|_| CodecError::NotUtf8)
}
