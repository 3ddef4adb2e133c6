//! Value encoding for stored entries.
//!
//! Values are stored as standard, padded base64. This is an encoding, not
//! encryption: anyone with access to the storage area can read the data.
//!
//! Encoding works on UTF-8 bytes, so any Rust string is accepted. For ASCII
//! input the output is identical to the browser's `btoa`. On decode, bytes
//! that are not valid UTF-8 are read as a Latin-1 binary string, which is
//! what `atob` yields, so entries written by `btoa`-based clients still
//! read back. Decoding is as lenient as `atob`: ASCII whitespace is
//! skipped and padding is optional.

use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{DecodeError, Engine as _};

/// `atob`'s forgiving-base64: padding optional, trailing bits ignored.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

pub fn encode(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

pub fn decode(encoded: &str) -> Result<String, DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = FORGIVING.decode(compact)?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    })
}
