// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use crate::{DecodeError, EncodeError};

/// Failure kinds for UTF-8 Encoded String validation ([MQTT-1.5.4]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringError {
    /// Bytes are not well-formed UTF-8.
    InvalidUtf8,

    /// String contains the null character U+0000 ([MQTT-1.5.4-2]).
    ContainsNullChar,

    /// String is longer than 65,535 bytes once UTF-8 encoded.
    TooLong,
}

impl From<StringError> for DecodeError {
    fn from(_e: StringError) -> Self {
        Self::InvalidString
    }
}

impl From<StringError> for EncodeError {
    fn from(_e: StringError) -> Self {
        Self::OtherErrors
    }
}

/// Check a decoded or to-be-encoded string against the UTF-8 Encoded String
/// rules in the MQTT v5.0 specification.
///
/// Well-formedness of the UTF-8 byte sequence itself is guaranteed by `&str`;
/// this only checks the additional restrictions MQTT imposes on top of
/// plain UTF-8: no embedded null character, and a length that fits in the
/// two-byte length prefix used everywhere a string is encoded on the wire.
///
/// # Errors
///
/// Returns `StringError::ContainsNullChar` if `s` contains U+0000, or
/// `StringError::TooLong` if `s.len()` exceeds 65,535 bytes.
pub fn validate_utf8_string(s: &str) -> Result<(), StringError> {
    if s.len() > usize::from(u16::MAX) {
        return Err(StringError::TooLong);
    }
    if s.contains('\u{0000}') {
        return Err(StringError::ContainsNullChar);
    }
    Ok(())
}

/// Check that `data` fits in a Two Byte Integer length prefix, as required
/// by every Binary Data and UTF-8 Encoded String field on the wire.
///
/// # Errors
///
/// Returns `EncodeError::TooManyData` if `data.len()` exceeds 65,535 bytes.
pub fn validate_two_bytes_data(data: &[u8]) -> Result<(), EncodeError> {
    if data.len() > usize::from(u16::MAX) {
        return Err(EncodeError::TooManyData);
    }
    Ok(())
}

/// Check a Client Identifier decoded from a CONNECT packet or an Assigned
/// Client Identifier property.
///
/// MQTT v3.1.1 limited Client Identifiers to 23 characters drawn from
/// `[0-9a-zA-Z]`; MQTT v5.0 relaxed this to any UTF-8 Encoded String the
/// Server is willing to accept ([MQTT-3.1.3-5]), so this only re-applies
/// the generic UTF-8 Encoded String rules.
///
/// # Errors
///
/// Returns `DecodeError::InvalidClientId` if the identifier fails the
/// UTF-8 Encoded String rules.
pub fn validate_client_id(client_id: &str) -> Result<(), DecodeError> {
    validate_utf8_string(client_id).map_err(|_e| DecodeError::InvalidClientId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_utf8_string() {
        assert!(validate_utf8_string("hello").is_ok());
        assert!(validate_utf8_string("").is_ok());
        assert_eq!(
            validate_utf8_string("a\u{0000}b"),
            Err(StringError::ContainsNullChar)
        );
    }

    #[test]
    fn test_validate_client_id_is_lenient_in_v5() {
        assert!(validate_client_id("").is_ok());
        assert!(validate_client_id("client-42/with.punctuation").is_ok());
    }
}
