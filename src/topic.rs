// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use byteorder::{BigEndian, WriteBytesExt};
use std::fmt;
use std::io::Write;

use crate::utils::validate_utf8_string;
use crate::{ByteArray, DecodeError, DecodePacket, EncodeError, EncodePacket};

/// Checks shared by Publish Topic Names and Topic Filters: no null
/// character, well-formed UTF-8, and a length that fits the two-byte
/// length prefix used on the wire.
fn validate_common(s: &str) -> Result<(), EncodeError> {
    if s.is_empty() {
        return Err(EncodeError::InvalidTopic);
    }
    validate_utf8_string(s).map_err(|_e| EncodeError::InvalidTopic)
}

/// A Topic Name used in a PUBLISH packet ([MQTT-4.7]).
///
/// Topic Names are sent by the publisher and MUST NOT contain wildcard
/// characters, unlike Topic Filters used in SUBSCRIBE/UNSUBSCRIBE.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PubTopic(String);

impl PubTopic {
    /// Create a new Topic Name.
    ///
    /// # Errors
    ///
    /// Returns error if `topic` is empty, contains a `+` or `#` wildcard
    /// character, or fails the common UTF-8 string rules.
    pub fn new(topic: &str) -> Result<Self, EncodeError> {
        validate_common(topic)?;
        if topic.contains(['+', '#']) {
            return Err(EncodeError::InvalidTopic);
        }
        Ok(Self(topic.to_string()))
    }

    /// Get byte length in packet.
    #[must_use]
    pub fn bytes(&self) -> usize {
        2 + self.0.len()
    }
}

impl fmt::Display for PubTopic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PubTopic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl DecodePacket for PubTopic {
    fn decode(ba: &mut ByteArray) -> Result<Self, DecodeError> {
        let len = ba.read_u16()?;
        let s = ba.read_string(len as usize)?;
        if s.contains(['+', '#']) {
            return Err(DecodeError::InvalidTopic);
        }
        Ok(Self(s))
    }
}

impl EncodePacket for PubTopic {
    fn encode(&self, buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
        #[allow(clippy::cast_possible_truncation)]
        let len = self.0.len() as u16;
        buf.write_u16::<BigEndian>(len)?;
        buf.write_all(self.0.as_bytes())?;
        Ok(self.bytes())
    }
}

/// Validate wildcard placement within a Topic Filter.
///
/// `#` is only valid as the last character of the filter, and only as an
/// entire level (preceded by the start of the filter or a `/`)
/// [MQTT-4.7.1-2]. `+` is only valid as an entire level
/// [MQTT-4.7.1-3].
fn validate_wildcards(s: &str) -> Result<(), EncodeError> {
    let levels: Vec<&str> = s.split('/').collect();
    let last = levels.len() - 1;
    for (i, level) in levels.iter().enumerate() {
        if level.contains('#') && (*level != "#" || i != last) {
            return Err(EncodeError::InvalidTopic);
        }
        if level.contains('+') && *level != "+" {
            return Err(EncodeError::InvalidTopic);
        }
    }
    Ok(())
}

/// A Topic Filter used in a SUBSCRIBE or UNSUBSCRIBE packet
/// ([MQTT-4.7]).
///
/// Unlike [`PubTopic`], a Topic Filter may contain the `+` (single-level)
/// and `#` (multi-level) wildcard characters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubTopic(String);

impl SubTopic {
    /// Create a new Topic Filter.
    ///
    /// # Errors
    ///
    /// Returns error if `topic` is empty, fails the common UTF-8 string
    /// rules, or places a `+`/`#` wildcard anywhere other than as an
    /// entire topic level (with `#` additionally restricted to the last
    /// level).
    pub fn new(topic: &str) -> Result<Self, EncodeError> {
        validate_common(topic)?;
        validate_wildcards(topic)?;
        Ok(Self(topic.to_string()))
    }

    /// Get byte length in packet.
    #[must_use]
    pub fn bytes(&self) -> usize {
        2 + self.0.len()
    }
}

impl fmt::Display for SubTopic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubTopic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl DecodePacket for SubTopic {
    fn decode(ba: &mut ByteArray) -> Result<Self, DecodeError> {
        let len = ba.read_u16()?;
        if len == 0 {
            return Err(DecodeError::EmptyTopicFilter);
        }
        let s = ba.read_string(len as usize)?;
        validate_wildcards(&s).map_err(|_e| DecodeError::InvalidTopic)?;
        Ok(Self(s))
    }
}

impl EncodePacket for SubTopic {
    fn encode(&self, buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
        #[allow(clippy::cast_possible_truncation)]
        let len = self.0.len() as u16;
        buf.write_u16::<BigEndian>(len)?;
        buf.write_all(self.0.as_bytes())?;
        Ok(self.bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pub_topic_rejects_wildcards() {
        assert!(PubTopic::new("a/b/c").is_ok());
        assert_eq!(PubTopic::new("a/+/c"), Err(EncodeError::InvalidTopic));
        assert_eq!(PubTopic::new("a/#"), Err(EncodeError::InvalidTopic));
        assert_eq!(PubTopic::new(""), Err(EncodeError::InvalidTopic));
    }

    #[test]
    fn test_sub_topic_accepts_wildcards() {
        assert!(SubTopic::new("a/b/+").is_ok());
        assert!(SubTopic::new("a/#").is_ok());
        assert!(SubTopic::new("#").is_ok());
        assert!(SubTopic::new("+/b").is_ok());
    }

    #[test]
    fn test_sub_topic_rejects_malformed_wildcards() {
        assert_eq!(SubTopic::new("a/b#"), Err(EncodeError::InvalidTopic));
        assert_eq!(SubTopic::new("a+/b"), Err(EncodeError::InvalidTopic));
        assert_eq!(SubTopic::new("a/#/b"), Err(EncodeError::InvalidTopic));
    }
}
