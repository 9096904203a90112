// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! Zero-copy property-list decoding.
//!
//! [`Properties`](crate::Properties) is the owning, linked-sequence flavor
//! used by encoders and by server-side parsers that need to hold a
//! validated packet past the lifetime of its input buffer. [`PropertiesView`]
//! is the other flavor this crate supports: a cursor over the same wire
//! bytes that decodes one property at a time into a borrowed
//! [`PropertyValueView`], without allocating. This is the shape a
//! constrained client uses to scan properties — looking for a single
//! Reason String, say — without paying for a `Vec<Property>` it immediately
//! discards.
//!
//! The two flavors read identical bytes; [`PropertiesView::collect_owned`]
//! bridges from one to the other when a caller decides mid-scan that it
//! wants to keep the whole list around.

use std::convert::TryFrom;

use crate::{ByteArray, DecodeError, DecodePacket, PropertyType, VarInt};

/// A property value borrowed from the buffer a [`PropertiesView`] is
/// scanning. One variant per wire shape (spec \S3.2's seven shapes), not
/// one per property tag — [`PropertyType`] already carries the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValueView<'a> {
    Byte(u8),
    TwoByteInt(u16),
    FourByteInt(u32),
    VarInt(usize),
    String(&'a str),
    Binary(&'a [u8]),
    StringPair(&'a str, &'a str),
}

impl<'a> PropertyValueView<'a> {
    /// Byte length of this value alone, not counting the property tag.
    #[must_use]
    pub fn value_bytes(&self) -> usize {
        match self {
            Self::Byte(_) => 1,
            Self::TwoByteInt(_) => 2,
            Self::FourByteInt(_) => 4,
            Self::VarInt(v) => VarInt::from(*v).map_or(1, |vi| vi.bytes()),
            Self::String(s) => 2 + s.len(),
            Self::Binary(b) => 2 + b.len(),
            Self::StringPair(k, v) => 2 + k.len() + 2 + v.len(),
        }
    }
}

/// The wire shape a property tag decodes as. Mirrors the seven rows of
/// spec \S3.2's shape table; used to pick which arm of
/// [`PropertyValueView`] a tag's bytes land in without re-deriving the
/// mapping at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyShape {
    Byte,
    TwoByteInt,
    FourByteInt,
    VarInt,
    String,
    Binary,
    StringPair,
}

impl PropertyType {
    /// Which of the seven wire shapes this property's value is encoded as.
    #[must_use]
    fn shape(self) -> PropertyShape {
        match self {
            Self::PayloadFormatIndicator
            | Self::RequestProblemInformation
            | Self::RequestResponseInformation
            | Self::MaximumQoS
            | Self::RetainAvailable
            | Self::WildcardSubscriptionAvailable
            | Self::SubscriptionIdentifierAvailable
            | Self::SharedSubscriptionAvailable => PropertyShape::Byte,
            Self::ServerKeepAlive
            | Self::ReceiveMaximum
            | Self::TopicAliasMaximum
            | Self::TopicAlias => PropertyShape::TwoByteInt,
            Self::MessageExpiryInterval
            | Self::SessionExpiryInterval
            | Self::WillDelayInterval
            | Self::MaximumPacketSize => PropertyShape::FourByteInt,
            Self::SubscriptionIdentifier => PropertyShape::VarInt,
            Self::ContentType
            | Self::ResponseTopic
            | Self::AssignedClientIdentifier
            | Self::AuthenticationMethod
            | Self::ResponseInformation
            | Self::ServerReference
            | Self::ReasonString => PropertyShape::String,
            Self::CorrelationData | Self::AuthenticationData => PropertyShape::Binary,
            Self::UserProperty => PropertyShape::StringPair,
        }
    }
}

/// A cursor over the bytes of a property list's payload (the bytes
/// following the Property Length `VarInt`, not including it).
///
/// Constructed with [`PropertiesView::new`] over the property-count-many
/// bytes a caller has already located (typically via
/// [`VarInt::decode`](crate::VarInt) on the enclosing packet's cursor);
/// [`next`](Self::next) decodes and returns one tag/value pair per call,
/// borrowing `String`/`Binary`/`StringPair` values directly out of the
/// underlying slice.
pub struct PropertiesView<'a> {
    ba: ByteArray<'a>,
}

impl<'a> PropertiesView<'a> {
    /// Wrap the `len`-byte payload of an already-decoded Property Length
    /// prefix.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            ba: ByteArray::new(data),
        }
    }

    /// Decode and return the next tag/value pair, or `None` once the
    /// wrapped byte range is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the tag byte is out of range or the
    /// value's bytes are short or malformed for its shape.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<(PropertyType, PropertyValueView<'a>)>, DecodeError> {
        if self.ba.remaining_bytes() == 0 {
            return Ok(None);
        }
        let tag_byte = self.ba.read_byte()?;
        let property_type = PropertyType::try_from(tag_byte)?;
        let value = match property_type.shape() {
            PropertyShape::Byte => PropertyValueView::Byte(self.ba.read_byte()?),
            PropertyShape::TwoByteInt => PropertyValueView::TwoByteInt(self.ba.read_u16()?),
            PropertyShape::FourByteInt => PropertyValueView::FourByteInt(self.ba.read_u32()?),
            PropertyShape::VarInt => {
                let v = VarInt::decode(&mut self.ba)?;
                PropertyValueView::VarInt(v.value())
            }
            PropertyShape::String => {
                let len = self.ba.read_u16()? as usize;
                PropertyValueView::String(self.ba.read_str(len)?)
            }
            PropertyShape::Binary => {
                let len = self.ba.read_u16()? as usize;
                PropertyValueView::Binary(self.ba.read_bytes(len)?)
            }
            PropertyShape::StringPair => {
                let key_len = self.ba.read_u16()? as usize;
                let key = self.ba.read_str(key_len)?;
                let value_len = self.ba.read_u16()? as usize;
                let value = self.ba.read_str(value_len)?;
                PropertyValueView::StringPair(key, value)
            }
        };
        Ok(Some((property_type, value)))
    }

    /// Byte offset the cursor has advanced to within the wrapped slice.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.ba.offset()
    }

    /// Drain the remaining properties into an owned `Vec`, converting each
    /// [`PropertyValueView`] to its owned `(tag, shape)` counterpart.
    ///
    /// Intended for callers that started a zero-allocation scan but decided
    /// partway through that they need to retain the rest of the list past
    /// the input buffer's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] under the same conditions as [`next`](Self::next).
    pub fn collect_owned(&mut self) -> Result<Vec<(PropertyType, OwnedPropertyValue)>, DecodeError> {
        let mut out = Vec::new();
        while let Some((tag, value)) = self.next()? {
            out.push((tag, OwnedPropertyValue::from(value)));
        }
        Ok(out)
    }
}

/// Owned counterpart of [`PropertyValueView`], used by
/// [`PropertiesView::collect_owned`] once a caller needs values that
/// outlive the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedPropertyValue {
    Byte(u8),
    TwoByteInt(u16),
    FourByteInt(u32),
    VarInt(usize),
    String(String),
    Binary(Vec<u8>),
    StringPair(String, String),
}

impl From<PropertyValueView<'_>> for OwnedPropertyValue {
    fn from(v: PropertyValueView<'_>) -> Self {
        match v {
            PropertyValueView::Byte(b) => Self::Byte(b),
            PropertyValueView::TwoByteInt(n) => Self::TwoByteInt(n),
            PropertyValueView::FourByteInt(n) => Self::FourByteInt(n),
            PropertyValueView::VarInt(n) => Self::VarInt(n),
            PropertyValueView::String(s) => Self::String(s.to_string()),
            PropertyValueView::Binary(b) => Self::Binary(b.to_vec()),
            PropertyValueView::StringPair(k, v) => Self::StringPair(k.to_string(), v.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_view_yields_nothing() {
        let mut view = PropertiesView::new(&[]);
        assert_eq!(view.next(), Ok(None));
    }

    #[test]
    fn test_scans_message_expiry_interval() {
        // Tag 0x02 (MessageExpiryInterval), value 60.
        let buf = [0x02, 0x00, 0x00, 0x00, 0x3c];
        let mut view = PropertiesView::new(&buf);
        let (tag, value) = view.next().unwrap().unwrap();
        assert_eq!(tag, PropertyType::MessageExpiryInterval);
        assert_eq!(value, PropertyValueView::FourByteInt(60));
        assert_eq!(view.next(), Ok(None));
    }

    #[test]
    fn test_scans_multiple_properties_without_allocating() {
        // ContentType "a" (tag 0x03), then ReceiveMaximum 10 (tag 0x21).
        let buf = [0x03, 0x00, 0x01, b'a', 0x21, 0x00, 0x0a];
        let mut view = PropertiesView::new(&buf);
        let (tag1, value1) = view.next().unwrap().unwrap();
        assert_eq!(tag1, PropertyType::ContentType);
        assert_eq!(value1, PropertyValueView::String("a"));
        let (tag2, value2) = view.next().unwrap().unwrap();
        assert_eq!(tag2, PropertyType::ReceiveMaximum);
        assert_eq!(value2, PropertyValueView::TwoByteInt(10));
        assert_eq!(view.next(), Ok(None));
    }

    #[test]
    fn test_user_property_string_pair() {
        let buf = [0x26, 0x00, 0x1, b'k', 0x00, 0x1, b'v'];
        let mut view = PropertiesView::new(&buf);
        let (tag, value) = view.next().unwrap().unwrap();
        assert_eq!(tag, PropertyType::UserProperty);
        assert_eq!(value, PropertyValueView::StringPair("k", "v"));
    }

    #[test]
    fn test_invalid_tag_is_bad_data() {
        let buf = [0xff];
        let mut view = PropertiesView::new(&buf);
        assert_eq!(view.next(), Err(DecodeError::InvalidPropertyType));
    }

    #[test]
    fn test_truncated_value_is_not_enough_data() {
        // ReceiveMaximum declares a u16 value but only one byte follows.
        let buf = [0x21, 0x00];
        let mut view = PropertiesView::new(&buf);
        assert_eq!(view.next(), Err(DecodeError::NotEnoughData));
    }

    #[test]
    fn test_collect_owned_matches_borrowed_scan() {
        let buf = [0x03, 0x00, 0x01, b'a', 0x21, 0x00, 0x0a];
        let mut view = PropertiesView::new(&buf);
        let owned = view.collect_owned().unwrap();
        assert_eq!(
            owned,
            vec![
                (PropertyType::ContentType, OwnedPropertyValue::String("a".to_string())),
                (PropertyType::ReceiveMaximum, OwnedPropertyValue::TwoByteInt(10)),
            ]
        );
    }

    #[test]
    fn test_view_matches_owning_decode_for_same_bytes() {
        use crate::{DecodePacket, EncodePacket, Properties};

        // A Properties byte stream is [VarInt length][payload]; the view
        // wraps the payload only, so this confirms the two flavors agree
        // given the same underlying property bytes.
        let payload = [0x02, 0x00, 0x00, 0x00, 0x3c];
        let mut full = Vec::new();
        VarInt::from(payload.len()).unwrap().encode(&mut full).unwrap();
        full.extend_from_slice(&payload);

        let mut ba = ByteArray::new(&full);
        let owning = Properties::decode(&mut ba).unwrap();
        assert_eq!(owning.len(), 1);

        let mut view = PropertiesView::new(&payload);
        let (tag, value) = view.next().unwrap().unwrap();
        assert_eq!(tag, PropertyType::MessageExpiryInterval);
        assert_eq!(value, PropertyValueView::FourByteInt(60));
    }
}
