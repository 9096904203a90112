// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use std::convert::TryFrom;

use crate::{ByteArray, DecodeError, EncodeError, U16Data};

/// Packet identifier used to pair a request with its acknowledgement.
///
/// Present in PUBLISH (QoS > 0), PUBACK, PUBREC, PUBREL, PUBCOMP, SUBSCRIBE,
/// SUBACK, UNSUBSCRIBE and UNSUBACK.
pub type PacketId = U16Data;

/// Protocol name sent in the CONNECT packet Variable Header.
///
/// The Server MUST respond to the CONNECT Packet with a CONNACK using Reason
/// Code 0x84 (Unsupported Protocol Version) and then close the Network
/// Connection if the Protocol Name is not "MQTT" [MQTT-3.1.2-1].
pub const PROTOCOL_NAME: &str = "MQTT";

/// Decode a type from a byte cursor.
///
/// Every wire primitive and every control packet implements this trait;
/// composite types (properties, packets) decode by repeatedly calling
/// `decode()` on their fields in wire order.
pub trait DecodePacket: Sized {
    /// # Errors
    ///
    /// Returns error if `ba` does not hold enough bytes, or the bytes read
    /// violate a protocol rule.
    fn decode(ba: &mut ByteArray) -> Result<Self, DecodeError>;
}

/// Encode a type to a byte buffer.
///
/// Returns the number of bytes appended to `buf`.
pub trait EncodePacket {
    /// # Errors
    ///
    /// Returns error if the value cannot be represented on the wire, for
    /// example a string or binary field longer than 65,535 bytes.
    fn encode(&self, buf: &mut Vec<u8>) -> Result<usize, EncodeError>;
}

/// Quality of Service level used by PUBLISH and by subscription options.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum QoS {
    /// At most once delivery.
    #[default]
    AtMostOnce = 0,

    /// At least once delivery.
    AtLeastOnce = 1,

    /// Exactly once delivery.
    ExactOnce = 2,
}

impl QoS {
    /// Get byte length used in packet.
    #[must_use]
    pub const fn bytes() -> usize {
        1
    }
}

impl TryFrom<u8> for QoS {
    type Error = DecodeError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::AtMostOnce),
            1 => Ok(Self::AtLeastOnce),
            2 => Ok(Self::ExactOnce),
            _ => {
                log::error!("base: Invalid QoS value: {v}");
                Err(DecodeError::InvalidQoS)
            }
        }
    }
}

impl DecodePacket for QoS {
    fn decode(ba: &mut ByteArray) -> Result<Self, DecodeError> {
        let byte = ba.read_byte()?;
        Self::try_from(byte)
    }
}

impl EncodePacket for QoS {
    fn encode(&self, buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
        buf.push(*self as u8);
        Ok(Self::bytes())
    }
}
