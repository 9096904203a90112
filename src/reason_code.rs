// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use crate::{ByteArray, DecodeError, DecodePacket, EncodeError, EncodePacket};

/// Reason Codes appear in CONNACK, PUBACK, PUBREC, PUBREL, PUBCOMP, SUBACK,
/// UNSUBACK, DISCONNECT and AUTH packets.
///
/// A Reason Code is a one byte unsigned value that indicates the result of
/// an operation. Reason Codes less than 0x80 indicate successful completion
/// of an operation. The normal Reason Code for success is 0. Reason Code
/// values of 0x80 or greater indicate failure.
///
/// Not every Reason Code is legal in every packet type; each packet file
/// carries its own allow-list (`*_REASONS` constants) checked at decode
/// time.
///
/// A raw byte that does not match any assigned code is not itself a
/// decode error: it decodes to [`ReasonCode::Unknown`] so that forward
/// compatibility with future reason codes is not gated by this crate.
/// Packet-specific `*_REASONS` lists still reject it during the
/// per-packet legality check.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    /// Success / Normal disconnection / Granted QoS 0.
    #[default]
    Success,

    /// Granted QoS 1.
    GrantedQoS1,

    /// Granted QoS 2.
    GrantedQoS2,

    /// Disconnect with Will Message.
    DisconnectWithWillMessage,

    /// No matching subscribers.
    NoMatchingSubscribers,

    /// No subscription existed.
    NoSubscriptionExisted,

    /// Continue authentication.
    ContinueAuthentication,

    /// Re-authenticate.
    ReAuthenticate,

    /// Unspecified error.
    UnspecifiedError,

    /// Malformed Packet.
    MalformedPacket,

    /// Protocol Error.
    ProtocolError,

    /// Implementation specific error.
    ImplementationSpecificError,

    /// Unsupported Protocol Version.
    UnsupportedProtocolVersion,

    /// Client Identifier not valid.
    ClientIdentifierNotValid,

    /// Bad User Name or Password.
    BadUserNameOrPassword,

    /// Not authorized.
    NotAuthorized,

    /// Server unavailable.
    ServerUnavailable,

    /// Server busy.
    ServerBusy,

    /// Banned.
    Banned,

    /// Server shutting down.
    ServerShuttingDown,

    /// Bad authentication method.
    BadAuthenticationMethod,

    /// Keep Alive timeout.
    KeepAliveTimeout,

    /// Session taken over.
    SessionTakenOver,

    /// Topic Filter invalid.
    TopicFilterInvalid,

    /// Topic Name invalid.
    TopicNameInvalid,

    /// Packet Identifier in use.
    PacketIdentifierInUse,

    /// Packet Identifier not found.
    PacketIdentifierNotFound,

    /// Receive Maximum exceeded.
    ReceiveMaximumExceeded,

    /// Topic Alias invalid.
    TopicAliasInvalid,

    /// Packet too large.
    PacketTooLarge,

    /// Message rate too high.
    MessageRateTooHigh,

    /// Quota exceeded.
    QuotaExceeded,

    /// Administrative action.
    AdministrativeAction,

    /// Payload format invalid.
    PayloadFormatInvalid,

    /// Retain not supported.
    RetainNotSupported,

    /// `QoS` not supported.
    QoSNotSupported,

    /// Use another server.
    UseAnotherServer,

    /// Server moved.
    ServerMoved,

    /// Shared Subscription not supported.
    SharedSubscriptionNotSupported,

    /// Connection rate exceeded.
    ConnectionRateExceeded,

    /// Maximum connect time.
    MaximumConnectTime,

    /// Subscription Identifiers not supported.
    SubscriptionIdentifiersNotSupported,

    /// Wildcard Subscriptions not supported.
    WildcardSubscriptionsNotSupported,

    /// A raw byte not matching any code assigned by the OASIS MQTT v5.0
    /// specification. The codec does not enumerate reason codes beyond
    /// this table; interpretation of an unknown code is the session
    /// layer's responsibility.
    Unknown(u8),
}

impl ReasonCode {
    /// Get byte length in packet.
    #[must_use]
    #[inline]
    pub const fn bytes() -> usize {
        1
    }

    /// Get the wire byte value of this reason code.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Success => 0x00,
            Self::GrantedQoS1 => 0x01,
            Self::GrantedQoS2 => 0x02,
            Self::DisconnectWithWillMessage => 0x04,
            Self::NoMatchingSubscribers => 0x10,
            Self::NoSubscriptionExisted => 0x11,
            Self::ContinueAuthentication => 0x18,
            Self::ReAuthenticate => 0x19,
            Self::UnspecifiedError => 0x80,
            Self::MalformedPacket => 0x81,
            Self::ProtocolError => 0x82,
            Self::ImplementationSpecificError => 0x83,
            Self::UnsupportedProtocolVersion => 0x84,
            Self::ClientIdentifierNotValid => 0x85,
            Self::BadUserNameOrPassword => 0x86,
            Self::NotAuthorized => 0x87,
            Self::ServerUnavailable => 0x88,
            Self::ServerBusy => 0x89,
            Self::Banned => 0x8A,
            Self::ServerShuttingDown => 0x8B,
            Self::BadAuthenticationMethod => 0x8C,
            Self::KeepAliveTimeout => 0x8D,
            Self::SessionTakenOver => 0x8E,
            Self::TopicFilterInvalid => 0x8F,
            Self::TopicNameInvalid => 0x90,
            Self::PacketIdentifierInUse => 0x91,
            Self::PacketIdentifierNotFound => 0x92,
            Self::ReceiveMaximumExceeded => 0x93,
            Self::TopicAliasInvalid => 0x94,
            Self::PacketTooLarge => 0x95,
            Self::MessageRateTooHigh => 0x96,
            Self::QuotaExceeded => 0x97,
            Self::AdministrativeAction => 0x98,
            Self::PayloadFormatInvalid => 0x99,
            Self::RetainNotSupported => 0x9A,
            Self::QoSNotSupported => 0x9B,
            Self::UseAnotherServer => 0x9C,
            Self::ServerMoved => 0x9D,
            Self::SharedSubscriptionNotSupported => 0x9E,
            Self::ConnectionRateExceeded => 0x9F,
            Self::MaximumConnectTime => 0xA0,
            Self::SubscriptionIdentifiersNotSupported => 0xA1,
            Self::WildcardSubscriptionsNotSupported => 0xA2,
            Self::Unknown(v) => v,
        }
    }
}

impl From<u8> for ReasonCode {
    fn from(v: u8) -> Self {
        match v {
            0x00 => Self::Success,
            0x01 => Self::GrantedQoS1,
            0x02 => Self::GrantedQoS2,
            0x04 => Self::DisconnectWithWillMessage,
            0x10 => Self::NoMatchingSubscribers,
            0x11 => Self::NoSubscriptionExisted,
            0x18 => Self::ContinueAuthentication,
            0x19 => Self::ReAuthenticate,
            0x80 => Self::UnspecifiedError,
            0x81 => Self::MalformedPacket,
            0x82 => Self::ProtocolError,
            0x83 => Self::ImplementationSpecificError,
            0x84 => Self::UnsupportedProtocolVersion,
            0x85 => Self::ClientIdentifierNotValid,
            0x86 => Self::BadUserNameOrPassword,
            0x87 => Self::NotAuthorized,
            0x88 => Self::ServerUnavailable,
            0x89 => Self::ServerBusy,
            0x8A => Self::Banned,
            0x8B => Self::ServerShuttingDown,
            0x8C => Self::BadAuthenticationMethod,
            0x8D => Self::KeepAliveTimeout,
            0x8E => Self::SessionTakenOver,
            0x8F => Self::TopicFilterInvalid,
            0x90 => Self::TopicNameInvalid,
            0x91 => Self::PacketIdentifierInUse,
            0x92 => Self::PacketIdentifierNotFound,
            0x93 => Self::ReceiveMaximumExceeded,
            0x94 => Self::TopicAliasInvalid,
            0x95 => Self::PacketTooLarge,
            0x96 => Self::MessageRateTooHigh,
            0x97 => Self::QuotaExceeded,
            0x98 => Self::AdministrativeAction,
            0x99 => Self::PayloadFormatInvalid,
            0x9A => Self::RetainNotSupported,
            0x9B => Self::QoSNotSupported,
            0x9C => Self::UseAnotherServer,
            0x9D => Self::ServerMoved,
            0x9E => Self::SharedSubscriptionNotSupported,
            0x9F => Self::ConnectionRateExceeded,
            0xA0 => Self::MaximumConnectTime,
            0xA1 => Self::SubscriptionIdentifiersNotSupported,
            0xA2 => Self::WildcardSubscriptionsNotSupported,
            other => Self::Unknown(other),
        }
    }
}

impl DecodePacket for ReasonCode {
    fn decode(ba: &mut ByteArray) -> Result<Self, DecodeError> {
        let byte = ba.read_byte()?;
        Ok(Self::from(byte))
    }
}

impl EncodePacket for ReasonCode {
    fn encode(&self, buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
        buf.push(self.to_byte());
        Ok(Self::bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_code_round_trip() {
        let mut buf = Vec::new();
        ReasonCode::TopicAliasInvalid.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0x94]);

        let mut ba = ByteArray::new(&buf);
        assert_eq!(ReasonCode::decode(&mut ba), Ok(ReasonCode::TopicAliasInvalid));
    }

    #[test]
    fn test_reason_code_unknown_value_decodes_without_error() {
        let buf = [0xFF];
        let mut ba = ByteArray::new(&buf);
        assert_eq!(ReasonCode::decode(&mut ba), Ok(ReasonCode::Unknown(0xFF)));

        let mut out = Vec::new();
        ReasonCode::Unknown(0xFF).encode(&mut out).unwrap();
        assert_eq!(out, vec![0xFF]);
    }

    #[test]
    fn test_reason_code_default_is_success() {
        assert_eq!(ReasonCode::default(), ReasonCode::Success);
    }
}
