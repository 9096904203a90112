// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! A codec for the MQTT v5.0 wire format.
//!
//! This crate turns byte streams into strongly-typed, validated control
//! packets and back. It does not open sockets or run an event loop; it is
//! the framing and serialization layer that a client or broker builds on
//! top of.
//!
//! Decoding is available in two modes: [`DecodePacket::decode`] always
//! produces owned data, while borrowing decode helpers such as
//! [`ByteArray::read_str`] let a caller avoid allocating when a packet's
//! lifetime is bounded by the buffer it arrived in. [`property_view`] takes
//! this further for property lists specifically: [`PropertiesView`] is a
//! cursor that decodes one property at a time straight out of the input
//! buffer, for callers scanning a PUBLISH or CONNECT's properties without
//! wanting a heap-allocated [`Properties`] list at all.

mod auth;
mod base;
mod binary_data;
mod bool_data;
mod byte_array;
mod connect;
mod connect_ack;
mod connect_flags;
mod disconnect;
pub mod dump;
mod error;
mod header;
mod keep_alive;
mod ping_request;
mod ping_response;
mod property;
pub mod property_view;
mod protocol_level;
mod publish;
mod publish_ack;
mod publish_complete;
mod publish_received;
mod publish_release;
mod reason_code;
mod string_data;
mod string_pair_data;
mod subscribe;
mod subscribe_ack;
pub mod topic;
mod u16_data;
mod u32_data;
mod unsubscribe;
mod unsubscribe_ack;
pub mod utils;
mod var_int;

pub use auth::{AuthPacket, AUTH_PROPERTIES, AUTH_REASONS};
pub use base::{DecodePacket, EncodePacket, PacketId, QoS, PROTOCOL_NAME};
pub use binary_data::BinaryData;
pub use bool_data::BoolData;
pub use byte_array::{ByteArray, ByteArrayError};
pub use connect::ConnectPacket;
pub use connect_ack::{ConnectAckPacket, CONNECT_ACK_PROPERTIES, CONNECT_REASONS};
pub use connect_flags::ConnectFlags;
pub use disconnect::{DisconnectPacket, DISCONNECT_PROPERTIES, DISCONNECT_REASONS};
pub use dump::{dump_fixed_header, hex_dump, DumpPacket};
pub use error::{DecodeError, EncodeError};
pub use header::{check_header, FixedHeader, Packet, PacketType};
pub use keep_alive::{validate_keep_alive, KeepAlive};
pub use ping_request::PingRequestPacket;
pub use ping_response::PingResponsePacket;
pub use property::{check_property_type_list, Properties, Property, PropertyType, MULTIPLE_PROPERTIES};
pub use property_view::{OwnedPropertyValue, PropertiesView, PropertyValueView};
pub use protocol_level::ProtocolLevel;
pub use publish::{PublishPacket, PUBLISH_PROPERTIES};
pub use publish_ack::{PublishAckPacket, PUBLISH_ACK_PROPERTIES, PUBLISH_ACK_REASONS};
pub use publish_complete::{
    PublishCompletePacket, PUBLISH_COMPLETE_PROPERTIES, PUBLISH_COMPLETE_REASONS,
};
pub use publish_received::{
    PublishReceivedPacket, PUBLISH_RECEIVED_PROPERTIES, PUBLISH_RECEIVED_REASONS,
};
pub use publish_release::{
    PublishReleasePacket, PUBLISH_RELEASE_PROPERTIES, PUBLISH_RELEASE_REASONS,
};
pub use reason_code::ReasonCode;
pub use string_data::StringData;
pub use string_pair_data::StringPairData;
pub use subscribe::{RetainHandling, SubscribePacket, SubscribeTopic};
pub use topic::{PubTopic, SubTopic};
pub use u16_data::U16Data;
pub use u32_data::U32Data;
pub use unsubscribe::{UnsubscribePacket, UNSUBSCRIBE_PROPERTIES};
pub use unsubscribe_ack::{UnsubscribeAckPacket, UNSUBSCRIBE_ACK_PROPERTIES, UNSUBSCRIBE_REASONS};
pub use var_int::{VarInt, VarIntError, MAX_PACKET_LEN};
