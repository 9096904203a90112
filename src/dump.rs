// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! Human-readable rendering of decoded packets and raw byte buffers.
//!
//! This module is purely a diagnostic aid: it renders what the rest of the
//! codec has already decoded (or, for [`hex_dump`] and [`dump_fixed_header`],
//! what a partially-received buffer looks like) to a `String` a session
//! layer can hand to `log::trace!` or print on a CLI. Nothing here affects
//! encoding or decoding outcomes.

use std::fmt::Write as _;

use crate::{
    check_header, AuthPacket, ByteArray, ConnectAckPacket, ConnectPacket, DecodeError,
    DecodePacket, DisconnectPacket, FixedHeader, PingRequestPacket, PingResponsePacket,
    Properties, PublishAckPacket, PublishCompletePacket, PublishPacket, PublishReceivedPacket,
    PublishReleasePacket, SubscribeAckPacket, SubscribePacket, UnsubscribeAckPacket,
    UnsubscribePacket,
};

/// Render `bytes` as a classic hex-plus-ASCII dump, 16 octets per line.
///
/// Non-printable bytes are rendered as `.` in the ASCII gutter.
#[must_use]
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        let _ = write!(out, "{:08x}  ", i * 16);
        for b in chunk {
            let _ = write!(out, "{b:02x} ");
        }
        for _ in chunk.len()..16 {
            out.push_str("   ");
        }
        out.push_str(" |");
        for b in chunk {
            let c = if b.is_ascii_graphic() || *b == b' ' {
                *b as char
            } else {
                '.'
            };
            out.push(c);
        }
        out.push_str("|\n");
    }
    out
}

/// Peek at the fixed header of `buf` without decoding the rest of the
/// packet, reporting the packet type, flags, and total on-wire size.
///
/// Useful for logging a packet that arrived truncated: unlike a full
/// [`crate::DecodePacket::decode`] call, this never fails on a short
/// variable header or payload, only on a short/malformed fixed header.
///
/// # Errors
///
/// Returns `DecodeError::NotEnoughData` if `buf` does not hold a complete
/// fixed header (1-5 bytes), or `DecodeError::InvalidPacketType` /
/// `InvalidPacketFlags` if the header byte itself is malformed.
pub fn dump_fixed_header(buf: &[u8]) -> Result<String, DecodeError> {
    let mut ba = ByteArray::new(buf);
    let header = FixedHeader::decode(&mut ba)?;
    let total_bytes = check_header(buf)?;
    Ok(format!(
        "{} remaining_length={} total_bytes={}",
        header.packet_type().name(),
        header.remaining_length(),
        total_bytes
    ))
}

fn dump_properties(properties: &Properties) -> String {
    if properties.is_empty() {
        return "[]".to_string();
    }
    let mut out = String::from("[");
    for (i, p) in properties.props().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{:?}", p.property_type());
    }
    out.push(']');
    out
}

/// A one-line, human-readable summary of a decoded control packet.
///
/// Implemented for all 15 control packet types; each summary leads with
/// the packet's name and lists the fields most useful for diagnosing a
/// live session (packet id, topic, reason code, property count) rather
/// than every field verbatim — use `{:?}` on the packet itself when full
/// field detail is needed.
pub trait DumpPacket {
    /// Render a one-line summary of this packet.
    fn dump(&self) -> String;
}

impl DumpPacket for ConnectPacket {
    fn dump(&self) -> String {
        format!(
            "CONNECT client_id={:?} clean_session={} keep_alive={} will={} properties={}",
            self.client_id(),
            self.clean_session(),
            self.keep_alive(),
            self.will(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for ConnectAckPacket {
    fn dump(&self) -> String {
        format!(
            "CONNACK session_present={} reason_code={:?} properties={}",
            self.session_present(),
            self.reason_code(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for PublishPacket {
    fn dump(&self) -> String {
        format!(
            "PUBLISH topic={:?} packet_id={} qos={:?} dup={} retain={} payload_len={} properties={}",
            self.topic(),
            self.packet_id().value(),
            self.qos(),
            self.dup(),
            self.retain(),
            self.message().len(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for PublishAckPacket {
    fn dump(&self) -> String {
        format!(
            "PUBACK packet_id={} reason_code={:?} properties={}",
            self.packet_id().value(),
            self.reason_code(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for PublishReceivedPacket {
    fn dump(&self) -> String {
        format!(
            "PUBREC packet_id={} reason_code={:?} properties={}",
            self.packet_id().value(),
            self.reason_code(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for PublishReleasePacket {
    fn dump(&self) -> String {
        format!(
            "PUBREL packet_id={} reason_code={:?} properties={}",
            self.packet_id().value(),
            self.reason_code(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for PublishCompletePacket {
    fn dump(&self) -> String {
        format!(
            "PUBCOMP packet_id={} reason_code={:?} properties={}",
            self.packet_id().value(),
            self.reason_code(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for SubscribePacket {
    fn dump(&self) -> String {
        format!(
            "SUBSCRIBE packet_id={} topics={} properties={}",
            self.packet_id().value(),
            self.topics().len(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for SubscribeAckPacket {
    fn dump(&self) -> String {
        format!(
            "SUBACK packet_id={} reasons={:?} properties={}",
            self.packet_id().value(),
            self.reasons(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for UnsubscribePacket {
    fn dump(&self) -> String {
        format!(
            "UNSUBSCRIBE packet_id={} topics={} properties={}",
            self.packet_id().value(),
            self.topics().len(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for UnsubscribeAckPacket {
    fn dump(&self) -> String {
        format!(
            "UNSUBACK packet_id={} reasons={:?} properties={}",
            self.packet_id().value(),
            self.reasons(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for PingRequestPacket {
    fn dump(&self) -> String {
        "PINGREQ".to_string()
    }
}

impl DumpPacket for PingResponsePacket {
    fn dump(&self) -> String {
        "PINGRESP".to_string()
    }
}

impl DumpPacket for DisconnectPacket {
    fn dump(&self) -> String {
        format!(
            "DISCONNECT reason_code={:?} properties={}",
            self.reason_code(),
            dump_properties(self.properties())
        )
    }
}

impl DumpPacket for AuthPacket {
    fn dump(&self) -> String {
        format!(
            "AUTH reason_code={:?} properties={}",
            self.reason_code(),
            dump_properties(self.properties())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncodePacket, PacketId};

    #[test]
    fn test_hex_dump_formats_rows_of_16() {
        let bytes: Vec<u8> = (0u8..20).collect();
        let dump = hex_dump(&bytes);
        assert_eq!(dump.lines().count(), 2);
        assert!(dump.lines().next().unwrap().starts_with("00000000"));
    }

    #[test]
    fn test_dump_fixed_header_pingreq() {
        let buf = [0xC0, 0x00];
        let summary = dump_fixed_header(&buf).unwrap();
        assert!(summary.contains("PINGREQ"));
        assert!(summary.contains("total_bytes=2"));
    }

    #[test]
    fn test_dump_fixed_header_rejects_truncated_buffer() {
        let buf = [0xC0];
        assert_eq!(
            dump_fixed_header(&buf),
            Err(DecodeError::NotEnoughData)
        );
    }

    #[test]
    fn test_dump_publish_ack_summary() {
        let packet = PublishAckPacket::new(PacketId::new(7));
        let summary = packet.dump();
        assert!(summary.starts_with("PUBACK packet_id=7"));
        assert!(summary.contains("Success"));
    }

    #[test]
    fn test_dump_ping_request() {
        let packet = PingRequestPacket::new();
        assert_eq!(packet.dump(), "PINGREQ");
        let mut buf = Vec::new();
        packet.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0xC0, 0x00]);
    }
}
