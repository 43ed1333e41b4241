//! AAC audio packet formatting
//!
//! FLV carries AAC in raw form (no ADTS headers): a packed flags byte,
//! a packet-type byte, then the payload.
//!
//! AAC Audio Packet Structure:
//! ```text
//! +-----------+---------+----------+----------+---------+
//! |SoundFormat|SoundRate|SoundSize |SoundType | AACType | AACData
//! | (4 bits)  | (2 bits)| (1 bit)  | (1 bit)  | (1 byte)|
//! +-----------+---------+----------+----------+---------+
//! ```
//!
//! AACPacketType:
//! - 0: AAC sequence header (AudioSpecificConfig)
//! - 1: AAC raw frame data
//!
//! The payload is opaque here: an AudioSpecificConfig blob for sequence
//! headers, a raw AAC frame otherwise. Neither is validated.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MediaError, Result};
use super::flv::{SoundFormat, SoundRate, SoundSize, SoundType};

/// AAC packet type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AacPacketType {
    /// Sequence header (AudioSpecificConfig)
    SequenceHeader = 0,
    /// Raw AAC frame data
    Raw = 1,
}

impl AacPacketType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(AacPacketType::SequenceHeader),
            1 => Some(AacPacketType::Raw),
            _ => None,
        }
    }
}

impl TryFrom<u8> for AacPacketType {
    type Error = MediaError;

    fn try_from(b: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_byte(b).ok_or(MediaError::InvalidPacketType(b))
    }
}

/// Format an AAC audio tag payload
///
/// Packs the audio parameters into the leading flags byte, appends the
/// packet-type byte and the caller's raw payload. Only the AAC sound
/// format carries the packet-type byte, so any other format is rejected
/// with `InvalidCodecId`.
pub fn encode_audio_packet(
    format: SoundFormat,
    rate: SoundRate,
    size: SoundSize,
    channels: SoundType,
    packet_type: AacPacketType,
    payload: &[u8],
) -> Result<Bytes> {
    if format != SoundFormat::Aac {
        return Err(MediaError::InvalidCodecId(format as u8).into());
    }

    let flags = ((format as u8) << 4) | ((rate as u8) << 2) | ((size as u8) << 1) | channels as u8;

    let mut buf = BytesMut::with_capacity(2 + payload.len());
    buf.put_u8(flags);
    buf.put_u8(packet_type as u8);
    buf.put_slice(payload);
    Ok(buf.freeze())
}
