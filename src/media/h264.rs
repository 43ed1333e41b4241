//! AVC/H.264 video packet formatting
//!
//! FLV carries H.264 in AVCC form (length-prefixed NAL units); this
//! module writes the per-tag framing around the caller's bytes.
//!
//! AVC Video Packet Structure:
//! ```text
//! +----------+----------+-----------------+-----------------+
//! |FrameType | CodecID  | AVCPacketType   | CompositionTime | Data
//! | (4 bits) | (4 bits) | (1 byte)        | (3 bytes, SI24) |
//! +----------+----------+-----------------+-----------------+
//! ```
//!
//! AVCPacketType:
//! - 0: AVC sequence header (AVCDecoderConfigurationRecord)
//! - 1: AVC NALU (one or more NALUs)
//! - 2: AVC end of sequence
//!
//! CompositionTime is the PTS-DTS offset in milliseconds, signed 24-bit
//! big-endian, written even when zero. The payload (configuration record
//! or NAL units) is opaque: boundaries are never inspected.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MediaError, Result};
use super::flv::{VideoCodec, VideoFrameType};

/// Lowest composition time the signed 24-bit field can carry
pub const MIN_COMPOSITION_TIME: i32 = -(1 << 23);
/// Highest composition time the signed 24-bit field can carry
pub const MAX_COMPOSITION_TIME: i32 = (1 << 23) - 1;

/// AVC packet type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvcPacketType {
    /// Sequence header (AVCDecoderConfigurationRecord)
    SequenceHeader = 0,
    /// NAL units
    Nalu = 1,
    /// End of sequence
    EndOfSequence = 2,
}

impl AvcPacketType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(AvcPacketType::SequenceHeader),
            1 => Some(AvcPacketType::Nalu),
            2 => Some(AvcPacketType::EndOfSequence),
            _ => None,
        }
    }
}

impl TryFrom<u8> for AvcPacketType {
    type Error = MediaError;

    fn try_from(b: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_byte(b).ok_or(MediaError::InvalidPacketType(b))
    }
}

/// Format an AVC video tag payload
///
/// Packs frame type and codec ID into the leading byte, then writes the
/// packet-type byte, the signed 24-bit composition time, and the
/// caller's raw bytes. Only the AVC codec carries this packet layout, so
/// any other codec is rejected with `InvalidCodecId`; a composition time
/// outside the 24-bit range is `CompositionTimeOutOfRange` rather than a
/// truncated write.
pub fn encode_video_packet(
    frame_type: VideoFrameType,
    codec: VideoCodec,
    packet_type: AvcPacketType,
    composition_time: i32,
    payload: &[u8],
) -> Result<Bytes> {
    if codec != VideoCodec::Avc {
        return Err(MediaError::InvalidCodecId(codec as u8).into());
    }
    if !(MIN_COMPOSITION_TIME..=MAX_COMPOSITION_TIME).contains(&composition_time) {
        return Err(MediaError::CompositionTimeOutOfRange(composition_time).into());
    }

    let mut buf = BytesMut::with_capacity(5 + payload.len());
    buf.put_u8(((frame_type as u8) << 4) | codec as u8);
    buf.put_u8(packet_type as u8);
    // Low 3 bytes of the two's-complement value, big-endian
    buf.put_slice(&composition_time.to_be_bytes()[1..4]);
    buf.put_slice(payload);
    Ok(buf.freeze())
}
