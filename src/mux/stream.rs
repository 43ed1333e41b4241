//! FLV stream assembly
//!
//! A whole FLV stream is the 9-byte file header, a zero PreviousTagSize,
//! then framed tags in emission order:
//!
//! ```text
//! +============+==================+==============+==================+=====
//! | FLV Header | PrevTagSize0 (0) | Tag 1        | PrevTagSize1     | ...
//! | (9 bytes)  | (4 bytes)        | (11+N bytes) | (4 bytes)        |
//! +============+==================+==============+==================+=====
//! ```
//!
//! [`FlvStreamBuilder`] owns the running buffer and moves through two
//! states: unopened, then open once the header is written. Appends
//! before `open()` fail, as does a second `open()`; `finalize()` hands
//! the buffer out by value. Tag order is the caller's responsibility;
//! only structural framing is enforced here.

use bytes::{BufMut, Bytes, BytesMut};

use crate::amf::amf0::Amf0Encoder;
use crate::amf::value::AmfValue;
use crate::error::{MuxError, Result};
use crate::media::aac::{encode_audio_packet, AacPacketType};
use crate::media::flv::{
    FlvTag, SoundFormat, SoundRate, SoundSize, SoundType, VideoCodec, VideoFrameType,
};
use crate::media::h264::{encode_video_packet, AvcPacketType};
use super::tag::encode_tag;

/// FLV file signature: "FLV" in ASCII
const FLV_SIGNATURE: [u8; 3] = [0x46, 0x4C, 0x56]; // "FLV"

/// FLV version (always 1)
const FLV_VERSION: u8 = 0x01;

/// Header flags bit for an audio stream being present
const FLAG_AUDIO: u8 = 0x04;

/// Header flags bit for a video stream being present
const FLAG_VIDEO: u8 = 0x01;

/// FLV header size is always 9 bytes
const FLV_HEADER_SIZE: u32 = 9;

/// Script-tag root name for stream metadata
pub const ON_META_DATA: &str = "onMetaData";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Unopened,
    Open,
}

/// Incremental FLV stream builder
///
/// Single-writer by construction: appends take `&mut self` and
/// `finalize` consumes the builder, so the running PreviousTagSize and
/// the output buffer always belong to exactly one owner.
pub struct FlvStreamBuilder {
    buf: BytesMut,
    state: StreamState,
    has_audio: bool,
    has_video: bool,
    previous_tag_size: u32,
    tag_count: u64,
}

impl FlvStreamBuilder {
    /// Create a builder; the flags choose which presence bits the
    /// header advertises when `open()` writes it
    pub fn new(has_audio: bool, has_video: bool) -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
            state: StreamState::Unopened,
            has_audio,
            has_video,
            previous_tag_size: 0,
            tag_count: 0,
        }
    }

    /// Write the file header and the zero PreviousTagSize, moving the
    /// stream to open
    pub fn open(&mut self) -> Result<()> {
        if self.state == StreamState::Open {
            return Err(MuxError::StreamAlreadyOpen.into());
        }

        let mut flags = 0u8;
        if self.has_audio {
            flags |= FLAG_AUDIO;
        }
        if self.has_video {
            flags |= FLAG_VIDEO;
        }

        self.buf.put_slice(&FLV_SIGNATURE);
        self.buf.put_u8(FLV_VERSION);
        self.buf.put_u8(flags);
        self.buf.put_u32(FLV_HEADER_SIZE);

        // No tag precedes the first one
        self.buf.put_u32(0);

        self.state = StreamState::Open;
        Ok(())
    }

    /// Append an AAC audio tag
    #[allow(clippy::too_many_arguments)]
    pub fn append_audio_tag(
        &mut self,
        timestamp: u32,
        format: SoundFormat,
        rate: SoundRate,
        size: SoundSize,
        channels: SoundType,
        packet_type: AacPacketType,
        payload: &[u8],
    ) -> Result<()> {
        self.ensure_open()?;
        let data = encode_audio_packet(format, rate, size, channels, packet_type, payload)?;
        self.push_tag(&FlvTag::audio(timestamp, data))
    }

    /// Append an AVC video tag
    pub fn append_video_tag(
        &mut self,
        timestamp: u32,
        frame_type: VideoFrameType,
        codec: VideoCodec,
        packet_type: AvcPacketType,
        composition_time: i32,
        payload: &[u8],
    ) -> Result<()> {
        self.ensure_open()?;
        let data = encode_video_packet(frame_type, codec, packet_type, composition_time, payload)?;
        self.push_tag(&FlvTag::video(timestamp, data))
    }

    /// Append a script tag carrying the given AMF values back-to-back
    pub fn append_script_tag(&mut self, timestamp: u32, values: &[AmfValue]) -> Result<()> {
        self.ensure_open()?;
        let mut encoder = Amf0Encoder::new();
        encoder.encode_all(values)?;
        self.push_tag(&FlvTag::script(timestamp, encoder.finish()))
    }

    /// Append an `onMetaData` script tag for the given metadata value
    ///
    /// Writes the standard two-value root: the name string, then the
    /// metadata itself (conventionally an ECMA array).
    pub fn append_meta_tag(&mut self, timestamp: u32, value: &AmfValue) -> Result<()> {
        self.ensure_open()?;
        let mut encoder = Amf0Encoder::new();
        encoder.encode(&AmfValue::String(ON_META_DATA.to_string()))?;
        encoder.encode(value)?;
        self.push_tag(&FlvTag::script(timestamp, encoder.finish()))
    }

    /// Append a caller-built tag whose payload was formatted out-of-band
    pub fn append_tag(&mut self, tag: &FlvTag) -> Result<()> {
        self.ensure_open()?;
        self.push_tag(tag)
    }

    /// Consume the builder and return the accumulated stream bytes
    pub fn finalize(self) -> Bytes {
        self.buf.freeze()
    }

    /// Size of the previous tag including its header, 0 before any tag
    pub fn previous_tag_size(&self) -> u32 {
        self.previous_tag_size
    }

    /// Number of tags appended so far
    pub fn tag_count(&self) -> u64 {
        self.tag_count
    }

    /// Bytes accumulated so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state != StreamState::Open {
            return Err(MuxError::StreamNotOpen.into());
        }
        Ok(())
    }

    fn push_tag(&mut self, tag: &FlvTag) -> Result<()> {
        self.previous_tag_size = encode_tag(tag, &mut self.buf)?;
        self.tag_count += 1;
        Ok(())
    }
}
