//! FLV tag types and payload headers
//!
//! FLV (Flash Video) is a container format: a 9-byte file header followed
//! by type-tagged, timestamped chunks ("tags"). This module holds the tag
//! model and the closed enumerations packed into the first byte of audio
//! and video payloads.
//!
//! FLV Tag Structure:
//! ```text
//! +--------+-------------+-----------+-------------+---------+
//! | Type(1)| DataSize(3) | TS(3+1)   | StreamID(3) | Data(N) |
//! +--------+-------------+-----------+-------------+---------+
//! ```
//!
//! Video Data first byte:
//! ```text
//! +----------+----------+
//! | FrameType| CodecID  | CodecData...
//! | (4 bits) | (4 bits) |
//! +----------+----------+
//! ```
//!
//! Audio Data first byte:
//! ```text
//! +-----------+---------+----------+----------+
//! |SoundFormat|SoundRate|SoundSize |SoundType | AudioData...
//! | (4 bits)  | (2 bits)| (1 bit)  | (1 bit)  |
//! +-----------+---------+----------+----------+
//! ```

use bytes::Bytes;

use crate::error::MediaError;

/// FLV tag type (first byte of the tag header)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlvTagType {
    Audio = 8,
    Video = 9,
    Script = 18,
}

/// One FLV tag, payload already formatted
///
/// Constructed per event and immediately framed; `DataSize` and the
/// always-zero `StreamID` are written by the framer, not stored here.
#[derive(Debug, Clone)]
pub struct FlvTag {
    /// Tag type
    pub tag_type: FlvTagType,
    /// Timestamp in milliseconds
    pub timestamp: u32,
    /// Tag payload (including codec headers)
    pub data: Bytes,
}

impl FlvTag {
    /// Create a new audio tag
    pub fn audio(timestamp: u32, data: Bytes) -> Self {
        Self {
            tag_type: FlvTagType::Audio,
            timestamp,
            data,
        }
    }

    /// Create a new video tag
    pub fn video(timestamp: u32, data: Bytes) -> Self {
        Self {
            tag_type: FlvTagType::Video,
            timestamp,
            data,
        }
    }

    /// Create a new script (metadata) tag
    pub fn script(timestamp: u32, data: Bytes) -> Self {
        Self {
            tag_type: FlvTagType::Script,
            timestamp,
            data,
        }
    }
}

/// Video frame type (upper 4 bits of the first payload byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFrameType {
    /// Keyframe (for AVC, a seekable frame)
    Keyframe = 1,
    /// Inter frame (for AVC, a non-seekable frame)
    InterFrame = 2,
    /// Disposable inter frame (H.263 only)
    DisposableInterFrame = 3,
    /// Generated keyframe (reserved for server use)
    GeneratedKeyframe = 4,
    /// Video info/command frame
    VideoInfoFrame = 5,
}

impl VideoFrameType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(VideoFrameType::Keyframe),
            2 => Some(VideoFrameType::InterFrame),
            3 => Some(VideoFrameType::DisposableInterFrame),
            4 => Some(VideoFrameType::GeneratedKeyframe),
            5 => Some(VideoFrameType::VideoInfoFrame),
            _ => None,
        }
    }

    pub fn is_keyframe(&self) -> bool {
        matches!(self, VideoFrameType::Keyframe | VideoFrameType::GeneratedKeyframe)
    }
}

impl TryFrom<u8> for VideoFrameType {
    type Error = MediaError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Self::from_byte(b).ok_or(MediaError::InvalidFrameType(b))
    }
}

/// Video codec ID (lower 4 bits of the first payload byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodec {
    /// Sorenson H.263
    SorensonH263 = 2,
    /// Screen video
    ScreenVideo = 3,
    /// VP6
    Vp6 = 4,
    /// VP6 with alpha
    Vp6Alpha = 5,
    /// Screen video v2
    ScreenVideoV2 = 6,
    /// AVC (H.264)
    Avc = 7,
}

impl VideoCodec {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            2 => Some(VideoCodec::SorensonH263),
            3 => Some(VideoCodec::ScreenVideo),
            4 => Some(VideoCodec::Vp6),
            5 => Some(VideoCodec::Vp6Alpha),
            6 => Some(VideoCodec::ScreenVideoV2),
            7 => Some(VideoCodec::Avc),
            _ => None,
        }
    }
}

impl TryFrom<u8> for VideoCodec {
    type Error = MediaError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Self::from_byte(b).ok_or(MediaError::InvalidCodecId(b))
    }
}

/// Sound format (upper 4 bits of the first payload byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundFormat {
    /// Linear PCM, platform endian
    LinearPcmPlatform = 0,
    /// ADPCM
    Adpcm = 1,
    /// MP3
    Mp3 = 2,
    /// Linear PCM, little endian
    LinearPcmLe = 3,
    /// Nellymoser 16kHz mono
    Nellymoser16kMono = 4,
    /// Nellymoser 8kHz mono
    Nellymoser8kMono = 5,
    /// Nellymoser
    Nellymoser = 6,
    /// G.711 A-law
    G711ALaw = 7,
    /// G.711 mu-law
    G711MuLaw = 8,
    /// AAC
    Aac = 10,
    /// Speex
    Speex = 11,
    /// MP3 8kHz
    Mp38k = 14,
    /// Device-specific sound
    DeviceSpecific = 15,
}

impl SoundFormat {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(SoundFormat::LinearPcmPlatform),
            1 => Some(SoundFormat::Adpcm),
            2 => Some(SoundFormat::Mp3),
            3 => Some(SoundFormat::LinearPcmLe),
            4 => Some(SoundFormat::Nellymoser16kMono),
            5 => Some(SoundFormat::Nellymoser8kMono),
            6 => Some(SoundFormat::Nellymoser),
            7 => Some(SoundFormat::G711ALaw),
            8 => Some(SoundFormat::G711MuLaw),
            10 => Some(SoundFormat::Aac),
            11 => Some(SoundFormat::Speex),
            14 => Some(SoundFormat::Mp38k),
            15 => Some(SoundFormat::DeviceSpecific),
            _ => None,
        }
    }
}

impl TryFrom<u8> for SoundFormat {
    type Error = MediaError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Self::from_byte(b).ok_or(MediaError::InvalidCodecId(b))
    }
}

/// Sound sample rate (2 bits of the first payload byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundRate {
    R5512 = 0,
    R11025 = 1,
    R22050 = 2,
    R44100 = 3,
}

impl SoundRate {
    pub fn to_hz(&self) -> u32 {
        match self {
            SoundRate::R5512 => 5512,
            SoundRate::R11025 => 11025,
            SoundRate::R22050 => 22050,
            SoundRate::R44100 => 44100,
        }
    }
}

/// Sound sample size (1 bit of the first payload byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSize {
    Bits8 = 0,
    Bits16 = 1,
}

/// Sound channel layout (1 bit of the first payload byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundType {
    Mono = 0,
    Stereo = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_type_discriminants() {
        assert_eq!(FlvTagType::Audio as u8, 8);
        assert_eq!(FlvTagType::Video as u8, 9);
        assert_eq!(FlvTagType::Script as u8, 18);
    }

    #[test]
    fn test_tag_constructors() {
        let tag = FlvTag::audio(10, Bytes::from_static(&[0xAF, 0x01]));
        assert_eq!(tag.tag_type, FlvTagType::Audio);
        assert_eq!(tag.timestamp, 10);

        let tag = FlvTag::video(20, Bytes::from_static(&[0x17, 0x01]));
        assert_eq!(tag.tag_type, FlvTagType::Video);

        let tag = FlvTag::script(0, Bytes::new());
        assert_eq!(tag.tag_type, FlvTagType::Script);
    }

    #[test]
    fn test_video_frame_type() {
        assert_eq!(VideoFrameType::from_byte(1), Some(VideoFrameType::Keyframe));
        assert_eq!(VideoFrameType::from_byte(2), Some(VideoFrameType::InterFrame));
        assert_eq!(VideoFrameType::from_byte(0), None);
        assert_eq!(VideoFrameType::from_byte(6), None);

        assert!(VideoFrameType::Keyframe.is_keyframe());
        assert!(VideoFrameType::GeneratedKeyframe.is_keyframe());
        assert!(!VideoFrameType::InterFrame.is_keyframe());

        assert_eq!(
            VideoFrameType::try_from(5).unwrap(),
            VideoFrameType::VideoInfoFrame
        );
        assert!(matches!(
            VideoFrameType::try_from(6),
            Err(MediaError::InvalidFrameType(6))
        ));
    }

    #[test]
    fn test_video_codec() {
        assert_eq!(VideoCodec::from_byte(7), Some(VideoCodec::Avc));
        assert_eq!(VideoCodec::from_byte(2), Some(VideoCodec::SorensonH263));
        assert_eq!(VideoCodec::from_byte(0), None);
        assert_eq!(VideoCodec::from_byte(8), None);

        assert!(matches!(
            VideoCodec::try_from(12),
            Err(MediaError::InvalidCodecId(12))
        ));
    }

    #[test]
    fn test_sound_format() {
        assert_eq!(SoundFormat::from_byte(10), Some(SoundFormat::Aac));
        assert_eq!(SoundFormat::from_byte(2), Some(SoundFormat::Mp3));
        // 9, 12 and 13 are reserved
        assert_eq!(SoundFormat::from_byte(9), None);
        assert_eq!(SoundFormat::from_byte(13), None);

        assert!(matches!(
            SoundFormat::try_from(9),
            Err(MediaError::InvalidCodecId(9))
        ));
    }

    #[test]
    fn test_sound_rate_to_hz() {
        assert_eq!(SoundRate::R5512.to_hz(), 5512);
        assert_eq!(SoundRate::R11025.to_hz(), 11025);
        assert_eq!(SoundRate::R22050.to_hz(), 22050);
        assert_eq!(SoundRate::R44100.to_hz(), 44100);
    }
}
